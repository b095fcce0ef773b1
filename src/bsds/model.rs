//! # BSDS 数值核心
//!
//! 实现几何暗区（Brane-Structured Dark Sector）修正的全部闭式公式。
//!
//! ## 公式
//! - 屏蔽函数: S(r) = 1 - exp(-(r/rs)^n)
//! - 质量标度律: k(Mb) = k0 · (Mb / 5e10)^(-1/2)
//! - 包含质量: M(r) = k(Mb) · Mb · ∫₀ʳ S(r') dr' （累积梯形积分）
//! - 暗区速度: V_bs = sqrt(G · M(r) / r)
//! - 总速度: V_tot = sqrt(V_bary² + V_bs²)，V_bary = sqrt(Vgas² + Vdisk² + Vbul²)
//!
//! 梯形积分的精度取决于网格密度，稀疏网格会低估 r ≈ rs 附近的过渡区，
//! 这是拟合残差的来源之一。
//!
//! ## 依赖关系
//! - 被 `bsds/fit.rs` 调用
//! - 使用 `models/params.rs` 的 ModelParams

use crate::error::{BsdsError, Result};
use crate::models::ModelParams;

/// 引力常数 G，单位 kpc·(km/s)²/M☉
pub const G: f64 = 4.3009e-6;

/// 质量标度律的参考质量 (M☉)
pub const PIVOT_MASS: f64 = 5e10;

/// r = 0 处代替半径的下限 (kpc)
pub const R_FLOOR: f64 = 1e-6;

/// 屏蔽函数 S(r)
///
/// 调用方保证 `rs > 0`、`n > 0`、`r >= 0`。
#[inline]
pub fn screening(r: f64, rs: f64, n: f64) -> f64 {
    1.0 - (-(r / rs).powf(n)).exp()
}

/// 对整个半径网格计算屏蔽函数
pub fn screening_profile(radius: &[f64], rs: f64, n: f64) -> Vec<f64> {
    radius.iter().map(|&r| screening(r, rs, n)).collect()
}

/// 质量标度律 k(Mb)
pub fn coupling(baryonic_mass: f64, k0: f64) -> Result<f64> {
    if !(baryonic_mass > 0.0 && baryonic_mass.is_finite()) {
        return Err(BsdsError::NonPositiveMass(baryonic_mass));
    }
    Ok(k0 * (baryonic_mass / PIVOT_MASS).powf(-0.5))
}

/// 屏蔽函数在网格上的累积梯形积分，首项为 0
pub fn cumulative_trapezoid(radius: &[f64], values: &[f64]) -> Vec<f64> {
    let mut integral = Vec::with_capacity(radius.len());
    if radius.is_empty() {
        return integral;
    }
    integral.push(0.0);

    // 严格从左到右累加
    let increments = radius
        .windows(2)
        .zip(values.windows(2))
        .map(|(r, s)| 0.5 * (s[1] + s[0]) * (r[1] - r[0]));
    integral.extend(increments.scan(0.0, |acc, d| {
        *acc += d;
        Some(*acc)
    }));
    integral
}

/// BSDS 包含质量剖面 M_enc(r)
pub fn enclosed_mass(radius: &[f64], params: &ModelParams) -> Result<Vec<f64>> {
    let k = coupling(params.baryonic_mass, params.k0)?;
    let s = screening_profile(radius, params.screening_radius, params.screening_exponent);
    let scale = k * params.baryonic_mass;

    Ok(cumulative_trapezoid(radius, &s)
        .into_iter()
        .map(|i| scale * i)
        .collect())
}

/// 由包含质量计算暗区圆周速度
pub fn dark_sector_velocity(radius: &[f64], m_enclosed: &[f64]) -> Vec<f64> {
    radius
        .iter()
        .zip(m_enclosed)
        .map(|(&r, &m)| {
            let r_safe = if r > 0.0 { r } else { R_FLOOR };
            (G * m / r_safe).sqrt()
        })
        .collect()
}

/// BSDS 旋转速度 V_bs(r)
pub fn bsds_velocity(radius: &[f64], params: &ModelParams) -> Result<Vec<f64>> {
    let m_enc = enclosed_mass(radius, params)?;
    Ok(dark_sector_velocity(radius, &m_enc))
}

/// 重子速度：各分量平方和开方
pub fn baryonic_velocity(v_gas: &[f64], v_disk: &[f64], v_bulge: &[f64]) -> Vec<f64> {
    v_gas
        .iter()
        .zip(v_disk)
        .zip(v_bulge)
        .map(|((&g, &d), &b)| (g * g + d * d + b * b).sqrt())
        .collect()
}

/// 总速度：重子与暗区贡献平方相加
pub fn total_velocity(v_bary: &[f64], v_bsds: &[f64]) -> Vec<f64> {
    v_bary
        .iter()
        .zip(v_bsds)
        .map(|(&b, &d)| (b * b + d * d).sqrt())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::params::SPARC_K0;

    fn params() -> ModelParams {
        ModelParams::new(5e10, SPARC_K0)
    }

    #[test]
    fn test_screening_limits() {
        assert_eq!(screening(0.0, 10.0, 6.0), 0.0);
        assert!((screening(100.0, 10.0, 6.0) - 1.0).abs() < 1e-12);
        assert!((screening(10.0, 10.0, 6.0) - (1.0 - (-1.0f64).exp())).abs() < 1e-15);
    }

    #[test]
    fn test_screening_range_and_monotonic() {
        let radius: Vec<f64> = (0..200).map(|i| i as f64 * 0.25).collect();
        let s = screening_profile(&radius, 10.0, 6.0);
        for v in &s {
            assert!((0.0..=1.0).contains(v));
        }
        for w in s.windows(2) {
            assert!(w[1] >= w[0]);
        }
        // 过渡区内严格小于 1
        assert!(s.iter().take(40).all(|&v| v < 1.0));
    }

    #[test]
    fn test_coupling() {
        assert!((coupling(5e10, 0.069).unwrap() - 0.069).abs() < 1e-15);
        assert!((coupling(2e11, 0.069).unwrap() - 0.0345).abs() < 1e-12);
        assert!(matches!(
            coupling(0.0, 0.069),
            Err(BsdsError::NonPositiveMass(_))
        ));
        assert!(coupling(-5e10, 0.069).is_err());
        assert!(coupling(f64::NAN, 0.069).is_err());
    }

    #[test]
    fn test_cumulative_trapezoid_linear() {
        // ∫ 2x dx = x²
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 2.0, 4.0, 6.0];
        let i = cumulative_trapezoid(&x, &y);
        assert_eq!(i, vec![0.0, 1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_enclosed_mass_scenario() {
        let radius = [0.0, 5.0, 10.0, 15.0];
        let s = screening_profile(&radius, 10.0, 6.0);
        assert_eq!(s[0], 0.0);
        assert!((s[1] - 0.0155).abs() < 1e-3);
        assert!((s[2] - 0.6321).abs() < 1e-3);
        assert!((s[3] - 0.9887).abs() < 1e-3);

        let m = enclosed_mass(&radius, &params()).unwrap();
        assert_eq!(m[0], 0.0);
        for w in m.windows(2) {
            assert!(w[1] > w[0]);
        }

        let expected_1 = 0.069 * 5e10 * 0.5 * (s[0] + s[1]) * 5.0;
        assert!((m[1] - expected_1).abs() / expected_1 < 1e-12);
    }

    #[test]
    fn test_enclosed_mass_edge_lengths() {
        assert_eq!(enclosed_mass(&[3.0], &params()).unwrap(), vec![0.0]);
        assert!(enclosed_mass(&[], &params()).unwrap().is_empty());
    }

    #[test]
    fn test_enclosed_mass_non_decreasing_with_repeated_radius() {
        let radius = [0.0, 2.0, 2.0, 8.0, 12.0, 30.0];
        let m = enclosed_mass(&radius, &params()).unwrap();
        assert!(m.iter().all(|&v| v >= 0.0));
        for w in m.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_doubling_k0_doubles_mass() {
        let radius = [0.0, 4.0, 9.0, 14.0, 25.0];
        let base = params();
        let doubled = ModelParams {
            k0: base.k0 * 2.0,
            ..base
        };

        let m1 = enclosed_mass(&radius, &base).unwrap();
        let m2 = enclosed_mass(&radius, &doubled).unwrap();
        for (a, b) in m1.iter().zip(&m2) {
            assert!((b - 2.0 * a).abs() <= 1e-9 * b.abs());
        }

        let v1 = bsds_velocity(&radius, &base).unwrap();
        let v2 = bsds_velocity(&radius, &doubled).unwrap();
        for (a, b) in v1.iter().zip(&v2) {
            assert!((b * b - 2.0 * a * a).abs() <= 1e-9 * (b * b).max(1.0));
        }
    }

    #[test]
    fn test_dark_sector_velocity_floor() {
        let v = dark_sector_velocity(&[0.0, 1.0], &[0.0, 1.0 / G]);
        assert_eq!(v[0], 0.0);
        assert!((v[1] - 1.0).abs() < 1e-12);
        assert!(v.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_baryonic_velocity_without_bulge() {
        let v = baryonic_velocity(&[3.0, 6.0], &[4.0, 8.0], &[0.0, 0.0]);
        assert_eq!(v, vec![5.0, 10.0]);
        let v = baryonic_velocity(&[1.0], &[2.0], &[2.0]);
        assert_eq!(v, vec![3.0]);
    }

    #[test]
    fn test_total_velocity() {
        assert_eq!(total_velocity(&[3.0, 0.0], &[4.0, 7.0]), vec![5.0, 7.0]);
    }
}
