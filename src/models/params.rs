//! # BSDS 模型参数
//!
//! 重子质量、屏蔽半径、屏蔽指数和耦合归一化 k0。
//! k0 没有全局默认值，每次求值都必须显式给出（两个已知标定：0.069 和 0.03）。
//!
//! ## 依赖关系
//! - 被 `bsds/` 与 `commands/fit.rs` 使用
//! - 无外部模块依赖

use crate::error::{BsdsError, Result};

use serde::{Deserialize, Serialize};

/// 默认屏蔽半径 (kpc)
pub const DEFAULT_SCREENING_RADIUS: f64 = 10.0;

/// 默认屏蔽指数
pub const DEFAULT_SCREENING_EXPONENT: f64 = 6.0;

/// 全局 SPARC 拟合标定的 k0
pub const SPARC_K0: f64 = 0.069;

/// NGC 3198 单星系标定的 k0
pub const NGC3198_K0: f64 = 0.03;

/// BSDS 模型参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// 重子质量 Mb (M☉)
    pub baryonic_mass: f64,
    /// 屏蔽半径 rs (kpc)
    pub screening_radius: f64,
    /// 屏蔽指数 n
    pub screening_exponent: f64,
    /// 耦合归一化 k0
    pub k0: f64,
}

impl ModelParams {
    /// 使用默认屏蔽参数 (rs = 10 kpc, n = 6) 创建
    pub fn new(baryonic_mass: f64, k0: f64) -> Self {
        ModelParams {
            baryonic_mass,
            screening_radius: DEFAULT_SCREENING_RADIUS,
            screening_exponent: DEFAULT_SCREENING_EXPONENT,
            k0,
        }
    }

    /// 设置屏蔽参数
    pub fn with_screening(mut self, screening_radius: f64, screening_exponent: f64) -> Self {
        self.screening_radius = screening_radius;
        self.screening_exponent = screening_exponent;
        self
    }

    /// 参数校验
    pub fn validate(&self) -> Result<()> {
        if !(self.baryonic_mass > 0.0 && self.baryonic_mass.is_finite()) {
            return Err(BsdsError::NonPositiveMass(self.baryonic_mass));
        }
        check_positive("rs", self.screening_radius)?;
        check_positive("n", self.screening_exponent)?;
        check_positive("k0", self.k0)?;
        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BsdsError::invalid_parameter(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = ModelParams::new(5e10, SPARC_K0);
        assert_eq!(p.screening_radius, 10.0);
        assert_eq!(p.screening_exponent, 6.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            ModelParams::new(0.0, SPARC_K0).validate(),
            Err(BsdsError::NonPositiveMass(_))
        ));
        assert!(matches!(
            ModelParams::new(-1e10, SPARC_K0).validate(),
            Err(BsdsError::NonPositiveMass(_))
        ));
        assert!(ModelParams::new(5e10, 0.0).validate().is_err());
        assert!(ModelParams::new(5e10, NGC3198_K0)
            .with_screening(0.0, 6.0)
            .validate()
            .is_err());
        assert!(ModelParams::new(5e10, NGC3198_K0)
            .with_screening(10.0, -2.0)
            .validate()
            .is_err());
    }
}
