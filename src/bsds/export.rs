//! # BSDS 数据导出
//!
//! 导出逐半径的模型曲线和批量拟合汇总表。
//!
//! ## 支持格式
//! - 曲线 CSV: r, v_obs, v_err, v_bary, v_bsds, v_total, m_enclosed
//! - 汇总 CSV: 每个星系一行，包含参数、k(Mb)、χ² 与 χ²/N
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 调用
//! - 使用 `csv` + `serde` 写入

use crate::bsds::FitResult;
use crate::error::{BsdsError, Result};
use crate::models::RotationCurve;

use serde::Serialize;
use std::path::Path;

/// 曲线 CSV 的一行
#[derive(Debug, Serialize)]
struct CurveRow {
    r_kpc: f64,
    v_obs: f64,
    v_err: f64,
    v_bary: f64,
    v_bsds: f64,
    v_total: f64,
    m_enclosed: f64,
}

/// 批量汇总表的一行
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub galaxy: String,
    pub n_points: usize,
    pub baryonic_mass: f64,
    pub rs_kpc: f64,
    pub n: f64,
    pub k0: f64,
    pub coupling: f64,
    pub chi2: f64,
    pub chi2_per_point: f64,
}

impl SummaryRow {
    pub fn new(galaxy: impl Into<String>, result: &FitResult) -> Self {
        SummaryRow {
            galaxy: galaxy.into(),
            n_points: result.n_points(),
            baryonic_mass: result.params.baryonic_mass,
            rs_kpc: result.params.screening_radius,
            n: result.params.screening_exponent,
            k0: result.params.k0,
            coupling: result.coupling,
            chi2: result.chi2,
            chi2_per_point: result.chi2_per_point(),
        }
    }
}

/// 导出模型曲线为 CSV
pub fn to_csv(curve: &RotationCurve, result: &FitResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for i in 0..curve.len() {
        wtr.serialize(CurveRow {
            r_kpc: curve.radius()[i],
            v_obs: curve.v_obs()[i],
            v_err: curve.v_err()[i],
            v_bary: result.v_bary[i],
            v_bsds: result.v_bsds[i],
            v_total: result.v_total[i],
            m_enclosed: result.m_enclosed[i],
        })?;
    }

    wtr.flush().map_err(|e| BsdsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出批量汇总表为 CSV
pub fn summary_to_csv(rows: &[SummaryRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| BsdsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsds::BsdsModel;
    use crate::models::params::NGC3198_K0;
    use crate::models::ModelParams;

    fn sample() -> (RotationCurve, FitResult) {
        let curve = RotationCurve::new(
            "export-test",
            vec![0.0, 2.0, 4.0],
            vec![0.0, 80.0, 120.0],
            vec![2.0, 3.0, 4.0],
            vec![0.0, 15.0, 25.0],
            vec![0.0, 70.0, 100.0],
            None,
        )
        .unwrap();
        let result = BsdsModel::new(ModelParams::new(6.5e10, NGC3198_K0))
            .unwrap()
            .evaluate(&curve)
            .unwrap();
        (curve, result)
    }

    #[test]
    fn test_curve_csv() {
        let (curve, result) = sample();
        let path = std::env::temp_dir().join("bsds_export_curve_test.csv");
        to_csv(&curve, &result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("r_kpc,v_obs,v_err,v_bary,v_bsds,v_total,m_enclosed")
        );
        assert_eq!(lines.count(), 3);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_summary_csv() {
        let (_, result) = sample();
        let row = SummaryRow::new("NGC3198", &result);
        assert_eq!(row.n_points, 3);
        assert_eq!(row.k0, NGC3198_K0);

        let path = std::env::temp_dir().join("bsds_export_summary_test.csv");
        summary_to_csv(&[row], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("galaxy,n_points,baryonic_mass,rs_kpc,n,k0,coupling,chi2,chi2_per_point"));
        assert!(content.contains("NGC3198,3,"));
        let _ = std::fs::remove_file(&path);
    }
}
