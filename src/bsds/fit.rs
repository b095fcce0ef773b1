//! # BSDS 拟合求值器
//!
//! 将数值核心组合为一次完整的旋转曲线求值，并计算 χ² 拟合优度。
//!
//! ## 流程
//! 1. 校验参数（数据在 `RotationCurve::new` 中已校验）
//! 2. 计算包含质量与暗区速度
//! 3. 计算重子速度与总速度
//! 4. 计算 χ²
//!
//! 每次调用相互独立且确定：相同输入得到逐位相同的输出。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 调用
//! - 使用 `bsds/model.rs` 的数值函数
//! - 使用 `models/` 的 RotationCurve, ModelParams

use crate::bsds::model;
use crate::error::{BsdsError, Result};
use crate::models::galaxy::validate_uncertainty;
use crate::models::{ModelParams, RotationCurve};

/// 一次求值的结果
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// 仅重子速度 (km/s)
    pub v_bary: Vec<f64>,
    /// 仅 BSDS 速度 (km/s)
    pub v_bsds: Vec<f64>,
    /// 重子 + BSDS 总速度 (km/s)
    pub v_total: Vec<f64>,
    /// BSDS 包含质量 (M☉)
    pub m_enclosed: Vec<f64>,
    /// 耦合常数 k(Mb)
    pub coupling: f64,
    /// χ² 统计量
    pub chi2: f64,
    /// 使用的模型参数
    pub params: ModelParams,
}

impl FitResult {
    /// 数据点数
    pub fn n_points(&self) -> usize {
        self.v_total.len()
    }

    /// 每点 χ²（报告层使用，模型参数未拟合，不扣除自由度）
    pub fn chi2_per_point(&self) -> f64 {
        if self.v_total.is_empty() {
            0.0
        } else {
            self.chi2 / self.v_total.len() as f64
        }
    }
}

/// χ² = Σ ((V_total - V_obs) / err)²
pub fn chi_squared(v_total: &[f64], v_obs: &[f64], v_err: &[f64]) -> Result<f64> {
    if v_obs.len() != v_total.len() {
        return Err(BsdsError::LengthMismatch {
            column: "v_obs".to_string(),
            expected: v_total.len(),
            found: v_obs.len(),
        });
    }
    if v_err.len() != v_total.len() {
        return Err(BsdsError::LengthMismatch {
            column: "v_err".to_string(),
            expected: v_total.len(),
            found: v_err.len(),
        });
    }
    validate_uncertainty(v_err)?;

    Ok(v_total
        .iter()
        .zip(v_obs)
        .zip(v_err)
        .map(|((&model, &obs), &err)| {
            let z = (model - obs) / err;
            z * z
        })
        .sum())
}

/// BSDS 模型
#[derive(Debug, Clone, Copy)]
pub struct BsdsModel {
    params: ModelParams,
}

impl BsdsModel {
    /// 创建模型（参数在此校验）
    pub fn new(params: ModelParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// 对一条旋转曲线求值
    pub fn evaluate(&self, curve: &RotationCurve) -> Result<FitResult> {
        let p = &self.params;
        let radius = curve.radius();

        let coupling = model::coupling(p.baryonic_mass, p.k0)?;
        let m_enclosed = model::enclosed_mass(radius, p)?;
        let v_bsds = model::dark_sector_velocity(radius, &m_enclosed);
        let v_bary = model::baryonic_velocity(curve.v_gas(), curve.v_disk(), curve.v_bulge());
        let v_total = model::total_velocity(&v_bary, &v_bsds);
        let chi2 = chi_squared(&v_total, curve.v_obs(), curve.v_err())?;

        Ok(FitResult {
            v_bary,
            v_bsds,
            v_total,
            m_enclosed,
            coupling,
            chi2,
            params: *p,
        })
    }
}

/// 从原始序列求值
///
/// 先构造并校验 `RotationCurve`，任何输入错误都在数值计算之前返回。
pub fn evaluate(
    radius: &[f64],
    v_obs: &[f64],
    v_err: &[f64],
    v_gas: &[f64],
    v_disk: &[f64],
    v_bulge: Option<&[f64]>,
    params: ModelParams,
) -> Result<FitResult> {
    let model = BsdsModel::new(params)?;
    let curve = RotationCurve::new(
        "unnamed",
        radius.to_vec(),
        v_obs.to_vec(),
        v_err.to_vec(),
        v_gas.to_vec(),
        v_disk.to_vec(),
        v_bulge.map(|b| b.to_vec()),
    )?;
    model.evaluate(&curve)
}
