//! # 星系旋转曲线数据模型
//!
//! 存储单个星系的质量模型表格（SPARC rotmod 格式），并在构造时完成全部输入校验。
//!
//! ## 校验规则
//! - 所有序列与半径网格等长，且长度 ≥ 2
//! - 半径非负、单调不减
//! - 观测速度非负，误差严格为正
//! - 所有数值有限
//!
//! 分量速度（gas/disk/bulge）只要求有限：SPARC 用负的 Vgas 表示内区净外向贡献，
//! 分量只以平方形式进入模型。
//!
//! ## 依赖关系
//! - 被 `parsers/rotmod.rs` 构造
//! - 被 `bsds/` 与 `commands/` 使用

use crate::error::{BsdsError, Result};

/// 星系旋转曲线（已校验）
#[derive(Debug, Clone)]
pub struct RotationCurve {
    /// 星系名称
    name: String,
    /// 半径网格 (kpc)
    radius: Vec<f64>,
    /// 观测旋转速度 (km/s)
    v_obs: Vec<f64>,
    /// 观测误差 (km/s)
    v_err: Vec<f64>,
    /// 气体贡献 (km/s)
    v_gas: Vec<f64>,
    /// 恒星盘贡献 (km/s)
    v_disk: Vec<f64>,
    /// 核球贡献 (km/s)，缺失时为零
    v_bulge: Vec<f64>,
    /// 源数据是否包含核球列
    has_bulge: bool,
    /// 距离 (Mpc)，来自文件头注释
    distance_mpc: Option<f64>,
}

impl RotationCurve {
    /// 创建并校验旋转曲线
    ///
    /// `v_bulge` 为 `None` 时以零填充。
    pub fn new(
        name: impl Into<String>,
        radius: Vec<f64>,
        v_obs: Vec<f64>,
        v_err: Vec<f64>,
        v_gas: Vec<f64>,
        v_disk: Vec<f64>,
        v_bulge: Option<Vec<f64>>,
    ) -> Result<Self> {
        let n = radius.len();
        let has_bulge = v_bulge.is_some();
        let v_bulge = v_bulge.unwrap_or_else(|| vec![0.0; n]);

        for (column, values) in [
            ("v_obs", &v_obs),
            ("v_err", &v_err),
            ("v_gas", &v_gas),
            ("v_disk", &v_disk),
            ("v_bulge", &v_bulge),
        ] {
            check_length(column, values, n)?;
        }

        if n < 2 {
            return Err(BsdsError::DegenerateGrid { len: n });
        }

        for (column, values) in [
            ("radius", &radius),
            ("v_obs", &v_obs),
            ("v_err", &v_err),
            ("v_gas", &v_gas),
            ("v_disk", &v_disk),
            ("v_bulge", &v_bulge),
        ] {
            check_finite(column, values)?;
        }

        validate_grid(&radius)?;

        if let Some((index, &value)) = v_obs.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(BsdsError::NegativeVelocity { index, value });
        }

        validate_uncertainty(&v_err)?;

        Ok(RotationCurve {
            name: name.into(),
            radius,
            v_obs,
            v_err,
            v_gas,
            v_disk,
            v_bulge,
            has_bulge,
            distance_mpc: None,
        })
    }

    /// 附加距离元数据
    pub fn with_distance(mut self, distance_mpc: Option<f64>) -> Self {
        self.distance_mpc = distance_mpc;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> &[f64] {
        &self.radius
    }

    pub fn v_obs(&self) -> &[f64] {
        &self.v_obs
    }

    pub fn v_err(&self) -> &[f64] {
        &self.v_err
    }

    pub fn v_gas(&self) -> &[f64] {
        &self.v_gas
    }

    pub fn v_disk(&self) -> &[f64] {
        &self.v_disk
    }

    pub fn v_bulge(&self) -> &[f64] {
        &self.v_bulge
    }

    pub fn has_bulge(&self) -> bool {
        self.has_bulge
    }

    pub fn distance_mpc(&self) -> Option<f64> {
        self.distance_mpc
    }

    /// 数据点数
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    /// 校验通过的曲线至少有 2 个点
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// 最大半径 (kpc)
    pub fn max_radius(&self) -> f64 {
        self.radius.last().copied().unwrap_or(0.0)
    }
}

/// 校验半径网格：长度 ≥ 2、有限、非负、单调不减
pub fn validate_grid(radius: &[f64]) -> Result<()> {
    if radius.len() < 2 {
        return Err(BsdsError::DegenerateGrid { len: radius.len() });
    }
    check_finite("radius", radius)?;

    for (index, &value) in radius.iter().enumerate() {
        if value < 0.0 {
            return Err(BsdsError::NegativeRadius { index, value });
        }
        if index > 0 && value < radius[index - 1] {
            return Err(BsdsError::UnsortedGrid {
                index,
                value,
                prev: radius[index - 1],
            });
        }
    }
    Ok(())
}

/// 校验观测误差：严格为正且有限
pub fn validate_uncertainty(v_err: &[f64]) -> Result<()> {
    for (index, &value) in v_err.iter().enumerate() {
        if !(value > 0.0 && value.is_finite()) {
            return Err(BsdsError::NonPositiveUncertainty { index, value });
        }
    }
    Ok(())
}

fn check_length(column: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(BsdsError::LengthMismatch {
            column: column.to_string(),
            expected,
            found: values.len(),
        });
    }
    Ok(())
}

fn check_finite(column: &str, values: &[f64]) -> Result<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(BsdsError::NonFiniteValue {
            column: column.to_string(),
            index,
            value,
        }),
        None => Ok(()),
    }
}
