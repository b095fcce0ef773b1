//! # 数据模型模块
//!
//! 定义旋转曲线数据和 BSDS 模型参数。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`bsds/` 和 `commands/` 使用
//! - 子模块: galaxy, params

pub mod galaxy;
pub mod params;

pub use galaxy::RotationCurve;
pub use params::ModelParams;
