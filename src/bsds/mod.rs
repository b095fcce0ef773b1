//! # BSDS 旋转曲线模块
//!
//! 几何暗区（Brane-Structured Dark Sector）旋转曲线模型的计算、绘图与导出。
//!
//! ## 子模块
//! - `model`: 屏蔽函数、质量标度律、包含质量积分、速度合成
//! - `fit`: 求值流程与 χ² 拟合优度
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 使用
//! - 使用 `models/`

pub mod export;
pub mod fit;
pub mod model;
pub mod plot;

pub use fit::{BsdsModel, FitResult};
