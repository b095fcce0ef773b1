//! # bsds
//!
//! 几何暗区（Brane-Structured Dark Sector）星系旋转曲线模型。
//!
//! 数值核心位于 [`bsds::model`]，求值流程与 χ² 位于 [`bsds::fit`]；
//! 其余模块为命令行工具提供数据读取、批量处理和输出。
//!
//! ```no_run
//! use bsds::bsds::fit::evaluate;
//! use bsds::models::{params::SPARC_K0, ModelParams};
//!
//! let result = evaluate(
//!     &[0.0, 5.0, 10.0, 15.0],
//!     &[0.0, 90.0, 140.0, 150.0],
//!     &[5.0, 5.0, 6.0, 8.0],
//!     &[0.0, 20.0, 30.0, 35.0],
//!     &[0.0, 80.0, 90.0, 85.0],
//!     None,
//!     ModelParams::new(5e10, SPARC_K0),
//! )?;
//! println!("chi2 = {:.2}", result.chi2);
//! # Ok::<(), bsds::error::BsdsError>(())
//! ```

pub mod batch;
pub mod bsds;
pub mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod parsers;
pub mod utils;
