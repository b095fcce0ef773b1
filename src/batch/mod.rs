//! # 批量处理模块
//!
//! 对一个目录中的多个星系文件并行拟合。
//!
//! ## 功能
//! - 收集匹配文件列表
//! - 并行处理（每个星系的求值相互独立）
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
