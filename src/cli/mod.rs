//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fit`: 对单个 rotmod 文件或整个目录做 BSDS 旋转曲线求值
//! - `fetch`: 下载并解压 SPARC 质量模型数据
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: fit, fetch

pub mod fetch;
pub mod fit;

use clap::{Parser, Subcommand};

/// BSDS - 几何暗区旋转曲线工具箱
#[derive(Parser)]
#[command(name = "bsds")]
#[command(version)]
#[command(
    about = "Brane-Structured Dark Sector rotation-curve fits for SPARC galaxies",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate the BSDS rotation-curve model against SPARC mass-model data
    Fit(fit::FitArgs),

    /// Download and extract the SPARC rotation-curve archive
    Fetch(fetch::FetchArgs),
}
