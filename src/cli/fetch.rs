//! # fetch 子命令 CLI 定义
//!
//! 下载 SPARC rotmod 压缩包并解压。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fetch.rs`

use clap::Args;
use std::path::PathBuf;

/// Zenodo 上的 SPARC LTG 质量模型压缩包
pub const DEFAULT_SPARC_URL: &str = "https://zenodo.org/record/16284118/files/Rotmod_LTG.zip";

/// fetch 子命令参数
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Archive URL
    #[arg(long, default_value = DEFAULT_SPARC_URL)]
    pub url: String,

    /// Local archive path
    #[arg(long, default_value = "Rotmod_LTG.zip")]
    pub archive: PathBuf,

    /// Extraction directory
    #[arg(long, default_value = "sparc_data")]
    pub extract_dir: PathBuf,

    /// Download and extract again even if outputs exist
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,
}
