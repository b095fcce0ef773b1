//! # fit 子命令 CLI 定义
//!
//! 模型参数可由命令行或环境变量给出（`BSDS_K0`、`BSDS_RS`、`BSDS_N`）。
//! k0 的优先级：`--k0` > `--preset` > sparc 预设。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fit.rs`

use crate::models::params::{
    ModelParams, DEFAULT_SCREENING_EXPONENT, DEFAULT_SCREENING_RADIUS, NGC3198_K0, SPARC_K0,
};

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// k0 标定预设
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum K0Preset {
    /// Global SPARC calibration (k0 = 0.069)
    #[default]
    Sparc,
    /// NGC 3198 single-galaxy calibration (k0 = 0.03)
    Ngc3198,
}

impl K0Preset {
    pub fn k0(self) -> f64 {
        match self {
            K0Preset::Sparc => SPARC_K0,
            K0Preset::Ngc3198 => NGC3198_K0,
        }
    }
}

impl std::fmt::Display for K0Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            K0Preset::Sparc => write!(f, "sparc"),
            K0Preset::Ngc3198 => write!(f, "ngc3198"),
        }
    }
}

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FitOutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file (per-radius model curves)
    Csv,
}

impl FitOutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FitOutputFormat::Png => "png",
            FitOutputFormat::Svg => "svg",
            FitOutputFormat::Csv => "csv",
        }
    }
}

/// fit 子命令参数
#[derive(Args, Debug)]
pub struct FitArgs {
    /// Input: rotmod data file or directory containing rotmod files
    pub input: PathBuf,

    /// Baryonic mass Mb in solar masses (e.g., 6.5e10)
    #[arg(long)]
    pub mb: f64,

    /// Screening radius rs in kpc
    #[arg(long, env = "BSDS_RS", default_value_t = DEFAULT_SCREENING_RADIUS)]
    pub rs: f64,

    /// Screening exponent n
    #[arg(long, env = "BSDS_N", default_value_t = DEFAULT_SCREENING_EXPONENT)]
    pub n: f64,

    /// Coupling normalization k0 (overrides --preset)
    #[arg(long, env = "BSDS_K0")]
    pub k0: Option<f64>,

    /// Calibration preset for k0
    #[arg(long, value_enum, default_value = "sparc")]
    pub preset: K0Preset,

    /// Output: file path (single mode) or directory (batch mode).
    /// Defaults to '<stem>_BSDS.png' next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<FitOutputFormat>,

    /// Skip figure/data output and only report the fit
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1350)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Title for the plot (default: '<galaxy> - BSDS Rotation Curve')
    #[arg(long)]
    pub title: Option<String>,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, comma separated)
    #[arg(long, default_value = "*_rotmod.dat")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files (batch mode)
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Write a per-galaxy summary CSV (batch mode)
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Rows to print: largest residuals (single file) or best-fitting galaxies (batch mode)
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,
}

impl FitArgs {
    /// 解析最终使用的 k0
    pub fn resolve_k0(&self) -> f64 {
        self.k0.unwrap_or_else(|| self.preset.k0())
    }

    /// 组装模型参数（校验在 BsdsModel::new 中进行）
    pub fn model_params(&self) -> ModelParams {
        ModelParams::new(self.mb, self.resolve_k0()).with_screening(self.rs, self.n)
    }
}
