//! # 统一错误处理模块
//!
//! 定义 BSDS 工具箱的所有错误类型，使用 `thiserror` 派生。
//!
//! 输入校验错误必须在任何数值计算之前抛出，
//! 不允许以 NaN/inf 的形式在计算中途暴露。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// BSDS 统一错误类型
#[derive(Error, Debug)]
pub enum BsdsError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 输入校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("Length mismatch: '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Degenerate radial grid: {len} point(s), at least 2 required")]
    DegenerateGrid { len: usize },

    #[error("Radial grid is not sorted: r[{index}] = {value} is below the preceding radius {prev}")]
    UnsortedGrid { index: usize, value: f64, prev: f64 },

    #[error("Negative radius r[{index}] = {value}")]
    NegativeRadius { index: usize, value: f64 },

    #[error("Non-finite value in '{column}' at index {index}: {value}")]
    NonFiniteValue {
        column: String,
        index: usize,
        value: f64,
    },

    #[error("Negative observed velocity at index {index}: {value}")]
    NegativeVelocity { index: usize, value: f64 },

    #[error("Baryonic mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    #[error("Uncertainty must be positive at index {index}, got {value}")]
    NonPositiveUncertainty { index: usize, value: f64 },

    #[error("Invalid model parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 下载与外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("Download failed: {url}\nReason: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl BsdsError {
    /// 构造参数错误
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        BsdsError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BsdsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsorted_grid_message() {
        let err = BsdsError::UnsortedGrid {
            index: 3,
            value: 1.0,
            prev: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Radial grid is not sorted: r[3] = 1 is below the preceding radius 2"
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = BsdsError::invalid_parameter("rs", "must be positive and finite, got 0");
        assert!(matches!(err, BsdsError::InvalidParameter { ref name, .. } if name == "rs"));
        assert!(err.to_string().contains("rs"));
    }
}
