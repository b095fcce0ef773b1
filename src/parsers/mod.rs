//! # 解析器模块
//!
//! 提供旋转曲线数据文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: rotmod

pub mod rotmod;

use crate::error::{BsdsError, Result};
use crate::models::RotationCurve;
use std::path::Path;

/// 从文件路径推断格式并解析
pub fn parse_curve_file(path: &Path) -> Result<RotationCurve> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "dat" | "txt" | "" => rotmod::parse_rotmod_file(path),
        _ => Err(BsdsError::ParseError {
            format: "rotmod".to_string(),
            path: path.display().to_string(),
            reason: format!("unsupported extension '.{}'", ext),
        }),
    }
}
