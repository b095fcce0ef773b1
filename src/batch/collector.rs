//! # 文件收集器
//!
//! 根据输入目录和 glob 模式收集待拟合的数据文件。
//!
//! ## 功能
//! - 逗号分隔的多模式匹配（`glob::Pattern`）
//! - 可选递归目录搜索
//! - 结果按路径排序，保证批量输出顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{BsdsError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// SPARC 质量模型文件的默认模式
pub const DEFAULT_PATTERN: &str = "*_rotmod.dat";

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配 `*_rotmod.dat`）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Pattern::new(DEFAULT_PATTERN).into_iter().collect(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    BsdsError::InvalidArgument(format!("invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.patterns.iter().any(|p| p.matches(name)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(PathBuf::from("."));
        assert!(collector.matches_patterns(Path::new("sparc/NGC3198_rotmod.dat")));
        assert!(!collector.matches_patterns(Path::new("NGC3198_BSDS.png")));

        let collector = collector.with_pattern("*.dat, UGC*").unwrap();
        assert!(collector.matches_patterns(Path::new("custom.dat")));
        assert!(collector.matches_patterns(Path::new("UGC00128.txt")));
        assert!(!collector.matches_patterns(Path::new("notes.md")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FileCollector::new(PathBuf::from("."))
            .with_pattern("[unclosed")
            .is_err());
    }

    #[test]
    fn test_collect_sorted() {
        let dir = std::env::temp_dir().join("bsds_collector_test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        for name in ["UGC2_rotmod.dat", "NGC1_rotmod.dat", "readme.txt"] {
            fs::write(dir.join(name), "").unwrap();
        }
        fs::write(dir.join("nested").join("DDO3_rotmod.dat"), "").unwrap();

        let flat = FileCollector::new(dir.clone()).collect();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["NGC1_rotmod.dat", "UGC2_rotmod.dat"]);

        let deep = FileCollector::new(dir.clone()).recursive(true).collect();
        assert_eq!(deep.len(), 3);

        let _ = fs::remove_dir_all(&dir);
    }
}
