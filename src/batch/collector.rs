//! # 文件收集器
//!
//! 根据输入路径和扩展名模式枚举批处理条目。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多模式，不区分大小写）
//! - 可选递归搜索
//! - 按文件名排序，保证枚举顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/quantify.rs`, `commands/inspect.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{QuantError, Result};
use crate::models::BatchItem;

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec!["*".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<BatchItem>> {
        if self.input.is_file() {
            return Ok(vec![BatchItem::new(self.input.clone())]);
        }

        if !self.input.is_dir() {
            return Err(QuantError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let patterns = self.compile()?;
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let items = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| Self::matches_patterns(&patterns, e.path()))
            .map(|e| BatchItem::new(e.path().to_path_buf()))
            .collect();

        Ok(items)
    }

    fn compile(&self) -> Result<Vec<Pattern>> {
        self.patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    QuantError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect()
    }

    /// 检查文件是否匹配任一模式
    fn matches_patterns(patterns: &[Pattern], path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        patterns.iter().any(|p| p.matches_with(filename, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_collect_sorted_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.mcs"));
        touch(&dir.path().join("a.MCS"));
        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub").join("c.mcs"));

        let items = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.mcs")
            .collect()
            .unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name().to_string()).collect();
        assert_eq!(names, vec!["a.MCS", "b.mcs"]);

        let all = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.mcs, *.txt")
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_missing_directory() {
        let err = FileCollector::new(PathBuf::from("/definitely/not/here"))
            .collect()
            .unwrap_err();
        assert!(matches!(err, QuantError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("[")
            .collect()
            .unwrap_err();
        assert!(matches!(err, QuantError::InvalidArgument(_)));
    }
}
