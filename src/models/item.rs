//! # 批处理条目
//!
//! 枚举阶段创建，之后不再修改。

use std::path::{Path, PathBuf};

/// 一个待处理的源文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    path: PathBuf,
    name: String,
}

impl BatchItem {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        BatchItem { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 显示名称（文件名），同时作为结果表的 Label
    pub fn name(&self) -> &str {
        &self.name
    }
}
