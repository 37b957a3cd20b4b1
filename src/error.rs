//! # 统一错误处理模块
//!
//! 定义 gfpquant 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - 整批致命：未选择目录、无匹配文件、结果导出失败
//! - 单文件跳过：导入失败、通道序号越界
//! - 非关键：显示样式调整失败（`StylingError`，只记录日志）
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// gfpquant 统一错误类型
#[derive(Error, Debug)]
pub enum QuantError {
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

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to start the event runtime")]
    RuntimeError(#[source] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // 图像导入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to import image: {path}\nReason: {reason}")]
    ImportError { path: String, reason: String },

    #[error("Invalid image format: {0}")]
    InvalidFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 批处理错误
    // ─────────────────────────────────────────────────────────────
    #[error("No folder selected")]
    NoDirectorySelected,

    #[error("ROI delineation needs an interactive terminal")]
    NotInteractive,

    #[error("No matching files found with pattern: {pattern}")]
    EmptyBatch { pattern: String },

    #[error("Channel {requested} is out of range (image has {available} channels)")]
    ChannelRange { requested: usize, available: usize },

    #[error("Failed to export results to: {path}")]
    ExportError {
        path: String,
        #[source]
        source: csv::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid ROI: {0}")]
    InvalidRoi(String),
}

/// 非关键的显示样式错误，只记录，不影响测量
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StylingError {
    #[error("display range reset failed: {0}")]
    DisplayRange(String),

    #[error("contrast enhancement failed: {0}")]
    Contrast(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, QuantError>;
