//! # 工具函数模块
//!
//! 提供美化输出、进度提示、日志初始化等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/`, `host/` 模块使用
//! - 子模块: logging, output, progress

pub mod logging;
pub mod output;
pub mod progress;
