//! # synth 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/synth.rs`

use clap::Args;
use std::path::PathBuf;

/// synth 子命令参数
#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Output folder (created if missing)
    pub output: PathBuf,

    /// Number of stacks to write
    #[arg(short = 'n', long, default_value_t = 3)]
    pub count: usize,

    /// Channels per stack
    #[arg(long, default_value_t = 2)]
    pub channels: usize,

    /// Z slices per stack
    #[arg(long, default_value_t = 5)]
    pub slices: usize,

    /// Width in pixels
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// Height in pixels
    #[arg(long, default_value_t = 64)]
    pub height: usize,

    /// Pixel size in µm
    #[arg(long, default_value_t = 0.2)]
    pub pixel_size: f64,

    /// Overwrite existing files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
