//! # quantify 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/quantify.rs`

use crate::models::selection::DEFAULT_SATURATION;
use crate::models::{ColorMode, ProjectionMethod};
use clap::Args;
use std::path::PathBuf;

/// quantify 子命令参数
#[derive(Args, Debug)]
pub struct QuantifyArgs {
    /// Folder containing the stacks (prompted for when omitted)
    pub input: Option<PathBuf>,

    /// Channel to quantify (1-based)
    #[arg(short, long, env = "GFPQUANT_CHANNEL", default_value_t = 1)]
    pub channel: usize,

    /// Z projection method
    #[arg(
        short,
        long,
        value_enum,
        env = "GFPQUANT_PROJECTION",
        default_value = "avg"
    )]
    pub projection: ProjectionMethod,

    /// Display lookup table
    #[arg(long, value_enum, default_value = "colorized")]
    pub color: ColorMode,

    /// Keep the raw display range instead of auto contrast
    #[arg(long, default_value_t = false)]
    pub no_autoscale: bool,

    /// Fraction of saturated pixels for auto contrast (0-1)
    #[arg(long, default_value_t = DEFAULT_SATURATION)]
    pub saturated: f64,

    /// Glob pattern for input files (comma separated, case-insensitive)
    #[arg(long, default_value = "*.mcs")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Results file name, written inside the input folder
    #[arg(short, long, default_value = "Quantification_Results.csv")]
    pub output_name: String,

    /// Do not draw the ASCII preview of each projection
    #[arg(long, default_value_t = false)]
    pub no_preview: bool,

    /// Preview width in characters
    #[arg(long, default_value_t = 64)]
    pub preview_width: usize,
}
