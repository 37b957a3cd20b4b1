//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `quantify`: 逐文件投影 + 人工 ROI + 强度统计
//! - `inspect`: 查看超堆栈尺寸与通道数
//! - `synth`: 生成合成测试堆栈
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: inspect, quantify, synth

pub mod inspect;
pub mod quantify;
pub mod synth;

use clap::{Parser, Subcommand};

/// gfpquant - 多通道显微图像 ROI 强度定量
#[derive(Parser)]
#[command(name = "gfpquant")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Operator-gated ROI intensity quantification for multi-channel microscopy stacks", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Project one channel per stack, delineate a ROI and measure its intensity
    Quantify(quantify::QuantifyArgs),

    /// Show dimensions and channel counts of stacks
    Inspect(inspect::InspectArgs),

    /// Write synthetic multi-channel stacks for dry runs
    Synth(synth::SynthArgs),
}
