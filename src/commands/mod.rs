//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `host/`, `imaging/`, `utils/`
//! - 子模块: inspect, quantify, synth

pub mod inspect;
pub mod quantify;
pub mod synth;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Quantify(args) => quantify::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Synth(args) => synth::execute(args),
    }
}
