//! # gfpquant - 多通道显微图像 ROI 强度定量
//!
//! 逐个打开目录中的超堆栈，投影指定通道，由操作员画出 ROI 并按空格
//! 确认，测量面积与强度，最后汇总为一张 CSV 结果表。
//!
//! ## 子命令
//! - `quantify` - 交互式批量定量
//! - `inspect`  - 查看堆栈尺寸与通道数
//! - `synth`    - 生成合成测试堆栈
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/    (批处理控制器、交互闸门、结果汇总)
//!   │     ├── host/     (终端宿主：预览、按键、目录选择)
//!   │     ├── imaging/  (导入、拆分、投影、显示、统计)
//!   │     └── models/   (数据模型)
//!   ├── utils/      (输出、进度、日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod host;
mod imaging;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init_tracing(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        tracing::debug!(error = ?e, "command failed");
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
