//! # 终端输出样式
//!
//! 操作员看到的状态行统一使用带颜色的前缀标签；诊断日志走 `tracing`，
//! 写到 stderr，两者互不干扰。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `host/` 使用
//! - 使用 `colored` crate

use colored::Colorize;

const RULE_WIDTH: usize = 60;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息（stderr）
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 被跳过的文件及原因
pub fn print_skip(name: &str, reason: &str) {
    println!("{} {} {}", "[SKIP]".dimmed(), name, reason.dimmed());
}

pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(RULE_WIDTH);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

/// 一行 `key: value` 摘要
pub fn print_field(key: &str, value: &str) {
    println!("  {:<14} {}", format!("{}:", key).dimmed(), value);
}
