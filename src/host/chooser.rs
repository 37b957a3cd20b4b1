//! # 目录选择
//!
//! 未在命令行给出目录时，在终端提示输入。空输入视为取消。

use colored::Colorize;
use console::Term;
use std::path::PathBuf;

/// 提示选择目录；取消时返回 None
pub fn choose_directory(prompt: &str) -> Option<PathBuf> {
    let term = Term::stdout();
    term.write_str(&format!("{} ", prompt.bold())).ok()?;
    let line = term.read_line().ok()?;
    parse_choice(&line)
}

fn parse_choice(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim().trim_matches('"');
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
