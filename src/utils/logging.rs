//! # 日志初始化
//!
//! 基于 `tracing-subscriber` 的全局日志订阅器。
//! 优先读取 `RUST_LOG`，否则按 `-v` 次数选择级别。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用一次

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 初始化全局日志
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "gfpquant=info",
        1 => "gfpquant=debug",
        _ => "gfpquant=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "gfpquant=info");
        assert_eq!(default_directive(1), "gfpquant=debug");
        assert_eq!(default_directive(5), "gfpquant=trace");
    }
}
