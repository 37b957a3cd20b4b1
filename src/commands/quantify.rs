//! # quantify 命令实现
//!
//! 交互式批量定量：对目录中每个超堆栈投影指定通道，等待操作员画出
//! ROI 并按空格确认，测量后进入下一个文件，全部完成后导出 CSV。
//!
//! ## 流程
//! 1. 确定输入目录（命令行或终端提示）
//! 2. 校验整批配置，枚举文件
//! 3. 在单线程 tokio 运行时上并发驱动控制器与事件分发器
//! 4. 打印汇总与结果表
//!
//! ## 依赖关系
//! - 使用 `cli/quantify.rs` 定义的参数
//! - 使用 `batch/`, `host/`, `imaging::Toolkit`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchConfig, BatchController, BatchReport, FileCollector};
use crate::cli::quantify::QuantifyArgs;
use crate::error::{QuantError, Result};
use crate::host::{chooser, terminal::KeyReader, EventDispatcher};
use crate::imaging::Toolkit;
use crate::models::{ChannelSelection, DisplayOptions};
use crate::utils::output;

use std::path::PathBuf;
use tokio::sync::mpsc;

/// 执行 quantify 命令
pub fn execute(args: QuantifyArgs) -> Result<()> {
    output::print_header("GFP ROI Quantification");

    let dir = resolve_directory(args.input)?;

    let config = BatchConfig {
        selection: ChannelSelection::new(args.channel, args.projection, args.color),
        display: DisplayOptions {
            autoscale: !args.no_autoscale,
            saturation: args.saturated,
        },
        destination: dir.join(&args.output_name),
    };
    config.validate()?;

    let items = FileCollector::new(dir.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;

    output::print_field("Folder", &dir.display().to_string());
    output::print_field("Files", &items.len().to_string());
    output::print_field(
        "Channel",
        &format!(
            "C{} ({} projection, {} LUT)",
            config.selection.index, config.selection.method, config.selection.color_mode
        ),
    );
    output::print_field("Results", &config.destination.display().to_string());
    println!();

    let (gate_tx, gate_rx) = mpsc::unbounded_channel();
    let controller =
        BatchController::start(items, &args.pattern, config, Toolkit::native(), gate_tx)?;

    // 无终端时无法画 ROI，也就无法确认
    if !console::user_attended() {
        return Err(QuantError::NotInteractive);
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let dispatcher = EventDispatcher::new(gate_rx, event_rx)
        .with_preview(!args.no_preview)
        .with_preview_width(args.preview_width);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(QuantError::RuntimeError)?;

    let reader = KeyReader::spawn(event_tx);
    let (mut report, stats) =
        runtime.block_on(async { tokio::join!(controller.run(), dispatcher.run()) });
    runtime.shutdown_background();
    reader.finish();

    tracing::debug!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        abandoned = stats.abandoned,
        "interaction finished"
    );

    print_report(&report);
    match report.export_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// 命令行未给出目录时提示选择；取消即终止
fn resolve_directory(input: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match input {
        Some(dir) => dir,
        None => chooser::choose_directory("Choose a folder with image stacks:")
            .ok_or(QuantError::NoDirectorySelected)?,
    };

    if !dir.is_dir() {
        return Err(QuantError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }
    Ok(dir)
}

fn print_report(report: &BatchReport) {
    output::print_separator();

    for (name, reason) in &report.skipped {
        output::print_skip(name, reason);
    }

    if !report.results.is_empty() {
        println!("{}", report.results.render());
    }

    match (&report.exported_to, &report.abandoned_at) {
        (Some(path), _) => {
            output::print_done(&format!(
                "Done! Processed {} images ({} measured, {} skipped). Saved to: {}",
                report.total,
                report.results.len(),
                report.skipped.len(),
                path.display()
            ));
        }
        (None, Some(name)) => {
            output::print_warning(&format!(
                "Batch stopped at '{}'; {} measurement(s) were not exported",
                name,
                report.results.len()
            ));
        }
        (None, None) if report.export_error.is_some() => {
            output::print_warning(&format!(
                "{} measurement(s) shown above were not saved",
                report.results.len()
            ));
        }
        (None, None) => {
            output::print_warning(&format!("Batch ended in state {:?}", report.final_state));
        }
    }
}
