//! # inspect 命令实现
//!
//! 打开一个或一批超堆栈，列出尺寸与通道数，便于在定量前确定通道序号。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `batch/collector.rs`, `imaging::ImageImporter`
//! - 使用 `tabled` 渲染表格

use crate::batch::FileCollector;
use crate::cli::inspect::InspectArgs;
use crate::error::{QuantError, Result};
use crate::imaging::{ImageImporter, RawStackImporter};
use crate::models::MultiChannelImage;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 表格中的一行
#[derive(Debug, Tabled)]
struct StackRow {
    #[tabled(rename = "File")]
    name: String,
    #[tabled(rename = "Width")]
    width: usize,
    #[tabled(rename = "Height")]
    height: usize,
    #[tabled(rename = "Channels")]
    channels: usize,
    #[tabled(rename = "Slices")]
    slices: usize,
    #[tabled(rename = "Pixel (µm)")]
    pixel_size: String,
}

impl From<&MultiChannelImage> for StackRow {
    fn from(image: &MultiChannelImage) -> Self {
        StackRow {
            name: image.name().to_string(),
            width: image.width(),
            height: image.height(),
            channels: image.channel_count(),
            slices: image.slice_count(),
            pixel_size: format!("{:.4}", image.pixel_size()),
        }
    }
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header("Stack Inspection");

    if !args.input.exists() {
        return Err(QuantError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let items = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;
    if items.is_empty() {
        return Err(QuantError::EmptyBatch {
            pattern: args.pattern,
        });
    }

    let importer = RawStackImporter;
    let mut rows = Vec::with_capacity(items.len());
    for item in &items {
        match importer.open(item.path()) {
            Ok(image) => rows.push(StackRow::from(&image)),
            Err(e) => output::print_skip(item.name(), &e.to_string()),
        }
    }

    if rows.is_empty() {
        output::print_warning("No readable stacks found.");
        return Ok(());
    }

    println!("{}", Table::new(&rows));
    output::print_done(&format!("Inspected {} of {} files", rows.len(), items.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_image() {
        let image = MultiChannelImage::new("s.mcs", 3, 2, 2, 4, 0.125, vec![0.0; 48]).unwrap();
        let row = StackRow::from(&image);
        assert_eq!(row.channels, 2);
        assert_eq!(row.slices, 4);
        assert_eq!(row.pixel_size, "0.1250");

        let table = Table::new([row]).to_string();
        assert!(table.contains("Channels"));
        assert!(table.contains("s.mcs"));
    }
}
