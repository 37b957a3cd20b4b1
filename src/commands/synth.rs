//! # synth 命令实现
//!
//! 生成确定性的合成多通道堆栈，用于演练定量流程。
//!
//! ## 图像内容
//! 每个通道为平坦背景加一个高斯亮斑；亮斑位置随文件序号移动，
//! 亮度随通道序号和 Z 层变化，保证 SUM/AVG/MAX 投影结果各不相同。
//!
//! ## 依赖关系
//! - 使用 `cli/synth.rs` 定义的参数
//! - 使用 `imaging/raw.rs` 写出
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::synth::SynthArgs;
use crate::error::{QuantError, Result};
use crate::imaging::raw;
use crate::models::MultiChannelImage;
use crate::utils::{output, progress};

use std::fs;

const BACKGROUND: f32 = 100.0;

/// 执行 synth 命令
pub fn execute(args: SynthArgs) -> Result<()> {
    output::print_header("Synthetic Stacks");

    if args.count == 0 {
        return Err(QuantError::InvalidArgument(
            "--count must be at least 1".to_string(),
        ));
    }

    fs::create_dir_all(&args.output).map_err(|e| QuantError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let pb = progress::create_progress_bar(args.count as u64, "Writing stacks");
    let mut written = 0;

    for index in 0..args.count {
        let name = format!("synthetic_{:03}.mcs", index + 1);
        let path = args.output.join(&name);

        if path.exists() && !args.overwrite {
            pb.suspend(|| output::print_skip(&name, "already exists"));
            pb.inc(1);
            continue;
        }

        let image = synthesize(&name, index, &args)?;
        raw::write_stack(&path, &image)?;
        tracing::debug!(file = %name, "synthetic stack written");
        written += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    output::print_done(&format!(
        "Wrote {} stacks ({}x{}, {} channels, {} slices) to '{}'",
        written,
        args.width,
        args.height,
        args.channels,
        args.slices,
        args.output.display()
    ));
    Ok(())
}

/// 生成第 `index` 个堆栈
fn synthesize(name: &str, index: usize, args: &SynthArgs) -> Result<MultiChannelImage> {
    let (w, h) = (args.width, args.height);
    let sigma = (w.min(h) as f32 / 8.0).max(1.0);

    // 亮斑中心沿对角线移动
    let shift = (index % 5) as f32 / 10.0;
    let cx = w as f32 * (0.3 + shift);
    let cy = h as f32 * (0.3 + shift);

    let mut data = Vec::with_capacity(w * h * args.channels * args.slices);
    for z in 0..args.slices {
        let mid = (args.slices as f32 - 1.0) / 2.0;
        let focus = 1.0 / (1.0 + (z as f32 - mid).abs());
        for c in 0..args.channels {
            let peak = 1000.0 * (c + 1) as f32 * focus;
            for y in 0..h {
                for x in 0..w {
                    let dx = x as f32 + 0.5 - cx;
                    let dy = y as f32 + 0.5 - cy;
                    let r2 = (dx * dx + dy * dy) / (2.0 * sigma * sigma);
                    data.push(BACKGROUND + peak * (-r2).exp());
                }
            }
        }
    }

    MultiChannelImage::new(name, w, h, args.channels, args.slices, args.pixel_size, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{ImageImporter, RawStackImporter};
    use std::path::PathBuf;

    fn args(output: PathBuf) -> SynthArgs {
        SynthArgs {
            output,
            count: 2,
            channels: 2,
            slices: 3,
            width: 16,
            height: 12,
            pixel_size: 0.5,
            overwrite: false,
        }
    }

    #[test]
    fn test_synthesize_shape_and_content() {
        let args = args(PathBuf::from("unused"));
        let image = synthesize("a.mcs", 0, &args).unwrap();
        assert_eq!(image.channel_count(), 2);
        assert_eq!(image.slice_count(), 3);
        assert_eq!(image.samples().len(), 16 * 12 * 2 * 3);

        // 通道 2 的峰值高于通道 1
        let peak = |c: usize| {
            image
                .plane_pixels(c, 1)
                .iter()
                .copied()
                .fold(f32::MIN, f32::max)
        };
        assert!(peak(1) > peak(0));
        assert!(image.samples().iter().all(|v| *v >= BACKGROUND));
    }

    #[test]
    fn test_execute_writes_readable_stacks() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("stacks");
        execute(args(out.clone())).unwrap();

        let image = RawStackImporter
            .open(&out.join("synthetic_002.mcs"))
            .unwrap();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 12);
        assert_eq!(image.pixel_size(), 0.5);
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path().to_path_buf());
        a.count = 0;
        assert!(matches!(execute(a), Err(QuantError::InvalidArgument(_))));
    }
}
