//! # 通道投影
//!
//! 从已打开的多通道图像中取出目标通道，做 Z 投影并套用显示样式。
//!
//! 源超堆栈和其余通道在投影前释放，只有返回的投影图像保持存活。
//! 样式调整失败只记录警告。
//!
//! ## 依赖关系
//! - 被 `batch/controller.rs` 调用
//! - 使用 `imaging/` 中的拆分、投影、样式接口

use crate::error::{QuantError, Result};
use crate::imaging::{ChannelSplitter, DisplayStyler, ProjectionEngine, Toolkit};
use crate::models::{ChannelSelection, DisplayOptions, MultiChannelImage, ProjectedImage};

/// 通道投影器
pub struct ChannelProjector<'a> {
    splitter: &'a dyn ChannelSplitter,
    engine: &'a dyn ProjectionEngine,
    styler: &'a dyn DisplayStyler,
}

impl<'a> ChannelProjector<'a> {
    pub fn new(toolkit: &'a Toolkit) -> Self {
        ChannelProjector {
            splitter: toolkit.splitter.as_ref(),
            engine: toolkit.projector.as_ref(),
            styler: toolkit.styler.as_ref(),
        }
    }

    /// 投影选定通道
    pub fn project(
        &self,
        image: MultiChannelImage,
        selection: &ChannelSelection,
        display: &DisplayOptions,
    ) -> Result<ProjectedImage> {
        let available = image.channel_count();
        selection.check_range(available)?;

        let title = format!(
            "{}_C{}-{}",
            selection.method,
            selection.index,
            image.name()
        );

        // 拆分后只保留目标通道，其余通道随迭代器一起释放
        let stack = self
            .splitter
            .split(image)?
            .into_iter()
            .nth(selection.index - 1);
        let Some(stack) = stack else {
            return Err(QuantError::ChannelRange {
                requested: selection.index,
                available,
            });
        };

        tracing::debug!(
            channel = stack.channel(),
            slices = stack.depth(),
            method = %selection.method,
            "projecting"
        );
        let plane = self.engine.project(&stack, selection.method);
        drop(stack);

        let mut projected = ProjectedImage::new(title, plane);
        self.styler
            .apply_color_mode(&mut projected, selection.color_mode);

        if display.autoscale {
            if let Err(e) = self.styler.reset_display_range(&mut projected) {
                tracing::warn!(image = %projected.title(), error = %e, "display styling skipped");
            }
            if let Err(e) = self
                .styler
                .auto_enhance_contrast(&mut projected, display.saturation)
            {
                tracing::warn!(image = %projected.title(), error = %e, "display styling skipped");
            }
        }

        Ok(projected)
    }
}
