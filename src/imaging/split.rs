//! # 通道拆分
//!
//! 将 XYCZ 超堆栈拆分为逐通道的 Z 堆栈。

use super::ChannelSplitter;
use crate::error::Result;
use crate::models::{ChannelStack, MultiChannelImage, Plane};

/// 原生通道拆分器
pub struct NativeSplitter;

impl ChannelSplitter for NativeSplitter {
    fn split(&self, image: MultiChannelImage) -> Result<Vec<ChannelStack>> {
        let (width, height) = (image.width(), image.height());
        (0..image.channel_count())
            .map(|c| {
                let slices = (0..image.slice_count())
                    .map(|z| {
                        Plane::new(
                            width,
                            height,
                            image.pixel_size(),
                            image.plane_pixels(c, z).to_vec(),
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ChannelStack::new(c + 1, slices))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_channel_order() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        // 1x1 像素, 3 通道, 2 层
        let img = MultiChannelImage::new("s", 1, 1, 3, 2, 0.5, data).unwrap();
        let stacks = NativeSplitter.split(img).unwrap();

        assert_eq!(stacks.len(), 3);
        assert_eq!(stacks[0].channel(), 1);
        assert_eq!(stacks[1].depth(), 2);
        assert_eq!(stacks[1].slices()[0].pixels(), &[2.0]);
        assert_eq!(stacks[1].slices()[1].pixels(), &[5.0]);
        assert_eq!(stacks[2].slices()[1].pixel_size(), 0.5);
    }
}
