//! # 图像数据模型
//!
//! 定义多通道超堆栈、单通道 Z 堆栈、二维平面和投影图像。
//!
//! ## 存储约定
//! - `Plane`: 行优先，索引 `y * width + x`
//! - `MultiChannelImage`: XYCZ 顺序，索引 `((z * channels + c) * height + y) * width + x`
//!
//! ## 依赖关系
//! - 被 `imaging/` 和 `batch/` 使用
//! - 使用 `models/roi.rs`, `models/selection.rs`

use crate::error::{QuantError, Result};
use crate::models::roi::RegionOfInterest;
use crate::models::selection::ColorMode;

/// 二维像素平面
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    /// 像素边长 (µm)
    pixel_size: f64,
    data: Vec<f32>,
}

impl Plane {
    /// 创建平面，校验尺寸与数据长度
    pub fn new(width: usize, height: usize, pixel_size: f64, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(QuantError::InvalidFormat(format!(
                "plane has zero size ({}x{})",
                width, height
            )));
        }
        if data.len() != width * height {
            return Err(QuantError::InvalidFormat(format!(
                "plane {}x{} expects {} samples, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixel_size,
            data,
        })
    }

    /// 全零平面，尺寸至少 1x1
    pub fn zeros(width: usize, height: usize, pixel_size: f64) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            pixel_size,
            data: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn pixels(&self) -> &[f32] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// 有限像素值的 (min, max)，全部为 NaN/Inf 时返回 None
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// 单通道 Z 堆栈
#[derive(Debug, Clone)]
pub struct ChannelStack {
    /// 通道序号（从 1 开始）
    channel: usize,
    slices: Vec<Plane>,
}

impl ChannelStack {
    pub fn new(channel: usize, slices: Vec<Plane>) -> Self {
        Self { channel, slices }
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    pub fn slices(&self) -> &[Plane] {
        &self.slices
    }

    pub fn depth(&self) -> usize {
        self.slices.len()
    }
}

/// 多通道超堆栈（导入器输出）
#[derive(Debug, Clone)]
pub struct MultiChannelImage {
    name: String,
    width: usize,
    height: usize,
    channels: usize,
    slices: usize,
    pixel_size: f64,
    data: Vec<f32>,
}

impl MultiChannelImage {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        channels: usize,
        slices: usize,
        pixel_size: f64,
        data: Vec<f32>,
    ) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 || slices == 0 {
            return Err(QuantError::InvalidFormat(format!(
                "hyperstack has zero-sized axis ({}x{}, {} channels, {} slices)",
                width, height, channels, slices
            )));
        }
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return Err(QuantError::InvalidFormat(format!(
                "pixel size must be positive, got {}",
                pixel_size
            )));
        }
        let expected = width * height * channels * slices;
        if data.len() != expected {
            return Err(QuantError::InvalidFormat(format!(
                "hyperstack expects {} samples, got {}",
                expected,
                data.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            channels,
            slices,
            pixel_size,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channel_count(&self) -> usize {
        self.channels
    }

    pub fn slice_count(&self) -> usize {
        self.slices
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// 取一个平面的像素（channel 从 0 开始）
    pub fn plane_pixels(&self, channel: usize, z: usize) -> &[f32] {
        let len = self.width * self.height;
        let start = (z * self.channels + channel) * len;
        &self.data[start..start + len]
    }
}

/// 投影后的二维图像，附带显示样式与可选 ROI
#[derive(Debug)]
pub struct ProjectedImage {
    title: String,
    plane: Plane,
    color_mode: ColorMode,
    display_range: (f32, f32),
    roi: Option<RegionOfInterest>,
}

impl ProjectedImage {
    pub fn new(title: impl Into<String>, plane: Plane) -> Self {
        let display_range = plane.finite_range().unwrap_or((0.0, 0.0));
        Self {
            title: title.into(),
            plane,
            color_mode: ColorMode::Grayscale,
            display_range,
            roi: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    pub fn display_range(&self) -> (f32, f32) {
        self.display_range
    }

    pub fn set_display_range(&mut self, low: f32, high: f32) {
        self.display_range = (low, high);
    }

    pub fn roi(&self) -> Option<&RegionOfInterest> {
        self.roi.as_ref()
    }

    /// 附加 ROI；不覆盖任何像素的 ROI 被拒绝，原 ROI 保持不变
    pub fn set_roi(&mut self, roi: RegionOfInterest) -> Result<()> {
        if roi.pixel_count(self.plane.width(), self.plane.height()) == 0 {
            return Err(QuantError::InvalidRoi(format!(
                "{} does not cover any pixel of the {}x{} image",
                roi,
                self.plane.width(),
                self.plane.height()
            )));
        }
        self.roi = Some(roi);
        Ok(())
    }

    pub fn clear_roi(&mut self) {
        self.roi = None;
    }

    /// 关闭图像并释放像素数据
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for ProjectedImage {
    fn drop(&mut self) {
        tracing::trace!(title = %self.title, "projected image released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_rejects_bad_length() {
        assert!(Plane::new(2, 2, 1.0, vec![0.0; 3]).is_err());
        assert!(Plane::new(0, 2, 1.0, vec![]).is_err());
        assert!(Plane::new(2, 2, 1.0, vec![0.0; 4]).is_ok());
    }

    #[test]
    fn test_finite_range_skips_nan() {
        let plane = Plane::new(2, 2, 1.0, vec![f32::NAN, 3.0, -1.0, 2.0]).unwrap();
        assert_eq!(plane.finite_range(), Some((-1.0, 3.0)));

        let empty = Plane::new(1, 1, 1.0, vec![f32::NAN]).unwrap();
        assert_eq!(empty.finite_range(), None);
    }

    #[test]
    fn test_hyperstack_plane_layout() {
        // 2x1 像素, 2 通道, 2 层: XYCZ
        let data = vec![
            1.0, 2.0, // z0 c0
            3.0, 4.0, // z0 c1
            5.0, 6.0, // z1 c0
            7.0, 8.0, // z1 c1
        ];
        let img = MultiChannelImage::new("s", 2, 1, 2, 2, 1.0, data).unwrap();
        assert_eq!(img.plane_pixels(1, 0), &[3.0, 4.0]);
        assert_eq!(img.plane_pixels(0, 1), &[5.0, 6.0]);
    }

    #[test]
    fn test_set_roi_outside_image_keeps_previous() {
        let plane = Plane::new(4, 4, 1.0, vec![1.0; 16]).unwrap();
        let mut image = ProjectedImage::new("t", plane);

        image
            .set_roi(RegionOfInterest::rectangle(0.0, 0.0, 2.0, 2.0))
            .unwrap();
        let outside = RegionOfInterest::rectangle(10.0, 10.0, 2.0, 2.0);
        assert!(image.set_roi(outside).is_err());
        assert_eq!(
            image.roi(),
            Some(&RegionOfInterest::rectangle(0.0, 0.0, 2.0, 2.0))
        );
    }
}
