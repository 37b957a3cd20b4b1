//! # 显示样式
//!
//! 颜色表与显示范围调整。只改变显示范围，不改写像素值，
//! 因此失败不影响测量结果。

use super::DisplayStyler;
use crate::error::StylingError;
use crate::models::{ColorMode, ProjectedImage};

/// 颜色表 + 显示范围样式器
pub struct LutStyler;

impl DisplayStyler for LutStyler {
    fn apply_color_mode(&self, image: &mut ProjectedImage, mode: ColorMode) {
        image.set_color_mode(mode);
    }

    fn reset_display_range(&self, image: &mut ProjectedImage) -> Result<(), StylingError> {
        let (lo, hi) = image
            .plane()
            .finite_range()
            .ok_or_else(|| StylingError::DisplayRange("image has no finite pixels".to_string()))?;
        image.set_display_range(lo, hi);
        Ok(())
    }

    fn auto_enhance_contrast(
        &self,
        image: &mut ProjectedImage,
        saturation: f64,
    ) -> Result<(), StylingError> {
        if !(0.0..=1.0).contains(&saturation) {
            return Err(StylingError::Contrast(format!(
                "saturation {} outside [0, 1]",
                saturation
            )));
        }

        let mut values: Vec<f32> = image
            .plane()
            .pixels()
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            return Err(StylingError::Contrast(
                "image has no finite pixels".to_string(),
            ));
        }
        values.sort_by(f32::total_cmp);

        // 两端各饱和 saturation / 2
        let last = (values.len() - 1) as f64;
        let tail = saturation / 2.0;
        let lo_idx = (tail * last).round() as usize;
        let hi_idx = ((1.0 - tail) * last).round() as usize;
        let (lo, hi) = (values[lo_idx], values[hi_idx.min(values.len() - 1)]);

        if lo < hi {
            image.set_display_range(lo, hi);
        } else {
            image.set_display_range(values[0], values[values.len() - 1]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plane;

    fn ramp(n: usize) -> ProjectedImage {
        let data = (0..n).map(|v| v as f32).collect();
        ProjectedImage::new("ramp", Plane::new(n, 1, 1.0, data).unwrap())
    }

    #[test]
    fn test_contrast_clips_tails() {
        let mut image = ramp(101);
        LutStyler.auto_enhance_contrast(&mut image, 0.1).unwrap();
        assert_eq!(image.display_range(), (5.0, 95.0));
        // 像素值不变
        assert_eq!(image.plane().pixels()[0], 0.0);
    }

    #[test]
    fn test_zero_saturation_is_full_range() {
        let mut image = ramp(11);
        LutStyler.auto_enhance_contrast(&mut image, 0.0).unwrap();
        assert_eq!(image.display_range(), (0.0, 10.0));
    }

    #[test]
    fn test_reset_fails_without_finite_pixels() {
        let plane = Plane::new(2, 1, 1.0, vec![f32::NAN, f32::INFINITY]).unwrap();
        let mut image = ProjectedImage::new("nan", plane);
        assert!(LutStyler.reset_display_range(&mut image).is_err());
        assert!(LutStyler.auto_enhance_contrast(&mut image, 0.01).is_err());
    }

    #[test]
    fn test_color_mode() {
        let mut image = ramp(3);
        LutStyler.apply_color_mode(&mut image, ColorMode::Colorized);
        assert_eq!(image.color_mode(), ColorMode::Colorized);
    }
}
