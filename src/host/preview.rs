//! # 终端预览
//!
//! 将投影图像按显示范围映射为字符灰阶。彩色模式下以绿色输出，
//! ROI 覆盖的单元格以黄色 `o` 标出。

use crate::models::{ColorMode, ProjectedImage};
use colored::Colorize;

/// 由暗到亮的字符阶
const RAMP: &[u8] = b" .:-=+*#%@";

/// 渲染预览
pub fn render(image: &ProjectedImage, max_width: usize) -> String {
    let plane = image.plane();
    let (width, height) = (plane.width(), plane.height());

    let cols = width.min(max_width.max(1));
    let scale_x = width as f64 / cols as f64;
    // 终端字符约为 1:2 的宽高比
    let scale_y = scale_x * 2.0;
    let rows = ((height as f64 / scale_y).ceil() as usize).max(1);

    let (lo, hi) = image.display_range();
    let span = (hi - lo) as f64;
    let roi = image.roi();

    let mut out = String::new();
    for row in 0..rows {
        for col in 0..cols {
            let x = (((col as f64 + 0.5) * scale_x) as usize).min(width - 1);
            let y = (((row as f64 + 0.5) * scale_y) as usize).min(height - 1);

            if roi.is_some_and(|r| r.contains(x as f64 + 0.5, y as f64 + 0.5)) {
                out.push_str(&"o".yellow().bold().to_string());
                continue;
            }

            let glyph = glyph_for(plane.get(x, y), lo as f64, span);
            match image.color_mode() {
                ColorMode::Colorized => out.push_str(&glyph.to_string().green().to_string()),
                ColorMode::Grayscale => out.push(glyph),
            }
        }
        out.push('\n');
    }

    out.push_str(
        &format!("1 char = {:.1} x {:.1} px, origin top-left", scale_x, scale_y)
            .dimmed()
            .to_string(),
    );
    out
}

fn glyph_for(value: f32, lo: f64, span: f64) -> char {
    let v = value as f64;
    if !v.is_finite() {
        return ' ';
    }
    let t = if span > 0.0 {
        ((v - lo) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let idx = (t * (RAMP.len() - 1) as f64).round() as usize;
    RAMP[idx] as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plane, RegionOfInterest};

    #[test]
    fn test_glyph_saturates_outside_range() {
        assert_eq!(glyph_for(-5.0, 0.0, 10.0), ' ');
        assert_eq!(glyph_for(50.0, 0.0, 10.0), '@');
        assert_eq!(glyph_for(f32::NAN, 0.0, 10.0), ' ');
    }

    #[test]
    fn test_render_dimensions() {
        colored::control::set_override(false);
        let plane = Plane::new(8, 8, 1.0, (0..64).map(|v| v as f32).collect()).unwrap();
        let mut image = ProjectedImage::new("p", plane);
        image.set_color_mode(ColorMode::Grayscale);

        let text = render(&image, 4);
        let lines: Vec<_> = text.lines().collect();
        // 4 列, 8 / (2 * 2) = 2 行, 外加比例说明
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), 4);

        image
            .set_roi(RegionOfInterest::rectangle(0.0, 0.0, 8.0, 8.0))
            .unwrap();
        assert!(render(&image, 4).lines().next().unwrap().contains('o'));
    }
}
