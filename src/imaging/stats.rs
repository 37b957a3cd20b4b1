//! # ROI 统计
//!
//! 面积按标定单位计算（像素数 × 像素边长²），均值/最小/最大值
//! 只统计 ROI 内的有限像素。

use super::StatisticsEngine;
use crate::models::{Plane, RegionOfInterest, Statistics};

/// 原生 ROI 统计
pub struct RoiStatistics;

impl StatisticsEngine for RoiStatistics {
    fn measure(&self, image: &Plane, roi: &RegionOfInterest) -> Statistics {
        let indices = roi.pixel_indices(image.width(), image.height());
        let pixels = image.pixels();

        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &i in &indices {
            let v = pixels[i] as f64;
            if v.is_finite() {
                count += 1;
                sum += v;
                min = min.min(v);
                max = max.max(v);
            }
        }

        let area = indices.len() as f64 * image.pixel_size() * image.pixel_size();
        if count == 0 {
            return Statistics {
                area,
                mean: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        Statistics {
            area,
            mean: sum / count as f64,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_rectangle() {
        // 4x2 图像
        let plane = Plane::new(4, 2, 0.5, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        let roi = RegionOfInterest::rectangle(1.0, 0.0, 2.0, 2.0);
        let stats = RoiStatistics.measure(&plane, &roi);

        // 像素 2,3,6,7
        assert_eq!(stats.area, 4.0 * 0.25);
        assert_eq!(stats.mean, 4.5);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 7.0);
    }

    #[test]
    fn test_measure_freehand() {
        let plane = Plane::new(3, 3, 1.0, (1..=9).map(|v| v as f32).collect()).unwrap();
        // 覆盖左上三角的像素中心 (0.5,0.5), (1.5,0.5), (0.5,1.5)
        let roi = RegionOfInterest::polygon(vec![(0.0, 0.0), (2.9, 0.0), (0.0, 2.9)]);
        let stats = RoiStatistics.measure(&plane, &roi);
        assert_eq!(stats.area, 3.0);
        assert_eq!(stats.mean, (1.0 + 2.0 + 4.0) / 3.0);
    }
}
