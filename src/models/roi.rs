//! # 感兴趣区域 (ROI)
//!
//! 操作员绘制的几何区域。手绘 (freehand) ROI 以多边形顶点表示。
//!
//! 像素归属按像素中心 `(x + 0.5, y + 0.5)` 判定。
//!
//! ## 依赖关系
//! - 被 `models/image.rs`, `imaging/stats.rs`, `host/` 使用
//! - 无外部模块依赖

use crate::error::{QuantError, Result};
use std::fmt;

/// ROI 几何形状
#[derive(Debug, Clone, PartialEq)]
pub enum RegionOfInterest {
    /// 矩形 (左上角 x, y, 宽, 高)
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// 多边形（手绘轮廓）
    Polygon { vertices: Vec<(f64, f64)> },
}

impl RegionOfInterest {
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        RegionOfInterest::Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    pub fn polygon(vertices: Vec<(f64, f64)>) -> Self {
        RegionOfInterest::Polygon { vertices }
    }

    /// 解析 "x y width height"
    pub fn parse_rectangle(input: &str) -> Result<Self> {
        let values = parse_numbers(input.split_whitespace())?;
        if values.len() != 4 {
            return Err(QuantError::InvalidRoi(format!(
                "rectangle needs 'x y width height', got '{}'",
                input.trim()
            )));
        }
        let roi = Self::rectangle(values[0], values[1], values[2], values[3]);
        if roi.is_degenerate() {
            return Err(QuantError::InvalidRoi(format!(
                "rectangle has no area: '{}'",
                input.trim()
            )));
        }
        Ok(roi)
    }

    /// 解析 "x,y x,y x,y ..."
    pub fn parse_polygon(input: &str) -> Result<Self> {
        let mut vertices = Vec::new();
        for token in input.split_whitespace() {
            let coords = parse_numbers(token.split(','))?;
            if coords.len() != 2 {
                return Err(QuantError::InvalidRoi(format!(
                    "vertex must be 'x,y', got '{}'",
                    token
                )));
            }
            vertices.push((coords[0], coords[1]));
        }
        let roi = Self::polygon(vertices);
        if roi.is_degenerate() {
            return Err(QuantError::InvalidRoi(format!(
                "polygon needs at least 3 non-collinear vertices: '{}'",
                input.trim()
            )));
        }
        Ok(roi)
    }

    /// 面积为零的几何
    pub fn is_degenerate(&self) -> bool {
        match self {
            RegionOfInterest::Rectangle { width, height, .. } => {
                !(*width > 0.0 && *height > 0.0)
            }
            RegionOfInterest::Polygon { vertices } => {
                vertices.len() < 3 || self.geometric_area() == 0.0
            }
        }
    }

    /// 几何面积（像素²，鞋带公式）
    pub fn geometric_area(&self) -> f64 {
        match self {
            RegionOfInterest::Rectangle { width, height, .. } => width * height,
            RegionOfInterest::Polygon { vertices } => {
                let n = vertices.len();
                if n < 3 {
                    return 0.0;
                }
                let mut sum = 0.0;
                for i in 0..n {
                    let (x1, y1) = vertices[i];
                    let (x2, y2) = vertices[(i + 1) % n];
                    sum += x1 * y2 - x2 * y1;
                }
                sum.abs() / 2.0
            }
        }
    }

    /// 点是否位于区域内（多边形用奇偶规则）
    pub fn contains(&self, px: f64, py: f64) -> bool {
        match self {
            RegionOfInterest::Rectangle {
                x,
                y,
                width,
                height,
            } => px >= *x && px < x + width && py >= *y && py < y + height,
            RegionOfInterest::Polygon { vertices } => {
                let n = vertices.len();
                if n < 3 {
                    return false;
                }
                let mut inside = false;
                let mut j = n - 1;
                for i in 0..n {
                    let (xi, yi) = vertices[i];
                    let (xj, yj) = vertices[j];
                    if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                        inside = !inside;
                    }
                    j = i;
                }
                inside
            }
        }
    }

    /// 外接矩形 (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            RegionOfInterest::Rectangle {
                x,
                y,
                width,
                height,
            } => (*x, *y, x + width, y + height),
            RegionOfInterest::Polygon { vertices } => vertices.iter().fold(
                (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            ),
        }
    }

    /// 落在 width x height 图像内的像素线性索引
    pub fn pixel_indices(&self, width: usize, height: usize) -> Vec<usize> {
        let (min_x, min_y, max_x, max_y) = self.bounds();
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return Vec::new();
        }

        let x_start = min_x.floor().max(0.0) as usize;
        let y_start = min_y.floor().max(0.0) as usize;
        let x_end = (max_x.ceil().max(0.0) as usize).min(width);
        let y_end = (max_y.ceil().max(0.0) as usize).min(height);

        let mut indices = Vec::new();
        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.contains(x as f64 + 0.5, y as f64 + 0.5) {
                    indices.push(y * width + x);
                }
            }
        }
        indices
    }

    pub fn pixel_count(&self, width: usize, height: usize) -> usize {
        self.pixel_indices(width, height).len()
    }
}

impl fmt::Display for RegionOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionOfInterest::Rectangle {
                x,
                y,
                width,
                height,
            } => write!(f, "rectangle({}, {}, {}x{})", x, y, width, height),
            RegionOfInterest::Polygon { vertices } => {
                write!(f, "freehand({} vertices)", vertices.len())
            }
        }
    }
}

fn parse_numbers<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Vec<f64>> {
    tokens
        .map(|t| {
            let t = t.trim();
            t.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| QuantError::InvalidRoi(format!("'{}' is not a number", t)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_pixel_count() {
        let roi = RegionOfInterest::rectangle(1.0, 1.0, 2.0, 3.0);
        assert_eq!(roi.pixel_count(10, 10), 6);
        // 部分越界时裁剪
        let clipped = RegionOfInterest::rectangle(8.0, 8.0, 5.0, 5.0);
        assert_eq!(clipped.pixel_count(10, 10), 4);
    }

    #[test]
    fn test_polygon_contains() {
        let tri = RegionOfInterest::polygon(vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(tri.contains(1.0, 1.0));
        assert!(!tri.contains(9.0, 9.0));
        assert_eq!(tri.geometric_area(), 50.0);
    }

    #[test]
    fn test_parse_rectangle() {
        let roi = RegionOfInterest::parse_rectangle(" 2 3 4 5 ").unwrap();
        assert_eq!(roi, RegionOfInterest::rectangle(2.0, 3.0, 4.0, 5.0));
        assert!(RegionOfInterest::parse_rectangle("2 3 4").is_err());
        assert!(RegionOfInterest::parse_rectangle("2 3 0 5").is_err());
        assert!(RegionOfInterest::parse_rectangle("a b c d").is_err());
    }

    #[test]
    fn test_parse_polygon() {
        let roi = RegionOfInterest::parse_polygon("0,0 4,0 4,4 0,4").unwrap();
        assert_eq!(roi.pixel_count(8, 8), 16);
        assert!(RegionOfInterest::parse_polygon("0,0 1,1").is_err());
        assert!(RegionOfInterest::parse_polygon("0,0 1,1 2,2").is_err());
        assert!(RegionOfInterest::parse_polygon("0,0 1 2,2").is_err());
    }
}
