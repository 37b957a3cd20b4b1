//! # Z 投影
//!
//! SUM / AVG / MAX 三种投影，逐像素沿 Z 轴归约。

use super::ProjectionEngine;
use crate::models::{ChannelStack, Plane, ProjectionMethod};

/// 原生 Z 投影
pub struct ZProjection;

impl ProjectionEngine for ZProjection {
    fn project(&self, stack: &ChannelStack, method: ProjectionMethod) -> Plane {
        let Some((first, rest)) = stack.slices().split_first() else {
            return Plane::zeros(1, 1, 1.0);
        };

        let mut out = first.clone();
        for slice in rest {
            for (a, &v) in out.pixels_mut().iter_mut().zip(slice.pixels()) {
                match method {
                    ProjectionMethod::Max => *a = a.max(v),
                    ProjectionMethod::Sum | ProjectionMethod::Average => *a += v,
                }
            }
        }

        if method == ProjectionMethod::Average {
            let n = stack.depth() as f32;
            out.pixels_mut().iter_mut().for_each(|a| *a /= n);
        }

        out
    }
}
