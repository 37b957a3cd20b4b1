//! # 通道选择与显示配置
//!
//! 整批处理期间固定不变的配置：目标通道、投影方法、显示颜色模式、
//! 自动对比度设置。
//!
//! ## 依赖关系
//! - 被 `cli/quantify.rs` 用作参数类型 (`ValueEnum`)
//! - 被 `batch/`, `imaging/` 读取

use crate::error::{QuantError, Result};
use clap::ValueEnum;
use std::fmt;

/// 默认饱和比例（0.01 %）
pub const DEFAULT_SATURATION: f64 = 0.0001;

/// Z 投影方法
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ProjectionMethod {
    /// Sum of slices
    Sum,
    /// Average of slices
    #[default]
    #[value(name = "avg", alias = "average")]
    Average,
    /// Maximum intensity
    Max,
}

impl fmt::Display for ProjectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionMethod::Sum => write!(f, "SUM"),
            ProjectionMethod::Average => write!(f, "AVG"),
            ProjectionMethod::Max => write!(f, "MAX"),
        }
    }
}

/// 显示颜色模式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Green lookup table
    #[default]
    #[value(alias = "green")]
    Colorized,
    /// Gray lookup table
    #[value(alias = "grays")]
    Grayscale,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Colorized => write!(f, "Green"),
            ColorMode::Grayscale => write!(f, "Grays"),
        }
    }
}

/// 通道选择
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSelection {
    /// 通道序号（从 1 开始）
    pub index: usize,
    pub method: ProjectionMethod,
    pub color_mode: ColorMode,
}

impl ChannelSelection {
    pub fn new(index: usize, method: ProjectionMethod, color_mode: ColorMode) -> Self {
        Self {
            index,
            method,
            color_mode,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.index < 1 {
            return Err(QuantError::InvalidArgument(
                "channel index must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// 通道序号是否落在 [1, channel_count]
    pub fn fits(&self, channel_count: usize) -> bool {
        self.index >= 1 && self.index <= channel_count
    }

    /// 校验通道序号，越界时返回 `ChannelRange`
    pub fn check_range(&self, channel_count: usize) -> Result<()> {
        if self.fits(channel_count) {
            Ok(())
        } else {
            Err(QuantError::ChannelRange {
                requested: self.index,
                available: channel_count,
            })
        }
    }
}

/// 自动对比度设置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayOptions {
    pub autoscale: bool,
    /// 饱和像素比例，取值 [0, 1]
    pub saturation: f64,
}

impl DisplayOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.saturation) {
            return Err(QuantError::InvalidArgument(format!(
                "contrast saturation must be within [0, 1], got {}",
                self.saturation
            )));
        }
        Ok(())
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            autoscale: true,
            saturation: DEFAULT_SATURATION,
        }
    }
}
