//! # 图像服务模块
//!
//! 批处理核心依赖的外部协作者接口，以及随工具提供的原生实现。
//!
//! ## 接口
//! - `ImageImporter`: 打开多通道超堆栈
//! - `ChannelSplitter`: 拆分通道
//! - `ProjectionEngine`: Z 投影
//! - `DisplayStyler`: 颜色表 / 显示范围 / 自动对比度
//! - `StatisticsEngine`: ROI 内统计
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 使用 `models/`
//! - 子模块: raw, split, projection, display, stats

pub mod display;
pub mod projection;
pub mod raw;
pub mod split;
pub mod stats;

pub use display::LutStyler;
pub use projection::ZProjection;
pub use raw::RawStackImporter;
pub use split::NativeSplitter;
pub use stats::RoiStatistics;

use crate::error::{Result, StylingError};
use crate::models::{
    ChannelStack, ColorMode, MultiChannelImage, Plane, ProjectedImage, ProjectionMethod,
    RegionOfInterest, Statistics,
};

use std::path::Path;
use std::rc::Rc;

/// 图像导入器
pub trait ImageImporter {
    fn open(&self, path: &Path) -> Result<MultiChannelImage>;
}

/// 通道拆分器；返回长度等于通道数，消耗源图像
pub trait ChannelSplitter {
    fn split(&self, image: MultiChannelImage) -> Result<Vec<ChannelStack>>;
}

/// Z 投影引擎
pub trait ProjectionEngine {
    fn project(&self, stack: &ChannelStack, method: ProjectionMethod) -> Plane;
}

/// 显示样式，仅影响显示，不修改像素
pub trait DisplayStyler {
    fn apply_color_mode(&self, image: &mut ProjectedImage, mode: ColorMode);

    fn reset_display_range(&self, image: &mut ProjectedImage)
        -> std::result::Result<(), StylingError>;

    fn auto_enhance_contrast(
        &self,
        image: &mut ProjectedImage,
        saturation: f64,
    ) -> std::result::Result<(), StylingError>;
}

/// ROI 统计引擎
pub trait StatisticsEngine {
    fn measure(&self, image: &Plane, roi: &RegionOfInterest) -> Statistics;
}

/// 协作者集合
pub struct Toolkit {
    pub importer: Box<dyn ImageImporter>,
    pub splitter: Box<dyn ChannelSplitter>,
    pub projector: Box<dyn ProjectionEngine>,
    pub styler: Box<dyn DisplayStyler>,
    pub stats: Rc<dyn StatisticsEngine>,
}

impl Toolkit {
    /// 原生实现：MCSTACK1 导入 + 内置像素算法
    pub fn native() -> Self {
        Self::with_importer(Box::new(RawStackImporter))
    }

    /// 替换导入器，其余使用原生实现
    pub fn with_importer(importer: Box<dyn ImageImporter>) -> Self {
        Toolkit {
            importer,
            splitter: Box::new(NativeSplitter),
            projector: Box::new(ZProjection),
            styler: Box::new(LutStyler),
            stats: Rc::new(RoiStatistics),
        }
    }
}
