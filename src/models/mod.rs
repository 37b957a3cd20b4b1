//! # 数据模型模块
//!
//! 定义图像、ROI、通道选择和测量结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `imaging/`, `batch/`, `host/` 和 `commands/` 使用
//! - 子模块: image, item, measurement, roi, selection

pub mod image;
pub mod item;
pub mod measurement;
pub mod roi;
pub mod selection;

pub use image::{ChannelStack, MultiChannelImage, Plane, ProjectedImage};
pub use item::BatchItem;
pub use measurement::{MeasurementRecord, Statistics, RESULT_COLUMNS};
pub use roi::RegionOfInterest;
pub use selection::{ChannelSelection, ColorMode, DisplayOptions, ProjectionMethod};
