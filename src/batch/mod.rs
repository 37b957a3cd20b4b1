//! # 批处理模块
//!
//! 操作员把关的批处理核心。
//!
//! ## 功能
//! - 枚举输入目录中的匹配文件
//! - 逐个投影目标通道并等待操作员确认 ROI
//! - 汇总测量结果并导出 CSV
//!
//! ## 依赖关系
//! - 被 `commands/quantify.rs` 使用
//! - 使用 `imaging/` 协作者接口
//! - 使用 `tokio` 的 oneshot / mpsc 通道挂起与续接

pub mod collector;
pub mod controller;
pub mod gate;
pub mod projector;
pub mod results;

pub use collector::FileCollector;
pub use controller::{BatchConfig, BatchController, BatchReport, BatchState};
pub use gate::{ConfirmOutcome, GateCompletion, GateState, InteractionGate, NO_ROI_MESSAGE};
pub use projector::ChannelProjector;
pub use results::ResultsAggregator;
