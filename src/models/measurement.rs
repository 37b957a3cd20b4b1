//! # 测量结果数据模型
//!
//! ## 依赖关系
//! - 被 `imaging/stats.rs` 生成 (`Statistics`)
//! - 被 `batch/gate.rs`, `batch/results.rs` 使用 (`MeasurementRecord`)

use serde::Serialize;
use tabled::Tabled;

/// 结果表列名
pub const RESULT_COLUMNS: [&str; 6] = ["Label", "Area", "Mean", "Min", "Max", "IntDen"];

/// ROI 内的强度统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// 面积（标定单位，µm²）
    pub area: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// 结果表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct MeasurementRecord {
    #[serde(rename = "Label")]
    #[tabled(rename = "Label")]
    pub label: String,

    #[serde(rename = "Area")]
    #[tabled(rename = "Area", display_with = "fmt_value")]
    pub area: f64,

    #[serde(rename = "Mean")]
    #[tabled(rename = "Mean", display_with = "fmt_value")]
    pub mean: f64,

    #[serde(rename = "Min")]
    #[tabled(rename = "Min", display_with = "fmt_value")]
    pub min: f64,

    #[serde(rename = "Max")]
    #[tabled(rename = "Max", display_with = "fmt_value")]
    pub max: f64,

    /// 积分密度 = 面积 × 均值
    #[serde(rename = "IntDen")]
    #[tabled(rename = "IntDen", display_with = "fmt_value")]
    pub int_den: f64,
}

impl MeasurementRecord {
    pub fn new(label: impl Into<String>, stats: Statistics) -> Self {
        MeasurementRecord {
            label: label.into(),
            area: stats.area,
            mean: stats.mean,
            min: stats.min,
            max: stats.max,
            int_den: stats.area * stats.mean,
        }
    }
}

fn fmt_value(value: &f64) -> String {
    format!("{:.3}", value)
}
