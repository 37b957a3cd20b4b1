//! # 结果汇总
//!
//! 按完成顺序追加测量结果，批处理结束时导出为 CSV。
//! 只追加，不去重，不重排。
//!
//! ## 依赖关系
//! - 被 `batch/controller.rs` 写入
//! - 使用 `csv` 导出，`tabled` 渲染终端表格

use crate::error::{QuantError, Result};
use crate::models::{MeasurementRecord, RESULT_COLUMNS};

use std::path::Path;
use tabled::Table;

/// 结果表
#[derive(Debug, Default)]
pub struct ResultsAggregator {
    records: Vec<MeasurementRecord>,
}

impl ResultsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一行
    pub fn append(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 导出为 CSV（表头 + 每条记录一行）
    pub fn export(&self, output_path: &Path) -> Result<()> {
        let export_err = |e: csv::Error| QuantError::ExportError {
            path: output_path.display().to_string(),
            source: e,
        };

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(output_path)
            .map_err(export_err)?;

        wtr.write_record(RESULT_COLUMNS).map_err(export_err)?;
        for record in &self.records {
            wtr.serialize(record).map_err(export_err)?;
        }
        wtr.flush().map_err(|e| export_err(e.into()))?;

        Ok(())
    }

    /// 渲染终端表格
    pub fn render(&self) -> String {
        Table::new(self.records()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Statistics;
    use std::fs;

    fn record(label: &str, mean: f64) -> MeasurementRecord {
        MeasurementRecord::new(
            label,
            Statistics {
                area: 2.0,
                mean,
                min: 0.0,
                max: 10.0,
            },
        )
    }

    #[test]
    fn test_export_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Quantification_Results.csv");

        let mut results = ResultsAggregator::new();
        results.append(record("b.mcs", 1.5));
        results.append(record("a.mcs", 3.0));
        results.append(record("a.mcs", 3.0));
        results.export(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Label,Area,Mean,Min,Max,IntDen");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("b.mcs,"));
        assert!(lines[1].ends_with(",3.0"));
        assert!(lines[2].starts_with("a.mcs,"));
    }

    #[test]
    fn test_export_empty_table_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        ResultsAggregator::new().export(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap().trim_end(),
            "Label,Area,Mean,Min,Max,IntDen"
        );
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        let err = ResultsAggregator::new().export(&path).unwrap_err();
        assert!(matches!(err, QuantError::ExportError { .. }));
    }

    #[test]
    fn test_render_contains_labels() {
        let mut results = ResultsAggregator::new();
        results.append(record("cell_01.mcs", 2.0));
        assert!(!results.is_empty());
        assert_eq!(results.records()[0].label, "cell_01.mcs");
        let table = results.render();
        assert!(table.contains("IntDen"));
        assert!(table.contains("cell_01.mcs"));
    }
}
