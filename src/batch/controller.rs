//! # 批处理控制器
//!
//! 逐个处理批处理条目的状态机：
//!
//! ```text
//! ENUMERATED → PROCESSING(i) → AWAITING_INPUT(i) | SKIPPED(i) → PROCESSING(i+1) → … → EXPORTING → DONE
//!                                      └── 窗口关闭 → ABANDONED(i)
//! ```
//!
//! 每个条目：导入 → 校验通道 → 投影 → 绑定交互闸门 → 等待完成信号。
//! 跳过路径在同一个驱动循环内直接进入下一个条目；成功路径在
//! `oneshot` 完成信号到达后续接。任一时刻最多只有一个闸门存活。
//!
//! ## 依赖关系
//! - 被 `commands/quantify.rs` 调用
//! - 使用 `batch/projector.rs`, `batch/gate.rs`, `batch/results.rs`
//! - 使用 `imaging::Toolkit` 中的导入器

use super::gate::{GateCompletion, InteractionGate};
use super::projector::ChannelProjector;
use super::results::ResultsAggregator;
use crate::error::{QuantError, Result};
use crate::imaging::Toolkit;
use crate::models::{BatchItem, ChannelSelection, DisplayOptions, ProjectedImage};
use crate::utils::progress;

use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};

/// 批处理配置（整批固定）
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub selection: ChannelSelection,
    pub display: DisplayOptions,
    /// 结果文件路径
    pub destination: PathBuf,
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        self.selection.validate()?;
        self.display.validate()
    }
}

/// 控制器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Enumerated,
    Processing(usize),
    AwaitingInput(usize),
    Skipped(usize),
    Exporting,
    Done,
    Abandoned(usize),
}

/// 批处理报告
#[derive(Debug)]
pub struct BatchReport {
    /// 条目总数
    pub total: usize,
    /// 已测量的结果；导出失败时仍保留在内存中
    pub results: ResultsAggregator,
    /// 跳过的条目 (文件名, 原因)
    pub skipped: Vec<(String, String)>,
    /// 导出路径；放弃或导出失败时为 None
    pub exported_to: Option<PathBuf>,
    /// 放弃时所在的条目
    pub abandoned_at: Option<String>,
    /// 结果写盘失败；停在 EXPORTING
    pub export_error: Option<QuantError>,
    pub final_state: BatchState,
}

/// 单步推进结果
enum Advance {
    Skipped,
    Awaiting(oneshot::Receiver<GateCompletion>),
    Finished,
}

/// 批处理控制器
pub struct BatchController {
    items: Vec<BatchItem>,
    position: usize,
    state: BatchState,
    config: BatchConfig,
    toolkit: Toolkit,
    results: ResultsAggregator,
    bindings: mpsc::UnboundedSender<InteractionGate>,
    skipped: Vec<(String, String)>,
    export_error: Option<QuantError>,
}

impl BatchController {
    /// 以枚举好的条目启动；无条目时返回 `EmptyBatch`
    pub fn start(
        items: Vec<BatchItem>,
        pattern: &str,
        config: BatchConfig,
        toolkit: Toolkit,
        bindings: mpsc::UnboundedSender<InteractionGate>,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(QuantError::EmptyBatch {
                pattern: pattern.to_string(),
            });
        }
        config.validate()?;

        Ok(BatchController {
            items,
            position: 0,
            state: BatchState::Enumerated,
            config,
            toolkit,
            results: ResultsAggregator::new(),
            bindings,
            skipped: Vec::new(),
            export_error: None,
        })
    }

    /// 驱动整批处理直到导出或放弃
    pub async fn run(mut self) -> BatchReport {
        loop {
            match self.advance(self.position) {
                Advance::Skipped => continue,
                Advance::Finished => return self.into_report(),
                Advance::Awaiting(pending) => match pending.await {
                    Ok(completion) => self.on_gate_complete(completion),
                    Err(_) => {
                        self.state = BatchState::Abandoned(self.position);
                        tracing::info!(
                            file = %self.items[self.position].name(),
                            "window closed without confirmation, batch stopped"
                        );
                        return self.into_report();
                    }
                },
            }
        }
    }

    /// 处理位置 `index` 的条目
    fn advance(&mut self, index: usize) -> Advance {
        if index >= self.items.len() {
            self.state = BatchState::Exporting;
            match self.results.export(&self.config.destination) {
                Ok(()) => {
                    self.state = BatchState::Done;
                    tracing::info!(
                        rows = self.results.len(),
                        path = %self.config.destination.display(),
                        "results exported"
                    );
                }
                Err(e) => {
                    tracing::error!(rows = self.results.len(), error = %e, "export failed");
                    self.export_error = Some(e);
                }
            }
            return Advance::Finished;
        }

        self.state = BatchState::Processing(index);
        let item = self.items[index].clone();

        let image = match self.prepare(&item) {
            Ok(image) => image,
            Err(e) => {
                tracing::error!(file = %item.name(), error = %e, "skipping file");
                self.skipped.push((item.name().to_string(), e.to_string()));
                self.state = BatchState::Skipped(index);
                self.position = index + 1;
                return Advance::Skipped;
            }
        };

        let (gate, pending) = InteractionGate::bind(
            image,
            item.name(),
            index + 1,
            self.toolkit.stats.clone(),
        );
        self.state = BatchState::AwaitingInput(index);

        // 宿主已退出时闸门随发送失败被丢弃，等待端会得到放弃信号
        if self.bindings.send(gate).is_err() {
            tracing::debug!(file = %item.name(), "no interaction host attached");
        }

        Advance::Awaiting(pending)
    }

    /// 导入、校验通道并投影
    fn prepare(&self, item: &BatchItem) -> Result<ProjectedImage> {
        let spinner = progress::create_spinner(&format!("Projecting {}", item.name()));

        let result = self
            .toolkit
            .importer
            .open(item.path())
            .and_then(|image| {
                tracing::info!(
                    file = %item.name(),
                    channels = image.channel_count(),
                    "opened"
                );
                // 越界时图像在此处释放
                self.config.selection.check_range(image.channel_count())?;
                ChannelProjector::new(&self.toolkit).project(
                    image,
                    &self.config.selection,
                    &self.config.display,
                )
            });

        spinner.finish_and_clear();
        result
    }

    /// 闸门完成后的唯一重入点
    fn on_gate_complete(&mut self, completion: GateCompletion) {
        debug_assert_eq!(
            self.state,
            BatchState::AwaitingInput(completion.resume_at - 1)
        );
        tracing::info!(
            file = %completion.record.label,
            area = completion.record.area,
            mean = completion.record.mean,
            "measured"
        );
        self.results.append(completion.record);
        self.position = completion.resume_at;
    }

    fn into_report(self) -> BatchReport {
        let abandoned_at = match self.state {
            BatchState::Abandoned(i) => Some(self.items[i].name().to_string()),
            _ => None,
        };
        let exported_to = match self.state {
            BatchState::Done => Some(self.config.destination.clone()),
            _ => None,
        };

        BatchReport {
            total: self.items.len(),
            results: self.results,
            skipped: self.skipped,
            exported_to,
            abandoned_at,
            export_error: self.export_error,
            final_state: self.state,
        }
    }
}
