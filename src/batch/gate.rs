//! # 交互闸门
//!
//! 绑定到一张投影图像和一个续接位置的一次性确认器。
//!
//! ## 状态
//! ```text
//! ARMED --confirm, 无 ROI--> ARMED   (拒绝，重新挂接监听)
//! ARMED --confirm, 有 ROI--> FIRED   (测量、释放图像、发送完成信号)
//! FIRED --confirm---------> FIRED   (忽略)
//! ```
//!
//! 完成信号经 `tokio::sync::oneshot` 送回批处理控制器；闸门未触发就被
//! 丢弃（窗口关闭）时，发送端随之丢弃，控制器据此识别为放弃。
//!
//! ## 依赖关系
//! - 由 `batch/controller.rs` 创建
//! - 由 `host/` 的事件分发器驱动
//! - 使用 `imaging::StatisticsEngine` 测量

use crate::error::{QuantError, Result};
use crate::imaging::StatisticsEngine;
use crate::models::{MeasurementRecord, ProjectedImage, RegionOfInterest};

use std::rc::Rc;
use tokio::sync::oneshot;

/// 无 ROI 时给操作员的状态提示
pub const NO_ROI_MESSAGE: &str = "No ROI found. Draw ROI first, then press SPACEBAR.";

/// 闸门状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Armed,
    Fired,
}

/// 一次确认信号的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// 已测量并发送完成信号
    Accepted(MeasurementRecord),
    /// 缺少 ROI，保持 ARMED
    Rejected,
    /// 已触发过，忽略
    Ignored,
}

/// 闸门完成信号
#[derive(Debug, Clone, PartialEq)]
pub struct GateCompletion {
    /// 下一个待处理条目的位置
    pub resume_at: usize,
    pub record: MeasurementRecord,
}

/// 交互闸门
pub struct InteractionGate {
    label: String,
    resume_at: usize,
    state: GateState,
    listening: bool,
    image: Option<ProjectedImage>,
    stats: Rc<dyn StatisticsEngine>,
    completion: Option<oneshot::Sender<GateCompletion>>,
}

impl InteractionGate {
    /// 绑定图像，返回闸门和完成信号接收端
    pub fn bind(
        image: ProjectedImage,
        label: impl Into<String>,
        resume_at: usize,
        stats: Rc<dyn StatisticsEngine>,
    ) -> (Self, oneshot::Receiver<GateCompletion>) {
        let (tx, rx) = oneshot::channel();
        let gate = InteractionGate {
            label: label.into(),
            resume_at,
            state: GateState::Armed,
            listening: true,
            image: Some(image),
            stats,
            completion: Some(tx),
        };
        (gate, rx)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn resume_at(&self) -> usize {
        self.resume_at
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// 确认监听是否挂接
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// 绑定的图像；触发后为 None
    pub fn image(&self) -> Option<&ProjectedImage> {
        self.image.as_ref()
    }

    /// 在绑定图像上绘制 ROI
    pub fn draw_roi(&mut self, roi: RegionOfInterest) -> Result<()> {
        match self.image.as_mut() {
            Some(image) => image.set_roi(roi),
            None => Err(QuantError::InvalidRoi(format!(
                "image '{}' is already closed",
                self.label
            ))),
        }
    }

    pub fn clear_roi(&mut self) {
        if let Some(image) = self.image.as_mut() {
            image.clear_roi();
        }
    }

    /// 处理一次确认信号
    pub fn on_confirm(&mut self) -> ConfirmOutcome {
        if self.state != GateState::Armed {
            return ConfirmOutcome::Ignored;
        }

        // 校验期间摘除监听
        self.listening = false;

        let roi = self
            .image
            .as_ref()
            .and_then(|image| image.roi())
            .cloned();
        let Some(roi) = roi else {
            self.listening = true;
            return ConfirmOutcome::Rejected;
        };
        let Some(image) = self.image.take() else {
            self.listening = true;
            return ConfirmOutcome::Rejected;
        };

        self.state = GateState::Fired;
        let stats = self.stats.measure(image.plane(), &roi);
        image.close();

        let record = MeasurementRecord::new(self.label.clone(), stats);
        if let Some(tx) = self.completion.take() {
            let completion = GateCompletion {
                resume_at: self.resume_at,
                record: record.clone(),
            };
            if tx.send(completion).is_err() {
                tracing::warn!(
                    label = %self.label,
                    "batch controller is gone, measurement dropped"
                );
            }
        }

        ConfirmOutcome::Accepted(record)
    }

    /// 窗口关闭：不测量、不推进，释放图像
    pub fn abandon(mut self) {
        self.listening = false;
        self.completion = None;
        if let Some(image) = self.image.take() {
            image.close();
        }
        tracing::debug!(label = %self.label, "interaction abandoned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RoiStatistics;
    use crate::models::Plane;

    fn gate(resume_at: usize) -> (InteractionGate, oneshot::Receiver<GateCompletion>) {
        let plane = Plane::new(4, 4, 1.0, (0..16).map(|v| v as f32).collect()).unwrap();
        let image = ProjectedImage::new("AVG_C1-a.mcs", plane);
        InteractionGate::bind(image, "a.mcs", resume_at, Rc::new(RoiStatistics))
    }

    #[test]
    fn test_reject_without_roi_rearms() {
        let (mut gate, mut rx) = gate(1);

        for _ in 0..5 {
            assert_eq!(gate.on_confirm(), ConfirmOutcome::Rejected);
            assert_eq!(gate.state(), GateState::Armed);
            assert!(gate.is_listening());
            assert!(gate.image().is_some());
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_accept_measures_once() {
        let (mut gate, mut rx) = gate(3);
        gate.draw_roi(RegionOfInterest::rectangle(0.0, 0.0, 2.0, 1.0))
            .unwrap();

        let ConfirmOutcome::Accepted(record) = gate.on_confirm() else {
            panic!("expected acceptance");
        };
        assert_eq!(record.label, "a.mcs");
        assert_eq!(record.area, 2.0);
        assert_eq!(record.mean, 0.5);
        assert_eq!(record.int_den, record.area * record.mean);

        assert_eq!(gate.state(), GateState::Fired);
        assert!(!gate.is_listening());
        assert!(gate.image().is_none());

        let completion = rx.try_recv().unwrap();
        assert_eq!(completion.resume_at, 3);
        assert_eq!(completion.record, record);
    }

    #[test]
    fn test_duplicate_confirm_is_ignored() {
        let (mut gate, _rx) = gate(1);
        gate.draw_roi(RegionOfInterest::rectangle(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert!(matches!(gate.on_confirm(), ConfirmOutcome::Accepted(_)));
        assert_eq!(gate.on_confirm(), ConfirmOutcome::Ignored);
        assert_eq!(gate.on_confirm(), ConfirmOutcome::Ignored);
        assert!(gate.draw_roi(RegionOfInterest::rectangle(0.0, 0.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_cleared_roi_rejects() {
        let (mut gate, _rx) = gate(1);
        gate.draw_roi(RegionOfInterest::rectangle(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        gate.clear_roi();
        assert_eq!(gate.on_confirm(), ConfirmOutcome::Rejected);
    }

    #[test]
    fn test_abandon_closes_channel() {
        let (gate, mut rx) = gate(1);
        gate.abandon();
        assert!(matches!(
            rx.try_recv(),
            Err(oneshot::error::TryRecvError::Closed)
        ));
    }
}
