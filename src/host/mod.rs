//! # 交互宿主
//!
//! 代替图像窗口：展示投影、接收操作员按键、驱动交互闸门。
//!
//! ## 事件流
//! ```text
//! 按键线程 --UiEvent--> EventDispatcher --on_confirm/draw_roi--> InteractionGate
//! BatchController --InteractionGate--> EventDispatcher
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/quantify.rs` 使用
//! - 使用 `batch/gate.rs`
//! - 子模块: chooser, preview, terminal

pub mod chooser;
pub mod preview;
pub mod terminal;

use crate::batch::{ConfirmOutcome, InteractionGate, NO_ROI_MESSAGE};
use crate::models::RegionOfInterest;
use crate::utils::output;

use tokio::sync::mpsc;

/// 预览默认宽度（字符）
pub const DEFAULT_PREVIEW_WIDTH: usize = 64;

/// 宿主事件
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// 确认键（空格）
    Confirm,
    DrawRoi(RegionOfInterest),
    ClearRoi,
    Redraw,
    /// 关闭窗口，放弃当前条目
    CloseWindow,
}

/// 交互统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    pub accepted: usize,
    pub rejected: usize,
    pub abandoned: bool,
}

/// 事件分发器
pub struct EventDispatcher {
    bindings: mpsc::UnboundedReceiver<InteractionGate>,
    events: mpsc::UnboundedReceiver<UiEvent>,
    preview: bool,
    preview_width: usize,
}

impl EventDispatcher {
    pub fn new(
        bindings: mpsc::UnboundedReceiver<InteractionGate>,
        events: mpsc::UnboundedReceiver<UiEvent>,
    ) -> Self {
        EventDispatcher {
            bindings,
            events,
            preview: true,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }

    pub fn with_preview(mut self, enabled: bool) -> Self {
        self.preview = enabled;
        self
    }

    pub fn with_preview_width(mut self, width: usize) -> Self {
        self.preview_width = width.max(8);
        self
    }

    /// 逐个接管闸门，直到控制器结束或窗口关闭
    pub async fn run(mut self) -> DispatchStats {
        let mut stats = DispatchStats::default();

        while let Some(mut gate) = self.bindings.recv().await {
            self.present(&gate);
            if !self.interact(&mut gate, &mut stats).await {
                output::print_warning(&format!(
                    "Window for '{}' closed without confirmation",
                    gate.label()
                ));
                gate.abandon();
                stats.abandoned = true;
                break;
            }
        }

        stats
    }

    /// 返回 false 表示窗口关闭或输入结束
    async fn interact(&mut self, gate: &mut InteractionGate, stats: &mut DispatchStats) -> bool {
        loop {
            let Some(event) = self.events.recv().await else {
                return false;
            };

            match event {
                UiEvent::Confirm => match gate.on_confirm() {
                    ConfirmOutcome::Accepted(record) => {
                        stats.accepted += 1;
                        output::print_success(&format!(
                            "{}: Area={:.3} Mean={:.3} Min={:.3} Max={:.3} IntDen={:.3}",
                            record.label,
                            record.area,
                            record.mean,
                            record.min,
                            record.max,
                            record.int_den
                        ));
                        return true;
                    }
                    ConfirmOutcome::Rejected => {
                        stats.rejected += 1;
                        output::print_warning(NO_ROI_MESSAGE);
                    }
                    ConfirmOutcome::Ignored => {}
                },
                UiEvent::DrawRoi(roi) => match gate.draw_roi(roi) {
                    Ok(()) => {
                        if let Some(roi) = gate.image().and_then(|image| image.roi()) {
                            output::print_info(&format!("ROI set: {}", roi));
                        }
                    }
                    Err(e) => output::print_warning(&e.to_string()),
                },
                UiEvent::ClearRoi => {
                    gate.clear_roi();
                    output::print_info("ROI cleared");
                }
                UiEvent::Redraw => self.present(gate),
                UiEvent::CloseWindow => return false,
            }
        }
    }

    fn present(&self, gate: &InteractionGate) {
        output::print_header(&format!("[#{}] {}", gate.resume_at(), gate.label()));

        if let Some(image) = gate.image() {
            let (lo, hi) = image.display_range();
            output::print_info(&format!(
                "{}  {}x{} px  LUT {}  display {:.1}-{:.1}",
                image.title(),
                image.plane().width(),
                image.plane().height(),
                image.color_mode(),
                lo,
                hi
            ));
            if self.preview {
                println!("{}", preview::render(image, self.preview_width));
            }
        }

        output::print_info(&format!(
            "Draw FREEHAND ROI on {} then press SPACEBAR",
            gate.label()
        ));
        println!("{}", terminal::KEY_HELP);
    }
}
