//! # 终端按键输入
//!
//! 在独立线程中读取按键，翻译为 `UiEvent` 发往事件分发器。
//! 只有空格会触发确认。
//!
//! ## 依赖关系
//! - 被 `commands/quantify.rs` 启动
//! - 使用 `console` 读取按键和整行输入

use super::UiEvent;
use crate::error::Result;
use crate::models::RegionOfInterest;
use crate::utils::output;

use console::{Key, Term};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;

/// 按键说明
pub const KEY_HELP: &str =
    "  [SPACE] confirm  [f] freehand ROI  [r] rectangle ROI  [c] clear ROI  [v] redraw  [q] close";

/// 单个按键对应的动作
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Emit(UiEvent),
    PromptRectangle,
    PromptFreehand,
    Ignore,
}

/// 按键映射
pub fn key_action(key: &Key) -> KeyAction {
    match key {
        Key::Char(' ') => KeyAction::Emit(UiEvent::Confirm),
        Key::Char('r') | Key::Char('R') => KeyAction::PromptRectangle,
        Key::Char('f') | Key::Char('F') | Key::Char('p') | Key::Char('P') => {
            KeyAction::PromptFreehand
        }
        Key::Char('c') | Key::Char('C') => KeyAction::Emit(UiEvent::ClearRoi),
        Key::Char('v') | Key::Char('V') => KeyAction::Emit(UiEvent::Redraw),
        Key::Char('q') | Key::Char('Q') | Key::Escape => KeyAction::Emit(UiEvent::CloseWindow),
        _ => KeyAction::Ignore,
    }
}

/// 按键读取线程句柄
pub struct KeyReader {
    handle: JoinHandle<()>,
    stop: Arc<AtomicBool>,
}

impl KeyReader {
    /// 启动按键读取线程；终端关闭、分发器退出或收到停止信号时结束
    pub fn spawn(events: mpsc::UnboundedSender<UiEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let term = Term::stdout();
            read_loop(
                || term.read_key(),
                |action| resolve(&term, action),
                &events,
                &flag,
            );
        });

        KeyReader { handle, stop }
    }

    /// 停止读取并回收线程
    ///
    /// `read_key` 期间终端处于原始模式；线程仍阻塞时需要再收到一次按键，
    /// 它才会恢复终端并退出。
    pub fn finish(self) {
        self.stop.store(true, Ordering::SeqCst);
        if !self.handle.is_finished() {
            output::print_info("Press any key to close");
        }
        if self.handle.join().is_err() {
            tracing::warn!("key reader thread panicked");
        }
    }
}

/// 按键循环：读键、翻译、转发
fn read_loop<K, R>(
    mut next_key: K,
    mut resolve: R,
    events: &mpsc::UnboundedSender<UiEvent>,
    stop: &AtomicBool,
) where
    K: FnMut() -> io::Result<Key>,
    R: FnMut(KeyAction) -> Option<UiEvent>,
{
    loop {
        let key = match next_key() {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!(error = %e, "key reader stopped");
                break;
            }
        };
        if stop.load(Ordering::SeqCst) {
            break;
        }

        if let Some(event) = resolve(key_action(&key)) {
            if events.send(event).is_err() {
                break;
            }
        }
    }
}

fn resolve(term: &Term, action: KeyAction) -> Option<UiEvent> {
    match action {
        KeyAction::Emit(event) => Some(event),
        KeyAction::PromptRectangle => prompt_roi(
            term,
            "Rectangle (x y width height): ",
            RegionOfInterest::parse_rectangle,
        ),
        KeyAction::PromptFreehand => prompt_roi(
            term,
            "Freehand vertices (x,y x,y x,y ...): ",
            RegionOfInterest::parse_polygon,
        ),
        KeyAction::Ignore => None,
    }
}

fn prompt_roi(
    term: &Term,
    prompt: &str,
    parse: fn(&str) -> Result<RegionOfInterest>,
) -> Option<UiEvent> {
    term.write_str(prompt).ok()?;
    let line = term.read_line().ok()?;
    match parse(&line) {
        Ok(roi) => Some(UiEvent::DrawRoi(roi)),
        Err(e) => {
            output::print_warning(&e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_space_confirms() {
        assert_eq!(key_action(&Key::Char(' ')), KeyAction::Emit(UiEvent::Confirm));
        assert_eq!(key_action(&Key::Enter), KeyAction::Ignore);
        assert_eq!(key_action(&Key::Char('x')), KeyAction::Ignore);
        assert_eq!(key_action(&Key::Escape), KeyAction::Emit(UiEvent::CloseWindow));
        assert_eq!(key_action(&Key::Char('f')), KeyAction::PromptFreehand);
        assert_eq!(key_action(&Key::Char('r')), KeyAction::PromptRectangle);
    }

    /// 按脚本依次给出按键，脚本耗尽后报告终端关闭
    fn scripted(keys: Vec<Key>) -> impl FnMut() -> io::Result<Key> {
        let mut keys = keys.into_iter();
        move || {
            keys.next()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "closed"))
        }
    }

    fn emit_only(action: KeyAction) -> Option<UiEvent> {
        match action {
            KeyAction::Emit(event) => Some(event),
            _ => None,
        }
    }

    #[test]
    fn test_read_loop_forwards_until_terminal_closes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let stop = AtomicBool::new(false);
        let keys = vec![Key::Char('x'), Key::Char(' '), Key::Char('c')];

        read_loop(scripted(keys), emit_only, &tx, &stop);

        assert_eq!(rx.try_recv().unwrap(), UiEvent::Confirm);
        assert_eq!(rx.try_recv().unwrap(), UiEvent::ClearRoi);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_read_loop_exits_on_stop_without_forwarding() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let stop = AtomicBool::new(true);

        // 停止后收到的按键只用于唤醒线程
        read_loop(
            scripted(vec![Key::Char(' '), Key::Char(' ')]),
            emit_only,
            &tx,
            &stop,
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_read_loop_exits_when_dispatcher_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let stop = AtomicBool::new(false);
        let mut reads = 0;

        read_loop(
            || {
                reads += 1;
                Ok(Key::Char(' '))
            },
            emit_only,
            &tx,
            &stop,
        );
        assert_eq!(reads, 1);
    }

    #[test]
    fn test_finish_joins_exited_reader() {
        let stop = Arc::new(AtomicBool::new(false));
        let reader = KeyReader {
            handle: thread::spawn(|| {}),
            stop: Arc::clone(&stop),
        };
        reader.finish();
        assert!(stop.load(Ordering::SeqCst));
    }
}
