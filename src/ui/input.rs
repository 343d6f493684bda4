//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::Action;
use super::state::{App, ScreenKind};

/// 根据当前屏幕和按键获取对应的 Action
pub fn get_action(screen: ScreenKind, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // 全局按键
    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('r') if ctrl => return Some(Action::Retry),
        KeyCode::F(1) => return Some(Action::Navigate(ScreenKind::Landing)),
        KeyCode::F(2) => return Some(Action::Navigate(ScreenKind::Calculator)),
        _ => {}
    }

    match screen {
        ScreenKind::Landing => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        },
        ScreenKind::Calculator => match key.code {
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) if !ctrl => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match get_action(app.screen.kind(), key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}
