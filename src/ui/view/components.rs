//! 通用 UI 组件
//!
//! 输入框、下拉框、按钮和加载状态行

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::screens::CurrencySelect;
use crate::ui::state::LoadState;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// 加载动画的当前帧
pub fn spinner(frame_index: usize) -> &'static str {
    SPINNER_FRAMES[frame_index % SPINNER_FRAMES.len()]
}

fn field_style(is_focused: bool, active_color: Color) -> Style {
    if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    active_color: Color,
) {
    let input = Paragraph::new(value)
        .style(field_style(is_focused, active_color))
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 货币下拉框，禁用时灰显
pub fn render_select_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    select: &CurrencySelect,
    is_focused: bool,
) {
    let option = select.selected_option();
    let text = if option.value.is_empty() {
        option.label.clone()
    } else {
        format!("{}  {}", option.value, option.label)
    };

    let (content, style, title) = if select.is_enabled() {
        (
            format!(
                "◀ {} ▶  ({}/{})",
                text,
                select.selected_index(),
                select.options().len() - 1
            ),
            field_style(is_focused, Color::Yellow),
            title.to_string(),
        )
    } else {
        (
            text,
            Style::default().fg(Color::DarkGray),
            format!("{} (disabled)", title),
        )
    };

    let widget = Paragraph::new(content)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

/// [组件] 按钮
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, is_focused: bool) {
    let style = if is_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let button = Paragraph::new(format!("[ {} ]", label))
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

/// 加载中/失败时的状态行，成功后不显示
pub fn load_state_line<T>(
    state: &LoadState<T>,
    subject: &str,
    spinner_frame: usize,
) -> Option<Line<'static>> {
    match state {
        LoadState::Loading => Some(Line::from(Span::styled(
            format!("{} Loading {}...", spinner(spinner_frame), subject),
            Style::default().fg(Color::Cyan),
        ))),
        LoadState::Failed(reason) => Some(Line::from(vec![
            Span::styled(
                format!("Failed to load {}: {}", subject, reason),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [Ctrl+R] retry", Style::default().fg(Color::Gray)),
        ])),
        LoadState::Ready(_) => None,
    }
}
