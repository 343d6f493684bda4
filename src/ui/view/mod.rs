//! 视图层模块
//!
//! 包含主渲染入口、导航栏和两个屏幕的视图

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use super::screens::{CalculatorField, CalculatorScreen, LandingScreen};
use super::state::{App, LoadState, Screen, ScreenKind};
use components::{
    load_state_line, render_button, render_input_widget, render_select_widget, spinner,
};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 导航栏
            Constraint::Min(10),   // 当前屏幕
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_navbar(frame, app, chunks[0]);
    match &app.screen {
        Screen::Landing(screen) => render_landing(frame, screen, app.spinner_frame, chunks[1]),
        Screen::Calculator(screen) => {
            render_calculator(frame, screen, app.spinner_frame, chunks[1])
        }
    }
    render_help(frame, app, chunks[2]);
}

/// 导航栏：两个按钮，当前屏幕高亮
pub fn render_navbar(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.screen.kind();
    let mut spans = Vec::new();

    for button in app.navbar.buttons() {
        let style = if button.target == active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(
            format!(" [{}] {} ", button.hotkey, button.label),
            style,
        ));
        spans.push(Span::raw("  "));
    }

    let navbar = Paragraph::new(Line::from(spans))
        .block(Block::default().title("💱 exchange-tui").borders(Borders::ALL));
    frame.render_widget(navbar, area);
}

// ============ 兑换页 ============

fn render_landing(frame: &mut Frame, screen: &LandingScreen, spinner_frame: usize, area: Rect) {
    let block = Block::default()
        .title("Exchange page")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 状态
            Constraint::Length(3), // 基准货币
            Constraint::Min(3),    // 汇率表
        ])
        .split(inner);

    let status = load_state_line(&screen.currencies, "currencies", spinner_frame).unwrap_or_else(
        || {
            Line::from(Span::styled(
                format!("{} currencies available", screen.selector.options().len() - 1),
                Style::default().fg(Color::Green),
            ))
        },
    );
    frame.render_widget(Paragraph::new(status), chunks[0]);

    render_select_widget(frame, chunks[1], "Base currency", &screen.selector, true);
    render_rates(frame, screen, spinner_frame, chunks[2]);
}

fn render_rates(frame: &mut Frame, screen: &LandingScreen, spinner_frame: usize, area: Rect) {
    let block = Block::default().title("Exchange rates").borders(Borders::ALL);

    let rates = match &screen.rates {
        None => {
            let hint = Paragraph::new("Choose a base currency and press Enter to see its rates")
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(hint, area);
            return;
        }
        Some(LoadState::Ready(rates)) => rates,
        Some(state) => {
            let line = load_state_line(state, "rates", spinner_frame).unwrap_or_default();
            frame.render_widget(Paragraph::new(line).block(block), area);
            return;
        }
    };

    let title = match screen.updated_at {
        Some(at) => format!(
            "Exchange rates for 1 {} (updated {})",
            rates.base,
            at.format("%H:%M:%S")
        ),
        None => format!("Exchange rates for 1 {}", rates.base),
    };

    let header = Row::new(
        ["Currency", "Rate"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    );
    let rows = rates.rates.iter().map(|(code, rate)| {
        Row::new(vec![
            Cell::from(code.to_string()),
            Cell::from(rate.to_string()),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(10)])
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

// ============ 计算器页 ============

fn render_calculator(
    frame: &mut Frame,
    screen: &CalculatorScreen,
    spinner_frame: usize,
    area: Rect,
) {
    let block = Block::default()
        .title("Exchange calculator")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 加载状态
            Constraint::Length(3), // 基准货币
            Constraint::Length(3), // 目标货币
            Constraint::Length(3), // 金额
            Constraint::Length(3), // 按钮
            Constraint::Length(1), // 汇率
            Constraint::Length(1), // 结果
            Constraint::Length(1), // 换算状态
            Constraint::Min(0),
        ])
        .split(inner);

    if let Some(status) = load_state_line(&screen.currencies, "currencies", spinner_frame) {
        frame.render_widget(Paragraph::new(status), chunks[0]);
    }

    render_select_widget(
        frame,
        chunks[1],
        "Base currency",
        &screen.base,
        screen.focus == CalculatorField::Base,
    );
    render_select_widget(
        frame,
        chunks[2],
        "Target currency",
        &screen.target,
        screen.focus == CalculatorField::Target,
    );
    render_input_widget(
        frame,
        chunks[3],
        "Amount",
        &screen.amount,
        screen.focus == CalculatorField::Amount,
        Color::Yellow,
    );
    render_button(
        frame,
        chunks[4],
        "Calculate",
        screen.focus == CalculatorField::Calculate,
    );

    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Conversion rate: ", label),
            Span::styled(screen.rate_text(), value),
        ])),
        chunks[5],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Conversion result: ", label),
            Span::styled(screen.result_text(), value),
        ])),
        chunks[6],
    );

    let conversion_status = match &screen.conversion {
        Some(LoadState::Loading) => Some(Line::from(Span::styled(
            format!("{} Calculating...", spinner(spinner_frame)),
            Style::default().fg(Color::Cyan),
        ))),
        Some(LoadState::Failed(reason)) => Some(Line::from(vec![
            Span::styled(
                format!("Conversion failed: {}", reason),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [Ctrl+R] retry", Style::default().fg(Color::Gray)),
        ])),
        Some(LoadState::Ready(_)) => screen.updated_at.map(|at| {
            Line::from(Span::styled(
                format!("updated {}", at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ))
        }),
        None => None,
    };
    if let Some(status) = conversion_status {
        frame.render_widget(Paragraph::new(status), chunks[7]);
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.screen.kind() {
        ScreenKind::Landing => {
            "[F1/F2] switch screen  [j/k] base currency  [Enter] show rates  [q/Esc] quit"
        }
        ScreenKind::Calculator => {
            "[F1/F2] switch screen  [Tab] next field  [↑/↓] choose currency  [Enter] calculate  [Esc] quit"
        }
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;
    use crate::models::Currency;
    use crate::ui::actions::Action;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_landing_shows_navbar_and_loading() {
        let app = App::new();
        let text = draw(&app);

        assert!(text.contains("[F1] Exchange"));
        assert!(text.contains("[F2] Exchange calculator"));
        assert!(text.contains("Exchange page"));
        assert!(text.contains("Loading currencies..."));
        assert!(text.contains("Base currency (disabled)"));
    }

    #[test]
    fn test_calculator_shows_form_and_results() {
        let mut app = App::new();
        app.dispatch(Action::Navigate(ScreenKind::Calculator));
        let ticket = app.active_ticket();
        app.dispatch(Action::Response(ApiResponse::SupportedCurrencies {
            ticket,
            outcome: Ok(vec![Currency::new("USD", "US Dollar")]),
        }));
        app.dispatch(Action::SelectNext);

        let text = draw(&app);
        assert!(text.contains("Exchange calculator"));
        assert!(text.contains("USD  US Dollar"));
        assert!(text.contains("Select target currency"));
        assert!(text.contains("[ Calculate ]"));
        assert!(text.contains("Conversion rate:"));
        assert!(text.contains("Conversion result:"));
        assert!(!text.contains("Loading currencies"));
    }

    #[test]
    fn test_failed_currency_load_is_visible() {
        let mut app = App::new();
        app.dispatch(Action::Navigate(ScreenKind::Calculator));
        let ticket = app.active_ticket();
        app.dispatch(Action::Response(ApiResponse::SupportedCurrencies {
            ticket,
            outcome: Err(crate::api::ApiError::MissingApiKey),
        }));

        let text = draw(&app);
        assert!(text.contains("Failed to load currencies: API key is not configured"));
        assert!(text.contains("[Ctrl+R] retry"));
    }
}
