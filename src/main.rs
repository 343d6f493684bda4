mod api;
mod config;
mod models;
mod ui;

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::api::{ApiResponse, ExchangeApi, HttpExchangeApi, RequestRunner};
use crate::ui::{Action, App, render};

/// 初始化文件日志，终端处于备用屏幕时不能输出到 stdout
fn init_tracing(log_path: &Path) -> io::Result<WorkerGuard> {
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log_file has no file name"))?;

    fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // 加载配置 (~/.config/exchange-tui/config.toml)
    let config = config::load()?;
    let _guard = init_tracing(&config.log_path()?)?;

    if config.api_key.is_empty() {
        tracing::warn!(
            env = config::API_KEY_ENV,
            "no API key configured, requests will fail"
        );
    }

    let api: Arc<dyn ExchangeApi> =
        Arc::new(HttpExchangeApi::new(&config).map_err(io::Error::other)?);
    let (tx, rx) = mpsc::unbounded_channel();
    let runner = RequestRunner::new(api, tx);

    // 创建应用状态
    let mut app = App::new();

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, &runner, rx).await;

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "event loop terminated");
    }
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runner: &RequestRunner,
    mut responses: mpsc::UnboundedReceiver<ApiResponse>,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut ticker = time::interval(Duration::from_millis(120));

    loop {
        runner.spawn_all(app.take_requests());
        terminal.draw(|f| render(f, app))?;

        let quit = tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    ui::handle_key_event(app, key)
                }
                Some(Ok(_)) => false,
                Some(Err(err)) => return Err(err),
                None => true,
            },
            Some(response) = responses.recv() => app.dispatch(Action::Response(response)),
            _ = ticker.tick() => app.dispatch(Action::Tick),
        };

        if quit {
            break;
        }
    }
    Ok(())
}
