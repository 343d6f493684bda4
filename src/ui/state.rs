//! App 状态定义 (Model)
//!
//! 包含应用状态结构体、导航栏和加载状态

use super::screens::{CalculatorScreen, LandingScreen};
use crate::api::ApiRequest;
use crate::models::ScreenTicket;

/// 应用状态
pub struct App {
    pub navbar: Navbar,
    pub screen: Screen,
    pub message: Option<String>,
    pub spinner_frame: usize,
    last_ticket: ScreenTicket,
    pending: Vec<ApiRequest>,
}

/// 屏幕类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Landing,
    Calculator,
}

/// 当前占据主区域的屏幕，导航时整体替换
pub enum Screen {
    Landing(LandingScreen),
    Calculator(CalculatorScreen),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Landing(_) => ScreenKind::Landing,
            Screen::Calculator(_) => ScreenKind::Calculator,
        }
    }

    pub fn ticket(&self) -> ScreenTicket {
        match self {
            Screen::Landing(screen) => screen.ticket,
            Screen::Calculator(screen) => screen.ticket,
        }
    }
}

/// 加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T = ()> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

/// 导航按钮
#[derive(Debug, Clone, PartialEq)]
pub struct NavButton {
    pub label: &'static str,
    pub hotkey: &'static str,
    pub target: ScreenKind,
}

/// 导航栏
#[derive(Debug, Clone, PartialEq)]
pub struct Navbar {
    buttons: [NavButton; 2],
}

impl Navbar {
    pub fn new() -> Self {
        Self {
            buttons: [
                NavButton {
                    label: "Exchange",
                    hotkey: "F1",
                    target: ScreenKind::Landing,
                },
                NavButton {
                    label: "Exchange calculator",
                    hotkey: "F2",
                    target: ScreenKind::Calculator,
                },
            ],
        }
    }

    pub fn buttons(&self) -> &[NavButton] {
        &self.buttons
    }
}

impl Default for Navbar {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// 创建新的应用实例，初始显示兑换页
    pub fn new() -> Self {
        let mut app = Self {
            navbar: Navbar::new(),
            screen: Screen::Landing(LandingScreen::new(ScreenTicket::default())),
            message: None,
            spinner_frame: 0,
            last_ticket: ScreenTicket::default(),
            pending: Vec::new(),
        };
        app.open_landing();
        app
    }

    /// 分配新的屏幕代号
    fn issue_ticket(&mut self) -> ScreenTicket {
        self.last_ticket = self.last_ticket.next();
        self.last_ticket
    }

    /// 重建兑换页并请求货币列表
    pub fn open_landing(&mut self) {
        let ticket = self.issue_ticket();
        self.screen = Screen::Landing(LandingScreen::new(ticket));
        self.message = None;
        self.queue(ApiRequest::SupportedCurrencies { ticket });
        tracing::debug!(%ticket, "opened exchange page");
    }

    /// 重建计算器页并请求货币列表
    pub fn open_calculator(&mut self) {
        let ticket = self.issue_ticket();
        self.screen = Screen::Calculator(CalculatorScreen::new(ticket));
        self.message = None;
        self.queue(ApiRequest::SupportedCurrencies { ticket });
        tracing::debug!(%ticket, "opened exchange calculator");
    }

    pub fn queue(&mut self, request: ApiRequest) {
        self.pending.push(request);
    }

    /// 取出待执行的请求
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn active_ticket(&self) -> ScreenTicket {
        self.screen.ticket()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
