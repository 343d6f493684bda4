//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种处理方法

use super::actions::Action;
use super::screens::CalculatorField;
use super::state::{App, LoadState, Screen, ScreenKind};
use crate::api::{ApiRequest, ApiResponse};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::Navigate(ScreenKind::Landing) => self.open_landing(),
            Action::Navigate(ScreenKind::Calculator) => self.open_calculator(),
            Action::Retry => self.retry(),

            Action::FocusNext => self.move_focus(CalculatorField::next),
            Action::FocusPrev => self.move_focus(CalculatorField::prev),
            Action::SelectNext => self.change_selection(true),
            Action::SelectPrev => self.change_selection(false),

            Action::Input(c) => {
                if let Screen::Calculator(screen) = &mut self.screen {
                    if screen.focus == CalculatorField::Amount {
                        screen.amount.push(c);
                    }
                }
            }

            Action::DeleteChar => {
                if let Screen::Calculator(screen) = &mut self.screen {
                    if screen.focus == CalculatorField::Amount {
                        screen.amount.pop();
                    }
                }
            }

            Action::Submit => self.submit(),
            Action::Tick => self.spinner_frame = self.spinner_frame.wrapping_add(1),
            Action::Response(response) => self.apply_response(response),
        }
        false
    }

    // ============ 表单交互 ============

    fn move_focus(&mut self, step: fn(CalculatorField) -> CalculatorField) {
        if let Screen::Calculator(screen) = &mut self.screen {
            screen.focus = step(screen.focus);
        }
    }

    fn change_selection(&mut self, forward: bool) {
        let select = match &mut self.screen {
            Screen::Landing(screen) => Some(&mut screen.selector),
            Screen::Calculator(screen) => screen.focused_select(),
        };

        if let Some(select) = select {
            if forward {
                select.select_next();
            } else {
                select.select_prev();
            }
        }
    }

    /// 提交：兑换页请求汇率表，计算器页请求换算
    pub fn submit(&mut self) {
        let ticket = self.active_ticket();
        let request = match &mut self.screen {
            Screen::Landing(screen) => match screen.begin_rates() {
                Some((submission, base)) => Some(ApiRequest::LatestRates {
                    ticket,
                    submission,
                    base,
                }),
                None => {
                    self.message = Some("Select a base currency first".to_string());
                    None
                }
            },
            Screen::Calculator(screen) => {
                let (submission, request) = screen.begin_conversion();
                Some(ApiRequest::Conversion {
                    ticket,
                    submission,
                    request,
                })
            }
        };

        if let Some(request) = request {
            self.message = None;
            self.queue(request);
        }
    }

    /// 重新发起当前屏幕上失败的加载
    pub fn retry(&mut self) {
        let ticket = self.active_ticket();
        let currencies_failed = match &mut self.screen {
            Screen::Landing(screen) if screen.currencies.is_failed() => {
                screen.currencies = LoadState::Loading;
                true
            }
            Screen::Calculator(screen) if screen.currencies.is_failed() => {
                screen.currencies = LoadState::Loading;
                true
            }
            _ => false,
        };

        if currencies_failed {
            self.queue(ApiRequest::SupportedCurrencies { ticket });
            return;
        }

        let request = match &mut self.screen {
            Screen::Landing(screen) => {
                screen
                    .resend_failed_rates()
                    .map(|(submission, base)| ApiRequest::LatestRates {
                        ticket,
                        submission,
                        base,
                    })
            }
            Screen::Calculator(screen) => {
                screen
                    .resend_failed()
                    .map(|(submission, request)| ApiRequest::Conversion {
                        ticket,
                        submission,
                        request,
                    })
            }
        };

        match request {
            Some(request) => {
                self.message = None;
                self.queue(request);
            }
            None => self.message = Some("Nothing to retry".to_string()),
        }
    }

    // ============ 网关响应 ============

    /// 应用网关响应，来自已丢弃屏幕的响应直接忽略
    pub fn apply_response(&mut self, response: ApiResponse) {
        let active = self.active_ticket();
        let ticket = response.ticket();
        if ticket != active {
            tracing::debug!(%ticket, %active, "dropping response for a discarded screen");
            return;
        }

        match (response, &mut self.screen) {
            (ApiResponse::SupportedCurrencies { outcome, .. }, Screen::Landing(screen)) => {
                screen.apply_currencies(outcome)
            }
            (ApiResponse::SupportedCurrencies { outcome, .. }, Screen::Calculator(screen)) => {
                screen.apply_currencies(outcome)
            }
            (
                ApiResponse::Conversion {
                    submission,
                    outcome,
                    ..
                },
                Screen::Calculator(screen),
            ) => {
                if !screen.apply_conversion(submission, outcome) {
                    tracing::debug!(submission, "dropping superseded conversion");
                }
            }
            (
                ApiResponse::LatestRates {
                    submission,
                    outcome,
                    ..
                },
                Screen::Landing(screen),
            ) => {
                if !screen.apply_rates(submission, outcome) {
                    tracing::debug!(submission, "dropping superseded rates");
                }
            }
            (response, _) => {
                tracing::warn!(?response, "response does not belong to the active screen");
            }
        }
    }
}
