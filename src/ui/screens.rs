//! 屏幕组件
//!
//! 每个屏幕直接持有自己的下拉框、输入框和结果字段，导航时整体丢弃重建

use chrono::{DateTime, Local};

use super::state::LoadState;
use crate::api::ApiError;
use crate::models::{
    ConversionRequest, ConversionResult, Currency, CurrencyCode, LatestRates, ScreenTicket,
};

pub const BASE_PLACEHOLDER: &str = "Select base currency";
pub const TARGET_PLACEHOLDER: &str = "Select target currency";

/// 下拉选项
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// 货币下拉框
///
/// 第一个选项始终是值为空的占位项，数据到达前处于禁用状态
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySelect {
    options: Vec<SelectOption>,
    selected: usize,
    enabled: bool,
}

impl CurrencySelect {
    pub fn new(placeholder: &str) -> Self {
        Self {
            options: vec![SelectOption {
                value: String::new(),
                label: placeholder.to_string(),
            }],
            selected: 0,
            enabled: false,
        }
    }

    /// 填充货币选项并启用
    pub fn populate(&mut self, currencies: &[Currency]) {
        self.options.truncate(1);
        self.options
            .extend(currencies.iter().map(|currency| SelectOption {
                value: currency.code.as_str().to_string(),
                label: currency.name.clone(),
            }));
        self.selected = 0;
        self.enabled = true;
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> &SelectOption {
        &self.options[self.selected]
    }

    /// 当前值，占位项为空字符串
    pub fn value(&self) -> &str {
        &self.selected_option().value
    }

    pub fn select_next(&mut self) {
        if self.enabled && self.selected + 1 < self.options.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.enabled && self.selected > 0 {
            self.selected -= 1;
        }
    }
}

// ============ 兑换页 ============

/// 兑换页：基准货币下拉框 + 最新汇率表
pub struct LandingScreen {
    pub ticket: ScreenTicket,
    pub selector: CurrencySelect,
    pub currencies: LoadState,
    pub rates: Option<LoadState<LatestRates>>,
    pub rates_base: Option<CurrencyCode>,
    pub rates_submission: u64,
    pub updated_at: Option<DateTime<Local>>,
}

impl LandingScreen {
    pub fn new(ticket: ScreenTicket) -> Self {
        Self {
            ticket,
            selector: CurrencySelect::new(BASE_PLACEHOLDER),
            currencies: LoadState::Loading,
            rates: None,
            rates_base: None,
            rates_submission: 0,
            updated_at: None,
        }
    }

    pub fn apply_currencies(&mut self, outcome: Result<Vec<Currency>, ApiError>) {
        match outcome {
            Ok(currencies) => {
                self.selector.populate(&currencies);
                self.currencies = LoadState::Ready(());
            }
            Err(err) => self.currencies = LoadState::Failed(err.to_string()),
        }
    }

    /// 为当前选择的基准货币开始一次汇率请求，未选择时返回 None
    pub fn begin_rates(&mut self) -> Option<(u64, CurrencyCode)> {
        if !self.selector.is_enabled() || self.selector.value().is_empty() {
            return None;
        }

        let base = CurrencyCode::new(self.selector.value());
        Some(self.send_rates(base))
    }

    /// 重发上一次失败的汇率请求
    pub fn resend_failed_rates(&mut self) -> Option<(u64, CurrencyCode)> {
        if !self.rates.as_ref().is_some_and(|state| state.is_failed()) {
            return None;
        }
        let base = self.rates_base.clone()?;
        Some(self.send_rates(base))
    }

    fn send_rates(&mut self, base: CurrencyCode) -> (u64, CurrencyCode) {
        self.rates_submission += 1;
        self.rates = Some(LoadState::Loading);
        self.rates_base = Some(base.clone());
        (self.rates_submission, base)
    }

    pub fn apply_rates(&mut self, submission: u64, outcome: Result<LatestRates, ApiError>) -> bool {
        if submission != self.rates_submission {
            return false;
        }

        self.rates = Some(match outcome {
            Ok(rates) => {
                self.updated_at = Some(Local::now());
                LoadState::Ready(rates)
            }
            Err(err) => LoadState::Failed(err.to_string()),
        });
        true
    }
}

// ============ 计算器页 ============

/// 计算器表单焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorField {
    Base,
    Target,
    Amount,
    Calculate,
}

impl CalculatorField {
    pub fn next(self) -> Self {
        match self {
            CalculatorField::Base => CalculatorField::Target,
            CalculatorField::Target => CalculatorField::Amount,
            CalculatorField::Amount => CalculatorField::Calculate,
            CalculatorField::Calculate => CalculatorField::Base,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CalculatorField::Base => CalculatorField::Calculate,
            CalculatorField::Target => CalculatorField::Base,
            CalculatorField::Amount => CalculatorField::Target,
            CalculatorField::Calculate => CalculatorField::Amount,
        }
    }
}

/// 计算器页：换算表单和两个结果字段
///
/// `conversion` 只表示最近一次提交的状态，结果字段显示的是最后一次成功的结果
pub struct CalculatorScreen {
    pub ticket: ScreenTicket,
    pub base: CurrencySelect,
    pub target: CurrencySelect,
    pub amount: String,
    pub focus: CalculatorField,
    pub currencies: LoadState,
    pub conversion: Option<LoadState>,
    pub last_result: Option<ConversionResult>,
    pub last_request: Option<ConversionRequest>,
    pub submission: u64,
    pub updated_at: Option<DateTime<Local>>,
}

impl CalculatorScreen {
    pub fn new(ticket: ScreenTicket) -> Self {
        Self {
            ticket,
            base: CurrencySelect::new(BASE_PLACEHOLDER),
            target: CurrencySelect::new(TARGET_PLACEHOLDER),
            amount: String::new(),
            focus: CalculatorField::Base,
            currencies: LoadState::Loading,
            conversion: None,
            last_result: None,
            last_request: None,
            submission: 0,
            updated_at: None,
        }
    }

    pub fn apply_currencies(&mut self, outcome: Result<Vec<Currency>, ApiError>) {
        match outcome {
            Ok(currencies) => {
                self.base.populate(&currencies);
                self.target.populate(&currencies);
                self.currencies = LoadState::Ready(());
            }
            Err(err) => self.currencies = LoadState::Failed(err.to_string()),
        }
    }

    /// 当前获得焦点的下拉框
    pub fn focused_select(&mut self) -> Option<&mut CurrencySelect> {
        match self.focus {
            CalculatorField::Base => Some(&mut self.base),
            CalculatorField::Target => Some(&mut self.target),
            _ => None,
        }
    }

    /// 读取表单当前值
    pub fn conversion_request(&self) -> ConversionRequest {
        ConversionRequest::new(self.base.value(), self.target.value(), &self.amount)
    }

    /// 提交表单，结果字段保留到新结果到达
    pub fn begin_conversion(&mut self) -> (u64, ConversionRequest) {
        let request = self.conversion_request();
        self.send(request)
    }

    /// 重发上一次失败的请求，与表单当前值无关
    pub fn resend_failed(&mut self) -> Option<(u64, ConversionRequest)> {
        if !self.conversion.as_ref().is_some_and(|state| state.is_failed()) {
            return None;
        }
        let request = self.last_request.clone()?;
        Some(self.send(request))
    }

    fn send(&mut self, request: ConversionRequest) -> (u64, ConversionRequest) {
        self.submission += 1;
        self.conversion = Some(LoadState::Loading);
        self.last_request = Some(request.clone());
        (self.submission, request)
    }

    /// 只接受最近一次提交的结果
    pub fn apply_conversion(
        &mut self,
        submission: u64,
        outcome: Result<ConversionResult, ApiError>,
    ) -> bool {
        if submission != self.submission {
            return false;
        }

        self.conversion = Some(match outcome {
            Ok(result) => {
                self.last_result = Some(result);
                self.updated_at = Some(Local::now());
                LoadState::Ready(())
            }
            Err(err) => LoadState::Failed(err.to_string()),
        });
        true
    }

    /// "Conversion rate" 字段文本
    pub fn rate_text(&self) -> String {
        self.last_result
            .as_ref()
            .map(ConversionResult::rate_text)
            .unwrap_or_default()
    }

    /// "Conversion result" 字段文本
    pub fn result_text(&self) -> String {
        self.last_result
            .as_ref()
            .map(ConversionResult::result_text)
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.currencies == LoadState::Loading
    }
}
