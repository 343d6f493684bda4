use std::fmt;

/// 货币代码 (如 "USD")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 支持的货币 (代码 + 名称)
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub code: CurrencyCode,
    pub name: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: CurrencyCode::new(code),
            name: name.into(),
        }
    }
}

impl From<(String, String)> for Currency {
    fn from((code, name): (String, String)) -> Self {
        Self::new(code, name)
    }
}

/// 换算请求，提交表单时由表单字段构造
///
/// 金额按原样发送，不做数字校验
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: String,
}

impl ConversionRequest {
    pub fn new(base: &str, target: &str, amount: &str) -> Self {
        Self {
            base: CurrencyCode::new(base),
            target: CurrencyCode::new(target),
            amount: amount.to_string(),
        }
    }
}

/// 换算结果
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub rate: f64,
    pub converted_amount: f64,
}

impl ConversionResult {
    /// 汇率的显示文本 (0.9 -> "0.9")
    pub fn rate_text(&self) -> String {
        self.rate.to_string()
    }

    /// 换算金额的显示文本 (9.0 -> "9")
    pub fn result_text(&self) -> String {
        self.converted_amount.to_string()
    }
}

/// 某基准货币的最新汇率表，按货币代码排序
#[derive(Debug, Clone, PartialEq)]
pub struct LatestRates {
    pub base: CurrencyCode,
    pub rates: Vec<(CurrencyCode, f64)>,
}

/// 屏幕代号
///
/// 每次构建屏幕都会分配新的代号，请求携带发起时的代号，
/// 响应仅在代号与当前屏幕一致时才会生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ScreenTicket(pub u64);

impl ScreenTicket {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ScreenTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_pair() {
        let currency = Currency::from(("USD".to_string(), "US Dollar".to_string()));
        assert_eq!(currency.code.as_str(), "USD");
        assert_eq!(currency.name, "US Dollar");
    }

    #[test]
    fn test_result_text_uses_shortest_form() {
        let result = ConversionResult {
            rate: 0.9,
            converted_amount: 9.0,
        };
        assert_eq!(result.rate_text(), "0.9");
        assert_eq!(result.result_text(), "9");
    }

    #[test]
    fn test_ticket_advances() {
        let ticket = ScreenTicket::default();
        assert_eq!(ticket.next(), ScreenTicket(1));
        assert_eq!(ticket.next().to_string(), "#1");
    }
}
