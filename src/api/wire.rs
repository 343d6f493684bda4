//! 接口返回结构
//!
//! 每个响应都带有 `result` 标签，只有 "success" 时其余字段才有意义

use std::collections::BTreeMap;

use serde::Deserialize;

use super::ApiError;
use crate::models::{ConversionResult, Currency, CurrencyCode, LatestRates};

const SUCCESS: &str = "success";

/// 检查结果标签，失败时优先使用 error-type 作为错误信息
fn check_result(result: &str, error_type: Option<String>) -> Result<(), ApiError> {
    if result == SUCCESS {
        Ok(())
    } else {
        Err(ApiError::Upstream(
            error_type.unwrap_or_else(|| result.to_string()),
        ))
    }
}

/// GET /codes
#[derive(Debug, Deserialize)]
pub struct SupportedCodesResponse {
    pub result: String,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
    pub supported_codes: Option<Vec<(String, String)>>,
}

impl SupportedCodesResponse {
    pub fn into_outcome(self) -> Result<Vec<Currency>, ApiError> {
        check_result(&self.result, self.error_type)?;
        let codes = self
            .supported_codes
            .ok_or(ApiError::MissingField("supported_codes"))?;
        Ok(codes.into_iter().map(Currency::from).collect())
    }
}

/// GET /pair/{base}/{target}/{amount}
#[derive(Debug, Deserialize)]
pub struct PairConversionResponse {
    pub result: String,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
    pub conversion_rate: Option<f64>,
    pub conversion_result: Option<f64>,
}

impl PairConversionResponse {
    pub fn into_outcome(self) -> Result<ConversionResult, ApiError> {
        check_result(&self.result, self.error_type)?;
        Ok(ConversionResult {
            rate: self
                .conversion_rate
                .ok_or(ApiError::MissingField("conversion_rate"))?,
            converted_amount: self
                .conversion_result
                .ok_or(ApiError::MissingField("conversion_result"))?,
        })
    }
}

/// GET /latest/{base}
#[derive(Debug, Deserialize)]
pub struct LatestRatesResponse {
    pub result: String,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
    pub base_code: Option<String>,
    pub conversion_rates: Option<BTreeMap<String, f64>>,
}

impl LatestRatesResponse {
    pub fn into_outcome(self) -> Result<LatestRates, ApiError> {
        check_result(&self.result, self.error_type)?;
        let base = self.base_code.ok_or(ApiError::MissingField("base_code"))?;
        let rates = self
            .conversion_rates
            .ok_or(ApiError::MissingField("conversion_rates"))?;
        Ok(LatestRates {
            base: CurrencyCode::new(base),
            rates: rates
                .into_iter()
                .map(|(code, rate)| (CurrencyCode::new(code), rate))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_codes_success_keeps_order() {
        let body = r#"{
            "result": "success",
            "supported_codes": [["USD", "US Dollar"], ["EUR", "Euro"], ["AED", "UAE Dirham"]]
        }"#;
        let response: SupportedCodesResponse = serde_json::from_str(body).unwrap();
        let currencies = response.into_outcome().unwrap();

        let codes: Vec<&str> = currencies.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "EUR", "AED"]);
        assert_eq!(currencies[0].name, "US Dollar");
    }

    #[test]
    fn test_error_tag_uses_error_type() {
        let body = r#"{"result": "error", "error-type": "invalid-key"}"#;
        let response: SupportedCodesResponse = serde_json::from_str(body).unwrap();

        match response.into_outcome() {
            Err(ApiError::Upstream(kind)) => assert_eq!(kind, "invalid-key"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_error_tag_without_error_type() {
        let body = r#"{"result": "quota-reached"}"#;
        let response: PairConversionResponse = serde_json::from_str(body).unwrap();

        match response.into_outcome() {
            Err(ApiError::Upstream(kind)) => assert_eq!(kind, "quota-reached"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_pair_conversion_success() {
        let body = r#"{
            "result": "success",
            "base_code": "USD",
            "target_code": "EUR",
            "conversion_rate": 0.9,
            "conversion_result": 9
        }"#;
        let response: PairConversionResponse = serde_json::from_str(body).unwrap();
        let result = response.into_outcome().unwrap();

        assert_eq!(result.rate_text(), "0.9");
        assert_eq!(result.result_text(), "9");
    }

    #[test]
    fn test_success_with_missing_payload() {
        let body = r#"{"result": "success", "conversion_rate": 0.9}"#;
        let response: PairConversionResponse = serde_json::from_str(body).unwrap();

        assert!(matches!(
            response.into_outcome(),
            Err(ApiError::MissingField("conversion_result"))
        ));
    }

    #[test]
    fn test_latest_rates_sorted_by_code() {
        let body = r#"{
            "result": "success",
            "base_code": "USD",
            "conversion_rates": {"USD": 1, "EUR": 0.9, "AUD": 1.5}
        }"#;
        let response: LatestRatesResponse = serde_json::from_str(body).unwrap();
        let rates = response.into_outcome().unwrap();

        assert_eq!(rates.base.as_str(), "USD");
        let codes: Vec<&str> = rates.rates.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["AUD", "EUR", "USD"]);
    }
}
