use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::wire::{LatestRatesResponse, PairConversionResponse, SupportedCodesResponse};
use super::{ApiError, ExchangeApi};
use crate::config::AppConfig;
use crate::models::{ConversionRequest, ConversionResult, Currency, CurrencyCode, LatestRates};

/// 基于 reqwest 的 ExchangeRate-API v6 客户端
pub struct HttpExchangeApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpExchangeApi {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// 拼接 {base_url}/{api_key}/{segments...}，每段都做 URL 编码
    fn endpoint(&self, segments: &[&str]) -> Result<String, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        let mut url = format!("{}/{}", self.base_url, urlencoding::encode(&self.api_key));
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        Ok(url)
    }

    /// 发送 GET 请求并解析响应
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode(status, &body)
    }
}

/// 按状态码和响应体解析
///
/// 出错时接口也会返回带标签的 JSON，所以先尝试解析，解析不了再看 HTTP 状态码
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    match serde_json::from_str::<T>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(ApiError::Status(status.as_u16())),
        Err(err) => Err(ApiError::Decode(err)),
    }
}

#[async_trait]
impl ExchangeApi for HttpExchangeApi {
    async fn supported_currencies(&self) -> Result<Vec<Currency>, ApiError> {
        let url = self.endpoint(&["codes"])?;
        let envelope: SupportedCodesResponse = self.get(&url).await?;
        let currencies = envelope.into_outcome()?;
        tracing::debug!(count = currencies.len(), "fetched supported currencies");
        Ok(currencies)
    }

    async fn exchange_result(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ApiError> {
        let url = self.endpoint(&[
            "pair",
            request.base.as_str(),
            request.target.as_str(),
            &request.amount,
        ])?;
        let envelope: PairConversionResponse = self.get(&url).await?;
        envelope.into_outcome()
    }

    async fn latest_rates(&self, base: &CurrencyCode) -> Result<LatestRates, ApiError> {
        let url = self.endpoint(&["latest", base.as_str()])?;
        let envelope: LatestRatesResponse = self.get(&url).await?;
        envelope.into_outcome()
    }
}
