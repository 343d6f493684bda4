//! 汇率 API 网关
//!
//! - wire.rs: 接口返回的 JSON 结构及其结果标签解析
//! - http.rs: 基于 reqwest 的 HTTP 实现
//! - tasks.rs: 请求/响应消息以及后台任务执行

pub mod http;
pub mod tasks;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ConversionRequest, ConversionResult, Currency, CurrencyCode, LatestRates};

pub use http::HttpExchangeApi;
pub use tasks::{ApiRequest, ApiResponse, RequestRunner};

/// 网关错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("unreadable response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    /// 结果标签不是 "success"
    #[error("API error: {0}")]
    Upstream(String),
}

/// 汇率服务接口
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    /// 获取支持的货币列表
    async fn supported_currencies(&self) -> Result<Vec<Currency>, ApiError>;

    /// 按基准货币、目标货币和金额换算
    async fn exchange_result(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ApiError>;

    /// 获取某基准货币的最新汇率表
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<LatestRates, ApiError>;
}
