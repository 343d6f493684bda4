//! 请求/响应消息与后台执行
//!
//! UI 线程只把请求放入队列，由 RequestRunner 在 tokio 任务中执行，
//! 结果通过 channel 回到主循环

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{ApiError, ExchangeApi};
use crate::models::{
    ConversionRequest, ConversionResult, Currency, CurrencyCode, LatestRates, ScreenTicket,
};

/// 待执行的请求
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    SupportedCurrencies {
        ticket: ScreenTicket,
    },
    Conversion {
        ticket: ScreenTicket,
        submission: u64,
        request: ConversionRequest,
    },
    LatestRates {
        ticket: ScreenTicket,
        submission: u64,
        base: CurrencyCode,
    },
}

/// 请求结果
#[derive(Debug)]
pub enum ApiResponse {
    SupportedCurrencies {
        ticket: ScreenTicket,
        outcome: Result<Vec<Currency>, ApiError>,
    },
    Conversion {
        ticket: ScreenTicket,
        submission: u64,
        outcome: Result<ConversionResult, ApiError>,
    },
    LatestRates {
        ticket: ScreenTicket,
        submission: u64,
        outcome: Result<LatestRates, ApiError>,
    },
}

impl ApiResponse {
    /// 发起该请求的屏幕代号
    pub fn ticket(&self) -> ScreenTicket {
        match self {
            ApiResponse::SupportedCurrencies { ticket, .. }
            | ApiResponse::Conversion { ticket, .. }
            | ApiResponse::LatestRates { ticket, .. } => *ticket,
        }
    }
}

/// 执行单个请求
pub async fn execute(api: &dyn ExchangeApi, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::SupportedCurrencies { ticket } => {
            let outcome = api.supported_currencies().await;
            if let Err(err) = &outcome {
                tracing::error!(%ticket, error = %err, "failed to load supported currencies");
            }
            ApiResponse::SupportedCurrencies { ticket, outcome }
        }
        ApiRequest::Conversion {
            ticket,
            submission,
            request,
        } => {
            let outcome = api.exchange_result(&request).await;
            if let Err(err) = &outcome {
                tracing::error!(
                    %ticket,
                    base = %request.base,
                    target = %request.target,
                    error = %err,
                    "conversion failed"
                );
            }
            ApiResponse::Conversion {
                ticket,
                submission,
                outcome,
            }
        }
        ApiRequest::LatestRates {
            ticket,
            submission,
            base,
        } => {
            let outcome = api.latest_rates(&base).await;
            if let Err(err) = &outcome {
                tracing::error!(%ticket, %base, error = %err, "failed to load latest rates");
            }
            ApiResponse::LatestRates {
                ticket,
                submission,
                outcome,
            }
        }
    }
}

/// 在后台任务中执行请求，并把结果送回主循环
pub struct RequestRunner {
    api: Arc<dyn ExchangeApi>,
    tx: mpsc::UnboundedSender<ApiResponse>,
}

impl RequestRunner {
    pub fn new(api: Arc<dyn ExchangeApi>, tx: mpsc::UnboundedSender<ApiResponse>) -> Self {
        Self { api, tx }
    }

    pub fn spawn(&self, request: ApiRequest) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let response = execute(api.as_ref(), request).await;
            if tx.send(response).is_err() {
                tracing::debug!("event loop has exited, dropping response");
            }
        })
    }

    pub fn spawn_all(&self, requests: Vec<ApiRequest>) {
        for request in requests {
            self.spawn(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockExchangeApi {
        conversions: Mutex<Vec<ConversionRequest>>,
        fail: bool,
    }

    impl MockExchangeApi {
        fn new(fail: bool) -> Self {
            Self {
                conversions: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl ExchangeApi for MockExchangeApi {
        async fn supported_currencies(&self) -> Result<Vec<Currency>, ApiError> {
            if self.fail {
                return Err(ApiError::Upstream("invalid-key".to_string()));
            }
            Ok(vec![
                Currency::new("USD", "US Dollar"),
                Currency::new("EUR", "Euro"),
            ])
        }

        async fn exchange_result(
            &self,
            request: &ConversionRequest,
        ) -> Result<ConversionResult, ApiError> {
            self.conversions.lock().unwrap().push(request.clone());
            Ok(ConversionResult {
                rate: 0.9,
                converted_amount: 9.0,
            })
        }

        async fn latest_rates(&self, base: &CurrencyCode) -> Result<LatestRates, ApiError> {
            Ok(LatestRates {
                base: base.clone(),
                rates: vec![(CurrencyCode::new("EUR"), 0.9)],
            })
        }
    }

    #[tokio::test]
    async fn test_execute_keeps_ticket() {
        let api = MockExchangeApi::new(false);
        let response = execute(
            &api,
            ApiRequest::SupportedCurrencies {
                ticket: ScreenTicket(7),
            },
        )
        .await;

        assert_eq!(response.ticket(), ScreenTicket(7));
        match response {
            ApiResponse::SupportedCurrencies { outcome, .. } => {
                assert_eq!(outcome.unwrap().len(), 2)
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_reports_failure_as_value() {
        let api = MockExchangeApi::new(true);
        let response = execute(
            &api,
            ApiRequest::SupportedCurrencies {
                ticket: ScreenTicket(1),
            },
        )
        .await;

        match response {
            ApiResponse::SupportedCurrencies { outcome, .. } => assert!(outcome.is_err()),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_runner_sends_conversion_back() {
        let api = Arc::new(MockExchangeApi::new(false));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = RequestRunner::new(api.clone(), tx);

        let request = ConversionRequest::new("USD", "EUR", "10");
        runner
            .spawn(ApiRequest::Conversion {
                ticket: ScreenTicket(3),
                submission: 1,
                request: request.clone(),
            })
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            ApiResponse::Conversion {
                ticket,
                submission,
                outcome,
            } => {
                assert_eq!(ticket, ScreenTicket(3));
                assert_eq!(submission, 1);
                assert_eq!(outcome.unwrap().result_text(), "9");
            }
            other => panic!("unexpected response: {:?}", other),
        }
        assert_eq!(*api.conversions.lock().unwrap(), vec![request]);
    }
}
