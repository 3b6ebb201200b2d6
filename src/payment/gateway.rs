use crate::api::client::map_transport_error;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{PaymentRequest, PaymentResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// Mobile-money collection endpoint.
#[async_trait]
pub trait CollectionGateway: Send + Sync {
    /// Ask the payer's operator to collect `request.amount`.
    ///
    /// A non-2xx answer is `Error::Api` carrying the plain-text body.
    async fn collect(&self, request: &PaymentRequest) -> Result<PaymentResponse>;
}

pub struct NkwaGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl NkwaGateway {
    pub fn new(api_key: &str, endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-API-Key",
            HeaderValue::from_str(api_key)
                .map_err(|e| Error::Config(format!("Invalid API key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.require_payment_key()?,
            &config.payment_endpoint,
            config.request_timeout,
        )
    }
}

#[async_trait]
impl CollectionGateway for NkwaGateway {
    async fn collect(&self, request: &PaymentRequest) -> Result<PaymentResponse> {
        tracing::debug!(endpoint = %self.endpoint, amount = request.amount, "sending collection request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
