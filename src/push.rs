//! 지연 푸시 요청
//!
//! 샘플 서버에 `customer_id`를 담은 GET 요청 하나를 보내면 잠시 뒤 푸시가 옵니다.
//! 응답 본문은 사용하지 않습니다.

use crate::sdk::{AppdbSdk, SdkError};

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct PushRequester {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl PushRequester {
    pub fn new(endpoint: url::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// 고객 식별자를 붙인 요청 URL
    pub fn request_url(&self, customer_id: &str) -> url::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("customer_id", customer_id);
        url
    }

    /// 지연 푸시 요청 전송
    ///
    /// 전송 오류만 실패로 봅니다. HTTP 상태 코드는 확인하지 않습니다.
    pub async fn send(&self, sdk: &dyn AppdbSdk) -> Result<(), PushError> {
        let customer_id = sdk.persistent_customer_identifier()?;
        let url = self.request_url(&customer_id);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::debug!(error = %e, "delayed push request failed");
            PushError::Request(e)
        })?;

        tracing::info!(status = %response.status(), "delayed push requested");
        Ok(())
    }
}
