//! 인앱 구매 설정 파이프라인
//!
//! 단계: `FetchMetadata → RegisterHandler → Initialize → Ready`.
//! 단계는 순서대로 실행되며 처음 실패한 단계에서 멈춥니다. 실패 후에는 처음부터 다시 시작합니다.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::sdk::{AppdbSdk, PurchaseEvent, PurchaseHandler, PurchaseMetadata, SdkError};
use crate::ui::{Alert, UiQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseStage {
    FetchMetadata,
    RegisterHandler,
    Initialize,
    Ready,
}

impl fmt::Display for PurchaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PurchaseStage::FetchMetadata => "fetch metadata",
            PurchaseStage::RegisterHandler => "register handler",
            PurchaseStage::Initialize => "initialize",
            PurchaseStage::Ready => "ready",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Purchase setup failed at {stage}: {source}")]
pub struct PurchaseError {
    pub stage: PurchaseStage,
    #[source]
    pub source: SdkError,
}

/// 구매 이벤트를 UI 알림으로 전달
pub struct AlertingPurchaseHandler {
    ui: UiQueue,
}

impl AlertingPurchaseHandler {
    pub fn new(ui: UiQueue) -> Self {
        Self { ui }
    }
}

impl PurchaseHandler for AlertingPurchaseHandler {
    fn on_purchase_event(&self, event: PurchaseEvent) {
        let message = match &event {
            PurchaseEvent::Purchased { product_identifier } => format!("Purchased {}", product_identifier),
            PurchaseEvent::Restored { product_identifier } => format!("Restored {}", product_identifier),
            PurchaseEvent::Failed {
                product_identifier,
                reason,
            } => format!("{} failed: {}", product_identifier, reason),
        };
        tracing::info!(?event, "purchase event");
        self.ui.post(Alert::new("purchase", message));
    }
}

pub struct PurchaseSetup {
    sdk: Arc<dyn AppdbSdk>,
    handler: Arc<dyn PurchaseHandler>,
    state: Mutex<SetupState>,
}

#[derive(Debug, Default)]
struct SetupState {
    ready: bool,
    metadata: Option<PurchaseMetadata>,
}

impl PurchaseSetup {
    pub fn new(sdk: Arc<dyn AppdbSdk>, handler: Arc<dyn PurchaseHandler>) -> Self {
        Self {
            sdk,
            handler,
            state: Mutex::new(SetupState::default()),
        }
    }

    /// 파이프라인 실행 (이미 Ready면 즉시 반환)
    pub async fn run(&self) -> Result<PurchaseMetadata, PurchaseError> {
        let mut state = self.state.lock().await;
        if state.ready {
            if let Some(metadata) = &state.metadata {
                return Ok(metadata.clone());
            }
        }

        let metadata = self
            .sdk
            .fetch_purchase_metadata()
            .await
            .map_err(|e| fail(PurchaseStage::FetchMetadata, e))?;
        tracing::debug!(products = metadata.product_identifiers.len(), "purchase metadata fetched");

        self.sdk
            .register_purchase_handler(self.handler.clone())
            .await
            .map_err(|e| fail(PurchaseStage::RegisterHandler, e))?;

        self.sdk
            .initialize_purchases(&metadata)
            .await
            .map_err(|e| fail(PurchaseStage::Initialize, e))?;

        tracing::info!("purchases ready");
        state.ready = true;
        state.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    /// 현재 단계 (완료 전이면 다음에 실행될 첫 단계)
    pub async fn stage(&self) -> PurchaseStage {
        if self.state.lock().await.ready {
            PurchaseStage::Ready
        } else {
            PurchaseStage::FetchMetadata
        }
    }
}

fn fail(stage: PurchaseStage, source: SdkError) -> PurchaseError {
    tracing::debug!(%stage, error = %source, "purchase setup stage failed");
    PurchaseError { stage, source }
}
