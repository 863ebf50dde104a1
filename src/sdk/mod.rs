//! appdb SDK 경계
//!
//! SDK 자체는 외부 협력자입니다. 앱은 `AppdbSdk` 트레이트 객체를
//! 생성자 주입으로 받아 사용하며 전역 싱글턴에 의존하지 않습니다.

pub mod offline;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

pub use offline::OfflineSdk;
pub use types::{BackupPayload, DeveloperInformation, PurchaseEvent, PurchaseMetadata};

/// SDK 호출 실패
///
/// 메시지는 사용자에게 그대로 표시됩니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    #[error("Application is not installed via appdb")]
    NotInstalledViaAppdb,

    #[error("{0} is unavailable")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

/// 구매 이벤트 수신자
pub trait PurchaseHandler: Send + Sync {
    fn on_purchase_event(&self, event: PurchaseEvent);
}

/// appdb SDK 통합 표면
#[async_trait]
pub trait AppdbSdk: Send + Sync {
    // 식별자 (동기)
    fn is_installed_via_appdb(&self) -> bool;
    fn persistent_customer_identifier(&self) -> Result<String, SdkError>;
    fn persistent_device_identifier(&self) -> Result<String, SdkError>;
    fn apple_bundle_identifier(&self) -> Result<String, SdkError>;
    fn apple_app_group_identifier(&self) -> Result<String, SdkError>;
    fn appdb_app_identifier(&self) -> Result<String, SdkError>;
    fn alongside_identifier(&self) -> Result<String, SdkError>;
    fn installation_uuid(&self) -> Result<String, SdkError>;
    fn supported_services_identifiers(&self) -> Result<Vec<String>, SdkError>;
    fn appdb_store_url(&self) -> Result<String, SdkError>;

    // 개발자 정보 / UI 연동
    fn developer_information(&self) -> Result<DeveloperInformation, SdkError>;
    fn show_developer_information(&self) -> Result<(), SdkError>;
    fn ask_customer_to_enable_open_in(&self) -> Result<(), SdkError>;
    fn handle_deeplink(&self, url: &url::Url);

    // 비동기 연산
    async fn assign_push_token(&self, token: &[u8]) -> Result<String, SdkError>;
    async fn generate_data_assertion(&self, client_data: &[u8]) -> Result<String, SdkError>;
    async fn register_app_attestation(&self, challenge: &str) -> Result<(), SdkError>;
    async fn is_app_update_available(&self) -> Result<bool, SdkError>;

    async fn store_backup(&self, backup_id_key: &str, value: BackupPayload) -> Result<(), SdkError>;
    async fn get_backup(&self, backup_id_key: &str) -> Result<BackupPayload, SdkError>;
    async fn purge_backup(&self, backup_id_key: &str) -> Result<(), SdkError>;

    // 구매 설정 단계
    async fn fetch_purchase_metadata(&self) -> Result<PurchaseMetadata, SdkError>;
    async fn register_purchase_handler(&self, handler: Arc<dyn PurchaseHandler>) -> Result<(), SdkError>;
    async fn initialize_purchases(&self, metadata: &PurchaseMetadata) -> Result<(), SdkError>;
}
