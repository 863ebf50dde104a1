//! appdb를 통해 설치되지 않은 빌드용 SDK 구현
//!
//! 식별자 조회와 비동기 연산은 모두 `NotInstalledViaAppdb`로 실패합니다.

use async_trait::async_trait;
use std::sync::Arc;

use super::{
    AppdbSdk, BackupPayload, DeveloperInformation, PurchaseHandler, PurchaseMetadata, SdkError,
};

#[derive(Debug, Default, Clone)]
pub struct OfflineSdk;

impl OfflineSdk {
    pub fn new() -> Self {
        Self
    }
}

fn not_installed<T>() -> Result<T, SdkError> {
    Err(SdkError::NotInstalledViaAppdb)
}

#[async_trait]
impl AppdbSdk for OfflineSdk {
    fn is_installed_via_appdb(&self) -> bool {
        false
    }

    fn persistent_customer_identifier(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn persistent_device_identifier(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn apple_bundle_identifier(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn apple_app_group_identifier(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn appdb_app_identifier(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn alongside_identifier(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn installation_uuid(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn supported_services_identifiers(&self) -> Result<Vec<String>, SdkError> {
        not_installed()
    }

    fn appdb_store_url(&self) -> Result<String, SdkError> {
        not_installed()
    }

    fn developer_information(&self) -> Result<DeveloperInformation, SdkError> {
        not_installed()
    }

    fn show_developer_information(&self) -> Result<(), SdkError> {
        not_installed()
    }

    fn ask_customer_to_enable_open_in(&self) -> Result<(), SdkError> {
        not_installed()
    }

    fn handle_deeplink(&self, url: &url::Url) {
        tracing::debug!(%url, "offline SDK ignores deeplink");
    }

    async fn assign_push_token(&self, _token: &[u8]) -> Result<String, SdkError> {
        not_installed()
    }

    async fn generate_data_assertion(&self, _client_data: &[u8]) -> Result<String, SdkError> {
        not_installed()
    }

    async fn register_app_attestation(&self, _challenge: &str) -> Result<(), SdkError> {
        not_installed()
    }

    async fn is_app_update_available(&self) -> Result<bool, SdkError> {
        not_installed()
    }

    async fn store_backup(&self, _backup_id_key: &str, _value: BackupPayload) -> Result<(), SdkError> {
        not_installed()
    }

    async fn get_backup(&self, _backup_id_key: &str) -> Result<BackupPayload, SdkError> {
        not_installed()
    }

    async fn purge_backup(&self, _backup_id_key: &str) -> Result<(), SdkError> {
        not_installed()
    }

    async fn fetch_purchase_metadata(&self) -> Result<PurchaseMetadata, SdkError> {
        not_installed()
    }

    async fn register_purchase_handler(&self, _handler: Arc<dyn PurchaseHandler>) -> Result<(), SdkError> {
        not_installed()
    }

    async fn initialize_purchases(&self, _metadata: &PurchaseMetadata) -> Result<(), SdkError> {
        not_installed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_sdk_reports_not_installed() {
        let sdk = OfflineSdk::new();
        assert!(!sdk.is_installed_via_appdb());
        assert_eq!(sdk.persistent_customer_identifier(), Err(SdkError::NotInstalledViaAppdb));
        assert_eq!(sdk.is_app_update_available().await, Err(SdkError::NotInstalledViaAppdb));
        assert_eq!(
            sdk.register_app_attestation("qwerty").await,
            Err(SdkError::NotInstalledViaAppdb)
        );
    }
}
