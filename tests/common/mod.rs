#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use appdb_sample::config::{AppConfig, VaultBackend};
use appdb_sample::keychain::MemoryStore;
use appdb_sample::sdk::{
    AppdbSdk, BackupPayload, DeveloperInformation, PurchaseEvent, PurchaseHandler,
    PurchaseMetadata, SdkError,
};
use appdb_sample::ui::{Alert, UiQueue};
use appdb_sample::App;
use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

pub const VENDOR: &str = "6F9619FF-8B86-D011-B42D-00C04FC964FF";

/// 스크립트 가능한 SDK 대역
#[derive(Default)]
pub struct FakeSdk {
    pub installed: bool,
    pub customer_id: Option<String>,
    pub device_id: Option<String>,
    pub update_available: Option<bool>,
    pub store_url: Option<String>,
    pub show_developer_information_error: Option<String>,
    pub fail_stage: Option<&'static str>,
    pub show_developer_information_calls: Mutex<usize>,
    pub handled_deeplinks: Mutex<Vec<String>>,
    pub backups: Mutex<std::collections::HashMap<String, BackupPayload>>,
    pub purchase_calls: Mutex<Vec<&'static str>>,
    pub handler: Mutex<Option<Arc<dyn PurchaseHandler>>>,
}

impl FakeSdk {
    pub fn installed() -> Self {
        Self {
            installed: true,
            customer_id: Some("customer-1".to_string()),
            device_id: Some("device-1".to_string()),
            ..Self::default()
        }
    }

    pub fn emit(&self, event: PurchaseEvent) {
        if let Some(handler) = self.handler.lock().unwrap().as_ref() {
            handler.on_purchase_event(event);
        }
    }

    fn stage(&self, name: &'static str) -> Result<(), SdkError> {
        self.purchase_calls.lock().unwrap().push(name);
        if self.fail_stage == Some(name) {
            return Err(SdkError::Failed(format!("{} rejected", name)));
        }
        Ok(())
    }
}

fn value(v: &Option<String>, what: &str) -> Result<String, SdkError> {
    v.clone().ok_or_else(|| SdkError::Unavailable(what.to_string()))
}

#[async_trait]
impl AppdbSdk for FakeSdk {
    fn is_installed_via_appdb(&self) -> bool {
        self.installed
    }

    fn persistent_customer_identifier(&self) -> Result<String, SdkError> {
        value(&self.customer_id, "Customer identifier")
    }

    fn persistent_device_identifier(&self) -> Result<String, SdkError> {
        value(&self.device_id, "Device identifier")
    }

    fn apple_bundle_identifier(&self) -> Result<String, SdkError> {
        Ok("com.example.sample".to_string())
    }

    fn apple_app_group_identifier(&self) -> Result<String, SdkError> {
        Err(SdkError::Unavailable("App group".to_string()))
    }

    fn appdb_app_identifier(&self) -> Result<String, SdkError> {
        Ok("42".to_string())
    }

    fn alongside_identifier(&self) -> Result<String, SdkError> {
        Ok("alongside".to_string())
    }

    fn installation_uuid(&self) -> Result<String, SdkError> {
        Ok("00000000-0000-4000-8000-000000000000".to_string())
    }

    fn supported_services_identifiers(&self) -> Result<Vec<String>, SdkError> {
        Ok(vec!["backup".to_string(), "push".to_string()])
    }

    fn appdb_store_url(&self) -> Result<String, SdkError> {
        value(&self.store_url, "Store URL")
    }

    fn developer_information(&self) -> Result<DeveloperInformation, SdkError> {
        Ok(DeveloperInformation {
            name: "Sample Dev".to_string(),
            email: Some("dev@example.com".to_string()),
            website: None,
        })
    }

    fn show_developer_information(&self) -> Result<(), SdkError> {
        *self.show_developer_information_calls.lock().unwrap() += 1;
        match &self.show_developer_information_error {
            Some(message) => Err(SdkError::Failed(message.clone())),
            None => Ok(()),
        }
    }

    fn ask_customer_to_enable_open_in(&self) -> Result<(), SdkError> {
        Ok(())
    }

    fn handle_deeplink(&self, url: &url::Url) {
        self.handled_deeplinks.lock().unwrap().push(url.to_string());
    }

    async fn assign_push_token(&self, token: &[u8]) -> Result<String, SdkError> {
        Ok(format!("{} bytes", token.len()))
    }

    async fn generate_data_assertion(&self, client_data: &[u8]) -> Result<String, SdkError> {
        if !self.installed {
            return Err(SdkError::NotInstalledViaAppdb);
        }
        Ok(format!("assertion-{}", client_data.len()))
    }

    async fn register_app_attestation(&self, challenge: &str) -> Result<(), SdkError> {
        if challenge == "qwerty" {
            Ok(())
        } else {
            Err(SdkError::Failed("bad challenge".to_string()))
        }
    }

    async fn is_app_update_available(&self) -> Result<bool, SdkError> {
        self.update_available
            .ok_or_else(|| SdkError::Failed("Update check failed".to_string()))
    }

    async fn store_backup(&self, backup_id_key: &str, value: BackupPayload) -> Result<(), SdkError> {
        self.backups
            .lock()
            .unwrap()
            .insert(backup_id_key.to_string(), value);
        Ok(())
    }

    async fn get_backup(&self, backup_id_key: &str) -> Result<BackupPayload, SdkError> {
        self.backups
            .lock()
            .unwrap()
            .get(backup_id_key)
            .cloned()
            .ok_or_else(|| SdkError::Failed("Backup not found".to_string()))
    }

    async fn purge_backup(&self, backup_id_key: &str) -> Result<(), SdkError> {
        self.backups.lock().unwrap().remove(backup_id_key);
        Ok(())
    }

    async fn fetch_purchase_metadata(&self) -> Result<PurchaseMetadata, SdkError> {
        self.stage("fetch")?;
        Ok(PurchaseMetadata {
            product_identifiers: vec!["pro".to_string(), "coins".to_string()],
        })
    }

    async fn register_purchase_handler(&self, handler: Arc<dyn PurchaseHandler>) -> Result<(), SdkError> {
        self.stage("register")?;
        *self.handler.lock().unwrap() = Some(handler);
        Ok(())
    }

    async fn initialize_purchases(&self, _metadata: &PurchaseMetadata) -> Result<(), SdkError> {
        self.stage("initialize")
    }
}

pub struct Harness {
    pub app: App,
    pub sdk: Arc<FakeSdk>,
    pub store: Arc<MemoryStore>,
    pub alerts: UnboundedReceiver<Alert>,
    pub dir: TempDir,
}

pub fn harness(sdk: FakeSdk) -> Harness {
    harness_with_vendor(sdk, Some(VENDOR))
}

pub fn harness_with_vendor(sdk: FakeSdk, vendor: Option<&str>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::new(dir.path()).unwrap();
    config.vendor_identifier = vendor.map(str::to_string);
    config.vault_backend = VaultBackend::Memory;
    config.alert_delay = Duration::ZERO;
    config.app_version = "1.0".to_string();

    let sdk = Arc::new(sdk);
    let store = Arc::new(MemoryStore::new());
    let (ui, alerts) = UiQueue::new();
    let app = App::new(config, sdk.clone(), store.clone(), ui).unwrap();

    Harness {
        app,
        sdk,
        store,
        alerts,
        dir,
    }
}
