//! appdb SDK 샘플 앱 백엔드 라이브러리
//!
//! 각 UI 컨트롤은 `commands`의 함수 하나를 호출하고, 그 함수는 SDK 호출 하나를 수행한 뒤
//! 결과를 알림(`ui::Alert`)으로 돌려줍니다. 재사용 가능한 핵심은 키체인 어댑터와
//! install marker 기반 보안 플래그 저장소입니다.

pub mod background;
pub mod backup;
pub mod commands;
pub mod config;
pub mod deeplink;
pub mod error;
pub mod flag_store;
pub mod keychain;
pub mod logging;
pub mod marker;
pub mod purchase;
pub mod push;
pub mod sdk;
pub mod ui;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::background::Background;
use crate::config::{AppConfig, VaultBackend};
use crate::error::AppError;
use crate::flag_store::SecuredValueStorage;
use crate::keychain::{CredentialStore, KeychainService, KeyringStore, MemoryStore};
use crate::marker::InstallMarkerProvider;
use crate::purchase::{AlertingPurchaseHandler, PurchaseSetup};
use crate::push::PushRequester;
use crate::sdk::AppdbSdk;
use crate::ui::{Alert, UiQueue};

/// 앱 상태
///
/// SDK와 저장소는 모두 생성 시 주입되며 전역 상태가 없습니다.
pub struct App {
    config: AppConfig,
    sdk: Arc<dyn AppdbSdk>,
    storage: SecuredValueStorage,
    push: PushRequester,
    purchases: PurchaseSetup,
    ui: UiQueue,
    background: Background,
}

impl App {
    /// 앱 구성
    ///
    /// tokio 런타임 밖에서 생성되면 지연 작업용 전용 런타임을 함께 만듭니다.
    pub fn new(
        config: AppConfig,
        sdk: Arc<dyn AppdbSdk>,
        store: Arc<dyn CredentialStore>,
        ui: UiQueue,
    ) -> Result<Self, AppError> {
        let background = Background::current_or_dedicated()?;
        let marker = Arc::new(InstallMarkerProvider::new(
            &config.data_dir,
            config.vendor_identifier.clone(),
        ));
        let storage = SecuredValueStorage::new(
            KeychainService::new(store),
            marker,
            config.access_group.clone(),
        );
        let push = PushRequester::new(config.push_endpoint.clone());
        let purchases = PurchaseSetup::new(
            sdk.clone(),
            Arc::new(AlertingPurchaseHandler::new(ui.clone())),
        );

        Ok(Self {
            config,
            sdk,
            storage,
            push,
            purchases,
            ui,
            background,
        })
    }

    /// 설정의 저장소 백엔드로 앱 구성
    ///
    /// 반환된 수신측은 UI 스레드가 비동기 알림을 꺼내는 곳입니다.
    pub fn from_config(
        config: AppConfig,
        sdk: Arc<dyn AppdbSdk>,
    ) -> Result<(Self, UnboundedReceiver<Alert>), AppError> {
        std::fs::create_dir_all(&config.data_dir)?;

        let store: Arc<dyn CredentialStore> = match config.vault_backend {
            VaultBackend::Keyring => Arc::new(KeyringStore::new()),
            VaultBackend::Memory => Arc::new(MemoryStore::new()),
        };
        let (ui, rx) = UiQueue::new();

        tracing::info!(
            data_dir = %config.data_dir.display(),
            backend = ?config.vault_backend,
            installed_via_appdb = sdk.is_installed_via_appdb(),
            "app configured"
        );
        Ok((Self::new(config, sdk, store, ui)?, rx))
    }

    /// `.env.local`/환경 변수에서 설정을 읽어 앱 구성
    pub fn from_env(sdk: Arc<dyn AppdbSdk>) -> Result<(Self, UnboundedReceiver<Alert>), AppError> {
        let config = AppConfig::from_env()?;
        Self::from_config(config, sdk)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sdk(&self) -> &Arc<dyn AppdbSdk> {
        &self.sdk
    }

    pub fn storage(&self) -> &SecuredValueStorage {
        &self.storage
    }

    pub fn push(&self) -> &PushRequester {
        &self.push
    }

    pub fn purchases(&self) -> &PurchaseSetup {
        &self.purchases
    }

    pub fn ui(&self) -> &UiQueue {
        &self.ui
    }

    pub fn background(&self) -> &Background {
        &self.background
    }
}
