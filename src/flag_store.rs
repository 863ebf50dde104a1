//! Secure Flag Store
//!
//! Install Marker를 account로 사용해 "개발자 정보 안내를 이미 보여줬는지"를
//! 키체인에 boolean 문자열로 보관합니다.

use std::sync::Arc;

use crate::keychain::{KeychainError, KeychainService};
use crate::marker::InstallMarkerProvider;

/// 키체인 service 이름
pub const DEVELOPER_INFORMATION_SERVICE: &str = "developerInformationShowed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagStoreError {
    #[error("Install identifier unavailable")]
    NoIdentifier,

    #[error(transparent)]
    Keychain(#[from] KeychainError),
}

#[derive(Clone)]
pub struct SecuredValueStorage {
    keychain: KeychainService,
    marker: Arc<InstallMarkerProvider>,
    access_group: Option<String>,
}

impl SecuredValueStorage {
    pub fn new(
        keychain: KeychainService,
        marker: Arc<InstallMarkerProvider>,
        access_group: Option<String>,
    ) -> Self {
        Self {
            keychain,
            marker,
            access_group,
        }
    }

    /// 안내 표시 기록
    ///
    /// marker가 없거나 키체인 쓰기가 실패하면 로그만 남기고 넘어갑니다.
    pub async fn set_developer_information_showed(&self) {
        let account = match self.marker.get().await {
            Ok(account) => account,
            Err(e) => {
                tracing::debug!(error = %e, "install marker unavailable, flag not stored");
                return;
            }
        };

        if let Err(e) = self.keychain.save_item(
            &true.to_string(),
            DEVELOPER_INFORMATION_SERVICE,
            &account,
            self.access_group.as_deref(),
        ) {
            tracing::debug!(error = %e, "failed to store developer information flag");
        }
    }

    /// 안내를 이미 보여줬는지 조회
    pub async fn is_developer_information_showed(&self) -> Result<bool, FlagStoreError> {
        let account = self
            .marker
            .get()
            .await
            .map_err(|_| FlagStoreError::NoIdentifier)?;

        let stored = self.keychain.read_item(
            DEVELOPER_INFORMATION_SERVICE,
            &account,
            self.access_group.as_deref(),
        )?;

        stored
            .parse::<bool>()
            .map_err(|_| FlagStoreError::Keychain(KeychainError::UnexpectedData))
    }
}
