//! Keychain 어댑터
//!
//! 문자열 값을 (service, account, access group) 키로 읽고/저장하고/삭제합니다.
//! 저장소 상태 코드는 세 가지 오류로만 매핑됩니다.
//!
//! 키별 상태 전이: `Absent → Present` (첫 save), `Present → Present` (값 교체),
//! `Present|Absent → Absent` (delete).

use std::sync::Arc;

use crate::keychain::store::{CredentialStore, ItemQuery, StoreStatus};

/// Keychain 오류
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeychainError {
    #[error("No item")]
    NotFound,

    #[error("Unexpected data")]
    UnexpectedData,

    #[error("Unhandled error")]
    UnhandledError,
}

impl From<StoreStatus> for KeychainError {
    fn from(status: StoreStatus) -> Self {
        match status {
            StoreStatus::ItemNotFound => KeychainError::NotFound,
            status => {
                tracing::debug!(%status, "keychain operation returned unexpected status");
                KeychainError::UnhandledError
            }
        }
    }
}

#[derive(Clone)]
pub struct KeychainService {
    store: Arc<dyn CredentialStore>,
}

impl KeychainService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// 일치하는 레코드를 UTF-8 문자열로 읽기
    pub fn read_item(
        &self,
        service: &str,
        account: &str,
        access_group: Option<&str>,
    ) -> Result<String, KeychainError> {
        let query = ItemQuery::new(service, account, access_group);
        let data = self.store.find_one(&query)?;
        String::from_utf8(data).map_err(|_| KeychainError::UnexpectedData)
    }

    /// 값 저장
    ///
    /// 먼저 읽어 보고 레코드가 있으면 제자리 갱신, 없으면 새로 추가합니다.
    /// 같은 키에 레코드가 둘 이상 생기지 않습니다.
    pub fn save_item(
        &self,
        value: &str,
        service: &str,
        account: &str,
        access_group: Option<&str>,
    ) -> Result<(), KeychainError> {
        let query = ItemQuery::new(service, account, access_group);

        match self.read_item(service, account, access_group) {
            Ok(_) => self.store.update(&query, value.as_bytes()).map_err(unhandled),
            Err(KeychainError::NotFound) => {
                self.store.insert(&query, value.as_bytes()).map_err(unhandled)
            }
            Err(err) => Err(err),
        }
    }

    /// 레코드 삭제 (이미 없으면 성공)
    pub fn delete_item(
        &self,
        service: &str,
        account: &str,
        access_group: Option<&str>,
    ) -> Result<(), KeychainError> {
        let query = ItemQuery::new(service, account, access_group);
        match self.store.delete(&query) {
            Ok(()) | Err(StoreStatus::ItemNotFound) => Ok(()),
            Err(status) => Err(status.into()),
        }
    }
}

// insert/update 단계에서는 어떤 비정상 상태든 UnhandledError
fn unhandled(status: StoreStatus) -> KeychainError {
    tracing::debug!(%status, "keychain write failed");
    KeychainError::UnhandledError
}
