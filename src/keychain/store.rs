//! 자격 증명 저장소 프리미티브
//!
//! 키체인은 (service, account, access group)으로 주소 지정되는 key-value 저장소이며
//! 페이로드는 불투명한 바이트열입니다. 모든 연산은 실패 시 `StoreStatus`를 돌려줍니다.

use keyring::{Entry, Error as KeyringError};
use std::collections::HashMap;
use std::sync::Mutex;

/// 저장소 연산의 비정상 상태 코드
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreStatus {
    #[error("item not found")]
    ItemNotFound,

    #[error("duplicate item")]
    DuplicateItem,

    #[error("platform failure: {0}")]
    Platform(String),
}

/// 레코드 하나를 가리키는 조회 키
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemQuery {
    pub service: String,
    pub account: String,
    pub access_group: Option<String>,
}

impl ItemQuery {
    pub fn new(service: &str, account: &str, access_group: Option<&str>) -> Self {
        Self {
            service: service.to_string(),
            account: account.to_string(),
            access_group: access_group.map(str::to_string),
        }
    }
}

/// 플랫폼 보안 저장소 추상화
///
/// `insert`는 이미 존재하는 키에 대해 `DuplicateItem`을,
/// `update`/`delete`는 없는 키에 대해 `ItemNotFound`를 돌려줘야 합니다.
pub trait CredentialStore: Send + Sync {
    /// 일치하는 레코드 정확히 하나의 페이로드
    fn find_one(&self, query: &ItemQuery) -> Result<Vec<u8>, StoreStatus>;

    fn insert(&self, query: &ItemQuery, data: &[u8]) -> Result<(), StoreStatus>;

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), StoreStatus>;

    fn delete(&self, query: &ItemQuery) -> Result<(), StoreStatus>;
}

/// OS 키체인/키링 기반 저장소 (`keyring` 크레이트)
///
/// access group은 keyring target으로 매핑됩니다.
#[derive(Debug, Default, Clone)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(query: &ItemQuery) -> Result<Entry, StoreStatus> {
        let entry = match &query.access_group {
            Some(group) => Entry::new_with_target(group, &query.service, &query.account),
            None => Entry::new(&query.service, &query.account),
        };
        entry.map_err(map_keyring_error)
    }
}

fn map_keyring_error(err: KeyringError) -> StoreStatus {
    match err {
        KeyringError::NoEntry => StoreStatus::ItemNotFound,
        err => StoreStatus::Platform(err.to_string()),
    }
}

fn utf8_payload(data: &[u8]) -> Result<&str, StoreStatus> {
    // keyring 백엔드는 문자열 페이로드만 받습니다
    std::str::from_utf8(data).map_err(|e| StoreStatus::Platform(format!("payload is not UTF-8: {}", e)))
}

impl CredentialStore for KeyringStore {
    fn find_one(&self, query: &ItemQuery) -> Result<Vec<u8>, StoreStatus> {
        let entry = Self::entry(query)?;
        match entry.get_password() {
            Ok(value) => Ok(value.into_bytes()),
            // 디코딩 판단은 어댑터 몫이므로 원본 바이트를 그대로 넘김
            Err(KeyringError::BadEncoding(bytes)) => Ok(bytes),
            Err(err) => Err(map_keyring_error(err)),
        }
    }

    fn insert(&self, query: &ItemQuery, data: &[u8]) -> Result<(), StoreStatus> {
        match self.find_one(query) {
            Ok(_) => return Err(StoreStatus::DuplicateItem),
            Err(StoreStatus::ItemNotFound) => {}
            Err(status) => return Err(status),
        }
        let entry = Self::entry(query)?;
        entry
            .set_password(utf8_payload(data)?)
            .map_err(map_keyring_error)
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), StoreStatus> {
        self.find_one(query)?;
        let entry = Self::entry(query)?;
        entry
            .set_password(utf8_payload(data)?)
            .map_err(map_keyring_error)
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), StoreStatus> {
        let entry = Self::entry(query)?;
        entry.delete_password().map_err(map_keyring_error)
    }
}

/// 프로세스 메모리 저장소
///
/// 테스트 및 `APPDB_VAULT_BACKEND=memory` 설정에서 사용합니다.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<ItemQuery, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 레코드 수
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_items<T>(
        &self,
        f: impl FnOnce(&mut HashMap<ItemQuery, Vec<u8>>) -> Result<T, StoreStatus>,
    ) -> Result<T, StoreStatus> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StoreStatus::Platform("memory store lock poisoned".to_string()))?;
        f(&mut items)
    }
}

impl CredentialStore for MemoryStore {
    fn find_one(&self, query: &ItemQuery) -> Result<Vec<u8>, StoreStatus> {
        self.with_items(|items| items.get(query).cloned().ok_or(StoreStatus::ItemNotFound))
    }

    fn insert(&self, query: &ItemQuery, data: &[u8]) -> Result<(), StoreStatus> {
        self.with_items(|items| {
            if items.contains_key(query) {
                return Err(StoreStatus::DuplicateItem);
            }
            items.insert(query.clone(), data.to_vec());
            Ok(())
        })
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), StoreStatus> {
        self.with_items(|items| match items.get_mut(query) {
            Some(existing) => {
                *existing = data.to_vec();
                Ok(())
            }
            None => Err(StoreStatus::ItemNotFound),
        })
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), StoreStatus> {
        self.with_items(|items| {
            items
                .remove(query)
                .map(|_| ())
                .ok_or(StoreStatus::ItemNotFound)
        })
    }
}
