//! Keychain 모듈
//!
//! 플랫폼 보안 자격 증명 저장소(Keychain/Keyring)를 (service, account, access group)
//! 키로 접근합니다.
//!
//! - `store`: 저수준 저장소 프리미티브 (find one / insert / update / delete)
//! - `service`: 상태 코드를 `KeychainError`로 매핑하는 읽기/저장/삭제 어댑터

pub mod service;
pub mod store;

pub use service::{KeychainError, KeychainService};
pub use store::{CredentialStore, ItemQuery, KeyringStore, MemoryStore, StoreStatus};
