//! 백업 키와 샘플 페이로드
//!
//! 백업 키는 `"<salt>+<customerId>+<deviceId>+<appVersion>"`의 SHA-256 소문자 hex입니다.
//! 같은 고객/기기/버전이면 재설치 후에도 같은 키가 나오므로 복원이 가능합니다.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use sha2::{Digest, Sha256};

use crate::sdk::{AppdbSdk, BackupPayload, SdkError};

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

static LOREM_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| LOREM_IPSUM.split(' ').collect());

/// 무작위 단어 수
pub const RANDOM_WORD_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackupError {
    /// 고객 또는 기기 식별자를 얻지 못함
    #[error("Hash unavailiable")]
    HashUnavailable(#[source] SdkError),
}

/// 식별자 조합의 SHA-256 hex
pub fn backup_key(salt: &str, customer_id: &str, device_id: &str, app_version: &str) -> String {
    let value = format!("{}+{}+{}+{}", salt, customer_id, device_id, app_version);
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// SDK 식별자로 백업 키 생성
pub fn generate_backup_key(
    sdk: &dyn AppdbSdk,
    salt: &str,
    app_version: &str,
) -> Result<String, BackupError> {
    let customer_id = sdk
        .persistent_customer_identifier()
        .map_err(BackupError::HashUnavailable)?;
    let device_id = sdk
        .persistent_device_identifier()
        .map_err(BackupError::HashUnavailable)?;
    Ok(backup_key(salt, &customer_id, &device_id, app_version))
}

/// lorem ipsum에서 무작위로 고른 단어 열
pub fn generate_random_words() -> String {
    let mut rng = rand::thread_rng();
    (0..RANDOM_WORD_COUNT)
        .filter_map(|_| LOREM_WORDS.choose(&mut rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 샘플 백업 값: `{random_string, backup_date}`
pub fn sample_payload(now: DateTime<Local>) -> BackupPayload {
    let mut payload = BackupPayload::new();
    payload.insert(
        "random_string".to_string(),
        serde_json::Value::String(generate_random_words()),
    );
    payload.insert(
        "backup_date".to_string(),
        serde_json::Value::String(now.format("%b %-d, %Y at %-I:%M:%S %p").to_string()),
    );
    payload
}
