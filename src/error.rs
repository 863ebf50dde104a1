//! 앱 에러 타입
//!
//! 모듈별 에러를 모아 두고, 명령 계층에서는 직렬화 가능한 `CommandError`로 변환합니다.

use serde::Serialize;
use thiserror::Error;

use crate::backup::BackupError;
use crate::config::ConfigError;
use crate::flag_store::FlagStoreError;
use crate::keychain::KeychainError;
use crate::marker::MarkerError;
use crate::purchase::PurchaseError;
use crate::push::PushError;
use crate::sdk::SdkError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Keychain(#[from] KeychainError),

    #[error(transparent)]
    FlagStore(#[from] FlagStoreError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error(transparent)]
    Push(#[from] PushError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}

/// 명령 응답용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::Io(_) => "IO_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Keychain(KeychainError::NotFound)
            | AppError::FlagStore(FlagStoreError::Keychain(KeychainError::NotFound)) => {
                "KEYCHAIN_NOT_FOUND"
            }
            AppError::Keychain(KeychainError::UnexpectedData)
            | AppError::FlagStore(FlagStoreError::Keychain(KeychainError::UnexpectedData)) => {
                "KEYCHAIN_UNEXPECTED_DATA"
            }
            AppError::Keychain(KeychainError::UnhandledError)
            | AppError::FlagStore(FlagStoreError::Keychain(KeychainError::UnhandledError)) => {
                "KEYCHAIN_UNHANDLED_ERROR"
            }
            AppError::FlagStore(FlagStoreError::NoIdentifier) | AppError::Marker(_) => "NO_IDENTIFIER",
            AppError::Sdk(_) => "SDK_ERROR",
            AppError::Backup(_) => "BACKUP_KEY_UNAVAILABLE",
            AppError::Push(_) => "PUSH_REQUEST_FAILED",
            AppError::Purchase(_) => "PURCHASE_SETUP_FAILED",
        };

        let details = match &error {
            AppError::Purchase(e) => Some(format!("stage: {}", e.stage)),
            _ => None,
        };

        CommandError {
            code: code.to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<SdkError> for CommandError {
    fn from(error: SdkError) -> Self {
        AppError::from(error).into()
    }
}

/// 명령 결과 타입
pub type CommandResult<T> = Result<T, CommandError>;
