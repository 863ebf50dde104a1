//! 명령 모듈
//!
//! UI 컨트롤 하나당 함수 하나. 알림 제목은 컨트롤 이름이며
//! SDK 오류 문구는 번역 없이 그대로 표시합니다.

pub mod attestation;
pub mod backup;
pub mod deeplink;
pub mod developer;
pub mod identity;
pub mod purchase;
pub mod push;
pub mod update;

use std::fmt::Display;

use crate::ui::Alert;

/// 성공 값 또는 에러 문구를 그대로 담은 알림
pub(crate) fn result_alert<T: Display, E: Display>(title: &str, result: Result<T, E>) -> Alert {
    match result {
        Ok(value) => Alert::new(title, value.to_string()),
        Err(error) => {
            tracing::debug!(command = title, %error, "command failed");
            Alert::new(title, error.to_string())
        }
    }
}
