//! 앱 증명(attestation) 명령

use crate::backup::generate_random_words;
use crate::ui::{Alert, AlertAction};
use crate::App;

/// 고정 challenge
pub const ATTESTATION_CHALLENGE: &str = "qwerty";

/// 무작위 단어로 assertion 생성
///
/// 성공 시 단어와 assertion을 차례로 보여주며 둘 다 클립보드 복사 동작을 가집니다.
pub async fn validate_app_attest(app: &App) -> Alert {
    const TITLE: &str = "validateAppAttest";

    let words = generate_random_words();
    match app.sdk().generate_data_assertion(words.as_bytes()).await {
        Ok(assertion) => Alert::new(TITLE, format!("(copied to clipboard) {}", words))
            .with_action(AlertAction::CopyToClipboard(words.clone()))
            .then(
                Alert::new(TITLE, format!("(copied to clipboard) {}", assertion))
                    .with_action(AlertAction::CopyToClipboard(assertion)),
            ),
        Err(e) => {
            tracing::debug!(error = %e, "data assertion failed");
            Alert::new(TITLE, e.to_string())
        }
    }
}

pub async fn app_attest(app: &App) -> Alert {
    match app.sdk().register_app_attestation(ATTESTATION_CHALLENGE).await {
        Ok(()) => Alert::new("appAttest", "valid"),
        Err(e) => Alert::new("appAttest", e.to_string()),
    }
}
