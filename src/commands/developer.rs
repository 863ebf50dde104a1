//! 개발자 정보 명령과 1회성 안내

use crate::commands::result_alert;
use crate::error::CommandResult;
use crate::flag_store::FlagStoreError;
use crate::keychain::KeychainError;
use crate::ui::Alert;
use crate::App;

const SHOW_TITLE: &str = "showDeveloperInformation";

pub fn get_developer_information(app: &App) -> Alert {
    result_alert("getDeveloperInformation", app.sdk().developer_information())
}

/// 성공 시 SDK가 직접 화면을 띄우므로 알림 없음
pub fn show_developer_information(app: &App) -> Option<Alert> {
    match app.sdk().show_developer_information() {
        Ok(()) => None,
        Err(e) => Some(Alert::new(SHOW_TITLE, e.to_string())),
    }
}

/// 안내 표시 여부 조회
pub async fn developer_information_showed(app: &App) -> CommandResult<bool> {
    let showed = app
        .storage()
        .is_developer_information_showed()
        .await
        .map_err(crate::error::AppError::from)?;
    Ok(showed)
}

/// 실행 직후 1회성 개발자 정보 안내
///
/// 아직 보여주지 않았거나 기록이 없으면 SDK로 안내를 띄우고 기록합니다.
/// 그 밖의 조회 실패는 로그만 남깁니다. 알림은 UI 큐로 전달됩니다.
pub async fn on_launch(app: &App) {
    tokio::time::sleep(app.config().alert_delay).await;

    let should_show = match app.storage().is_developer_information_showed().await {
        Ok(showed) => !showed,
        Err(FlagStoreError::Keychain(KeychainError::NotFound)) => true,
        Err(e) => {
            tracing::debug!(error = %e, "developer information flag unavailable");
            false
        }
    };
    if !should_show {
        return;
    }

    match app.sdk().show_developer_information() {
        Ok(()) => app.storage().set_developer_information_showed().await,
        Err(e) => app.ui().post(Alert::new(SHOW_TITLE, e.to_string())),
    }
}
