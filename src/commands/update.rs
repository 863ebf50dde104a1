//! 업데이트 확인 명령

use crate::commands::result_alert;
use crate::error::CommandResult;
use crate::ui::{Alert, AlertAction};
use crate::App;

/// 업데이트가 있으면 확인 후 스토어 URL을 여는 동작을 붙임
pub async fn is_app_update_available(app: &App) -> Alert {
    const TITLE: &str = "isAppUpdateAvailable";

    match app.sdk().is_app_update_available().await {
        Ok(true) => {
            let alert = Alert::new(TITLE, true.to_string());
            match app.sdk().appdb_store_url() {
                Ok(url) => alert.with_action(AlertAction::OpenUrl(url)),
                Err(e) => {
                    tracing::debug!(error = %e, "store URL unavailable");
                    alert
                }
            }
        }
        result => result_alert(TITLE, result),
    }
}

/// 시스템 브라우저로 스토어 URL 열기
pub fn open_store_url(app: &App) -> CommandResult<()> {
    let url = app.sdk().appdb_store_url()?;
    open::that(&url).map_err(crate::error::AppError::from)?;
    Ok(())
}
