//! 푸시 알림 명령

use crate::ui::Alert;
use crate::App;

const PUSH_TITLE: &str = "getPushNotification";

/// 안내 알림을 즉시 돌려주고 지연 푸시 요청은 백그라운드로 보냄
///
/// 요청 실패는 나중에 UI 큐로 전달됩니다.
pub fn get_push_notification(app: &App) -> Alert {
    let sdk = app.sdk().clone();
    let push = app.push().clone();
    let ui = app.ui().clone();

    app.background().spawn(async move {
        if let Err(e) = push.send(sdk.as_ref()).await {
            ui.post(Alert::new(PUSH_TITLE, e.to_string()));
        }
    });

    Alert::new(
        PUSH_TITLE,
        "You may close this app, push will arrive in 10 seconds",
    )
}

/// 알림 권한 요청 결과 안내
///
/// 권한 프롬프트 자체는 플랫폼 UI가 띄웁니다.
pub fn register_push_notifications(granted: bool) -> Alert {
    tracing::info!(granted, "push notification permission answered");
    let message = if granted {
        "Permission granted"
    } else {
        "Permission NOT granted"
    };
    Alert::new("registerPushNotifications", message)
}

/// 플랫폼에서 받은 기기 토큰을 SDK에 등록
pub async fn register_push_token(app: &App, token: &[u8]) {
    match app.sdk().assign_push_token(token).await {
        Ok(value) => tracing::info!(%value, "push token assigned"),
        Err(e) => tracing::debug!(error = %e, "failed to assign push token"),
    }
}
