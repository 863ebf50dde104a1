//! 외부에서 열린 URL 처리

use tokio::task::JoinHandle;

use crate::deeplink::OpenUrlRequest;
use crate::ui::Alert;
use crate::App;

/// appdb 스킴 URL은 SDK로 넘기고, `deeplink` 인자가 있으면 지연 후 알림을 게시
///
/// 알림이 예약되면 해당 태스크 핸들을 돌려줍니다.
pub fn handle_open_url(
    app: &App,
    url: &str,
    source_application: Option<&str>,
) -> Option<JoinHandle<()>> {
    let request = OpenUrlRequest::parse(url, source_application);

    if let Some(appdb_url) = request.appdb_url() {
        app.sdk().handle_deeplink(appdb_url);
    }

    let message = request.alert_message()?;
    let ui = app.ui().clone();
    let delay = app.config().alert_delay;

    Some(app.background().spawn(async move {
        tokio::time::sleep(delay).await;
        ui.post(Alert::new("deeplink", message));
    }))
}
