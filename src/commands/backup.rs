//! 백업 저장/복원/삭제 명령
//!
//! 키를 만들 수 없으면 SDK를 호출하지 않고 "Hash unavailiable"을 보여줍니다.

use chrono::Local;

use crate::backup::{generate_backup_key, sample_payload, BackupError};
use crate::ui::Alert;
use crate::App;

fn backup_key(app: &App) -> Result<String, BackupError> {
    let config = app.config();
    generate_backup_key(app.sdk().as_ref(), &config.backup_salt, &config.app_version)
}

/// 저장할 값을 먼저 보여주고, 저장 결과를 이어지는 알림으로 붙임
pub async fn backup_data(app: &App) -> Alert {
    const TITLE: &str = "backupData";

    let hash = match backup_key(app) {
        Ok(hash) => hash,
        Err(e) => return Alert::new(TITLE, e.to_string()),
    };

    let payload = sample_payload(Local::now());
    let preview = Alert::new(
        TITLE,
        format!("Backuped data: {}", serde_json::Value::Object(payload.clone())),
    );

    let result = match app.sdk().store_backup(&hash, payload).await {
        Ok(()) => Alert::new(
            TITLE,
            format!(
                "({}) now you can reinstall this app and then use \"restore backup\" button to restore backup.",
                hash
            ),
        ),
        Err(e) => Alert::new(TITLE, e.to_string()),
    };

    preview.then(result)
}

pub async fn restore_backup(app: &App) -> Alert {
    const TITLE: &str = "restoreBackup";

    let hash = match backup_key(app) {
        Ok(hash) => hash,
        Err(e) => return Alert::new(TITLE, e.to_string()),
    };

    match app.sdk().get_backup(&hash).await {
        Ok(value) => Alert::new(
            TITLE,
            format!("({}) Restored: {}", hash, serde_json::Value::Object(value)),
        ),
        Err(e) => Alert::new(TITLE, e.to_string()),
    }
}

pub async fn purge_backup(app: &App) -> Alert {
    const TITLE: &str = "purgeBackup";

    let hash = match backup_key(app) {
        Ok(hash) => hash,
        Err(e) => return Alert::new(TITLE, e.to_string()),
    };

    match app.sdk().purge_backup(&hash).await {
        Ok(()) => Alert::new(TITLE, format!("({}) Purged", hash)),
        Err(e) => Alert::new(TITLE, e.to_string()),
    }
}
