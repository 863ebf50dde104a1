mod common;

use appdb_sample::commands::developer;
use appdb_sample::flag_store::FlagStoreError;
use appdb_sample::keychain::KeychainError;
use common::{harness, harness_with_vendor, FakeSdk};

#[tokio::test]
async fn first_launch_shows_notice_once() {
    let h = harness(FakeSdk::installed());

    assert_eq!(
        h.app.storage().is_developer_information_showed().await,
        Err(FlagStoreError::Keychain(KeychainError::NotFound))
    );

    developer::on_launch(&h.app).await;
    assert_eq!(*h.sdk.show_developer_information_calls.lock().unwrap(), 1);
    assert!(developer::developer_information_showed(&h.app).await.unwrap());

    developer::on_launch(&h.app).await;
    assert_eq!(*h.sdk.show_developer_information_calls.lock().unwrap(), 1);
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn failed_notice_posts_alert_and_is_retried_next_launch() {
    let sdk = FakeSdk {
        show_developer_information_error: Some("Developer information unavailable".to_string()),
        ..FakeSdk::installed()
    };
    let mut h = harness(sdk);

    developer::on_launch(&h.app).await;
    let alert = h.alerts.recv().await.unwrap();
    assert_eq!(alert.title, "showDeveloperInformation");
    assert_eq!(alert.message, "Developer information unavailable");
    assert!(h.store.is_empty());

    developer::on_launch(&h.app).await;
    assert_eq!(*h.sdk.show_developer_information_calls.lock().unwrap(), 2);
}

#[tokio::test]
async fn missing_install_marker_skips_notice() {
    let h = harness_with_vendor(FakeSdk::installed(), None);

    developer::on_launch(&h.app).await;
    assert_eq!(*h.sdk.show_developer_information_calls.lock().unwrap(), 0);

    let err = developer::developer_information_showed(&h.app).await.unwrap_err();
    assert_eq!(err.code, "NO_IDENTIFIER");
}

#[tokio::test]
async fn marker_survives_app_restart() {
    let h = harness(FakeSdk::installed());
    developer::on_launch(&h.app).await;

    let marker_path = h.dir.path().join(appdb_sample::marker::MARKER_FILE_NAME);
    let marker = std::fs::read_to_string(&marker_path).unwrap();
    let (random, vendor) = marker.split_once('$').unwrap();
    assert!(uuid::Uuid::parse_str(random).is_ok());
    assert_eq!(vendor, common::VENDOR);
}

#[test]
fn developer_information_is_rendered() {
    let h = harness(FakeSdk::installed());
    let alert = developer::get_developer_information(&h.app);
    assert_eq!(alert.message, "Sample Dev <dev@example.com>");
    assert!(developer::show_developer_information(&h.app).is_none());
}

#[tokio::test]
async fn app_from_config_with_offline_sdk_reports_sdk_errors() {
    use appdb_sample::config::{AppConfig, VaultBackend};
    use appdb_sample::sdk::OfflineSdk;
    use appdb_sample::App;
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::new(dir.path().join("private")).unwrap();
    config.vault_backend = VaultBackend::Memory;
    config.vendor_identifier = Some(common::VENDOR.to_string());
    config.alert_delay = std::time::Duration::ZERO;

    let (app, mut alerts) = App::from_config(config, Arc::new(OfflineSdk::new())).unwrap();
    assert!(dir.path().join("private").is_dir());

    developer::on_launch(&app).await;
    let alert = alerts.recv().await.unwrap();
    assert_eq!(alert.title, "showDeveloperInformation");
    assert_eq!(alert.message, "Application is not installed via appdb");
}
