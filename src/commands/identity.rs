//! 식별자 조회 명령

use crate::commands::result_alert;
use crate::error::CommandResult;
use crate::ui::Alert;
use crate::App;

pub fn is_installed_via_appdb(app: &App) -> Alert {
    let installed = app.sdk().is_installed_via_appdb();
    Alert::new("isInstalledViaAppdb", if installed { "True" } else { "False" })
}

pub fn get_persistent_customer_identifier(app: &App) -> Alert {
    result_alert(
        "getPersistentCustomerIdentifier",
        app.sdk().persistent_customer_identifier(),
    )
}

pub fn get_persistent_device_identifier(app: &App) -> Alert {
    result_alert(
        "getPersistentDeviceIdentifier",
        app.sdk().persistent_device_identifier(),
    )
}

pub fn get_apple_bundle_identifier(app: &App) -> Alert {
    result_alert("getAppleBundleIdentifier", app.sdk().apple_bundle_identifier())
}

pub fn get_apple_app_group_identifier(app: &App) -> Alert {
    result_alert(
        "getAppleAppGroupIdentifier",
        app.sdk().apple_app_group_identifier(),
    )
}

pub fn get_appdb_app_identifier(app: &App) -> Alert {
    result_alert("getAppdbAppIdentifier", app.sdk().appdb_app_identifier())
}

pub fn get_alongside_identifier(app: &App) -> Alert {
    result_alert("getAlongsideIdentifier", app.sdk().alongside_identifier())
}

pub fn get_installation_uuid(app: &App) -> Alert {
    result_alert("getInstallationUUID", app.sdk().installation_uuid())
}

pub fn get_supported_services_identifiers(app: &App) -> Alert {
    result_alert(
        "supportedServicesIdentifiers",
        app.sdk()
            .supported_services_identifiers()
            .map(|ids| ids.join(", ")),
    )
}

/// 성공 시 알림 없음
pub fn ask_customer_to_enable_open_in(app: &App) -> Option<Alert> {
    match app.sdk().ask_customer_to_enable_open_in() {
        Ok(()) => None,
        Err(e) => Some(Alert::new("askCustomerToEnableOpenIn", e.to_string())),
    }
}

/// 설치 요약 레이블 (TV 화면)
///
/// appdb로 설치된 경우 고객/기기 식별자를 덧붙이며, 식별자 조회 실패는 에러로 돌려줍니다.
pub fn installation_summary(app: &App) -> CommandResult<String> {
    let sdk = app.sdk();
    let installed = sdk.is_installed_via_appdb();
    let mut text = format!("isInstalledViaAppdb: {}", installed);

    if installed {
        let customer = sdk.persistent_customer_identifier()?;
        text.push_str(&format!("\npersistentCustomerIdentifier: {}", customer));
        let device = sdk.persistent_device_identifier()?;
        text.push_str(&format!("\npersistentDeviceIdentifier: {}", device));
    }

    Ok(text)
}
