//! 인앱 구매 설정 명령

use crate::ui::Alert;
use crate::App;

pub async fn setup_purchases(app: &App) -> Alert {
    const TITLE: &str = "setupPurchases";

    match app.purchases().run().await {
        Ok(metadata) => Alert::new(
            TITLE,
            format!("Ready: {} products", metadata.product_identifiers.len()),
        ),
        Err(e) => Alert::new(TITLE, e.to_string()),
    }
}
