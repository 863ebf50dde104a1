//! 구조화 로깅 초기화
//!
//! `RUST_LOG`로 레벨을 조정하며 기본값은 `info`입니다.
//! 이미 전역 subscriber가 있으면 조용히 넘어갑니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 사람이 읽는 형식
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .try_init();
}

/// JSON 형식 (로그 수집용)
pub fn init_json() {
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().json().with_target(true).with_thread_ids(true))
        .try_init();
}
