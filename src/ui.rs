//! UI 전달 타입
//!
//! 명령 결과는 모달 알림(`Alert`)으로 표현됩니다. 비동기로 도착하는 결과는
//! `UiQueue`에만 게시되고, UI 스레드가 이를 한 곳에서 꺼내 표시합니다.

use serde::Serialize;
use tokio::sync::mpsc;

/// 알림 확인 버튼을 누른 뒤 UI가 수행할 동작
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AlertAction {
    CopyToClipboard(String),
    OpenUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AlertAction>,
    /// 확인 후 이어서 표시할 알림
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<Box<Alert>>,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action: None,
            follow_up: None,
        }
    }

    pub fn with_action(mut self, action: AlertAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn then(mut self, next: Alert) -> Self {
        self.follow_up = Some(Box::new(next));
        self
    }
}

/// UI 스레드로 향하는 알림 큐 (송신측)
#[derive(Debug, Clone)]
pub struct UiQueue {
    tx: mpsc::UnboundedSender<Alert>,
}

impl UiQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Alert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// 알림 게시 (UI가 이미 닫혔으면 버림)
    pub fn post(&self, alert: Alert) {
        if self.tx.send(alert).is_err() {
            tracing::debug!("UI queue closed, alert dropped");
        }
    }
}
