//! SDK 데이터 타입

use serde::{Deserialize, Serialize};
use std::fmt;

/// 백업 값 (JSON 객체)
pub type BackupPayload = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInformation {
    pub name: String,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl fmt::Display for DeveloperInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(email) = &self.email {
            write!(f, " <{}>", email)?;
        }
        if let Some(website) = &self.website {
            write!(f, " {}", website)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseMetadata {
    pub product_identifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PurchaseEvent {
    Purchased { product_identifier: String },
    Restored { product_identifier: String },
    Failed { product_identifier: String, reason: String },
}
