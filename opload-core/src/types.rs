//! Core type definitions for opload

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Server-assigned identifier of an operation (newtype pattern for type safety)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(pub i64);

impl OperationId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OperationId {
    fn from(id: i64) -> Self {
        OperationId(id)
    }
}

/// HTTP methods issued by the operations gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    /// Get the string representation of the HTTP method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            _ => Err(ParseError::InvalidHttpMethod(s.to_string())),
        }
    }
}

/// Kind of a banking operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Fee,
    TopUp,
    Purchase,
    Cashback,
    Transfer,
    BillPayment,
    CashWithdrawal,
}

/// Processing status of a banking operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Failed,
    Completed,
    InProgress,
    Unspecified,
}

/// An operation as returned by the remote service.
///
/// Only `id` is required; the remaining attributes are carried through for
/// inspection and are never interpreted by the schedulers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: OperationId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<OperationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OperationStatus>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// Payload of the create call.
///
/// `Default` produces a plausible purchase with a random amount and fresh
/// card/account identifiers, which is all the load scenarios need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOperationRequest {
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
}

impl Default for CreateOperationRequest {
    fn default() -> Self {
        let cents: i64 = rand::thread_rng().gen_range(100..100_000);
        Self {
            operation_type: OperationType::Purchase,
            status: OperationStatus::Completed,
            amount: cents as f64 / 100.0,
            card_id: Uuid::new_v4().to_string(),
            category: "taxi".to_string(),
            created_at: Utc::now(),
            account_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Errors that can occur when parsing types
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("Invalid HTTP method: '{0}'. Supported methods are: GET, POST")]
    InvalidHttpMethod(String),
}
