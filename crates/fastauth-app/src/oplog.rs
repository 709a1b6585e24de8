/*
[INPUT]:  Operation names and payload maps from the controller
[OUTPUT]: Append-only diagnostic log of wallet operations
[POS]:    Diagnostics - shared operation log between controller and UI
[UPDATE]: When adding operations or payload fields
*/

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

pub const WALLET_INITIALIZED: &str = "walletInitialized";
pub const SIGN_IN_ATTEMPT: &str = "signInAttempt";
pub const SIGN_IN_SUCCESS: &str = "signInSuccess";
pub const SIGN_IN_FAILED: &str = "signInFailed";
pub const SIGN_OUT_ATTEMPT: &str = "signOutAttempt";
pub const SIGN_OUT_SUCCESS: &str = "signOutSuccess";
pub const SIGN_OUT_FAILED: &str = "signOutFailed";
pub const ERROR_CLEARED: &str = "errorCleared";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationLogEntry {
    pub operation: String,
    pub timestamp: DateTime<Utc>,
    pub payload: Map<String, Value>,
}

/// Cheap-to-clone handle onto an append-only entry list.
///
/// Entries carry no invariants; order only reflects arrival.
#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    entries: Arc<Mutex<Vec<OperationLogEntry>>>,
}

static GLOBAL: OnceLock<OperationLog> = OnceLock::new();

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide log shared by every controller that is not given its own
    pub fn global() -> OperationLog {
        GLOBAL.get_or_init(OperationLog::new).clone()
    }

    /// Append an entry. Non-object payloads are stored under `"value"`.
    pub fn record(&self, operation: &str, payload: Value) {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        debug!(target: "fastauth::oplog", operation, payload = %serde_json::Value::Object(payload.clone()), "wallet operation");

        self.lock().push(OperationLogEntry {
            operation: operation.to_string(),
            timestamp: Utc::now(),
            payload,
        });
    }

    pub fn entries(&self) -> Vec<OperationLogEntry> {
        self.lock().clone()
    }

    /// Operation names in arrival order
    pub fn operations(&self) -> Vec<String> {
        self.lock().iter().map(|entry| entry.operation.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OperationLogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_appends_in_order() {
        let log = OperationLog::new();
        log.record(SIGN_IN_ATTEMPT, json!({"email": "user@example.com"}));
        log.record(SIGN_IN_SUCCESS, json!({"email": "user@example.com"}));

        assert_eq!(log.len(), 2);
        assert_eq!(log.operations(), vec![SIGN_IN_ATTEMPT, SIGN_IN_SUCCESS]);

        let entries = log.entries();
        assert_eq!(entries[0].payload["email"], "user@example.com");
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }

    #[test]
    fn test_payload_normalization() {
        let log = OperationLog::new();
        log.record(SIGN_OUT_ATTEMPT, Value::Null);
        log.record(ERROR_CLEARED, json!("manual"));

        let entries = log.entries();
        assert!(entries[0].payload.is_empty());
        assert_eq!(entries[1].payload["value"], "manual");
    }

    #[test]
    fn test_clones_share_entries() {
        let log = OperationLog::new();
        let other = log.clone();
        other.record(WALLET_INITIALIZED, json!({"success": true}));

        assert_eq!(log.len(), 1);
        log.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_global_is_shared() {
        let before = OperationLog::global().len();
        OperationLog::global().record("globalProbe", json!({}));
        assert!(OperationLog::global().len() > before);
    }
}
