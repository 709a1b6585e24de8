/*
[INPUT]:  Error sources at the wallet boundary (SDK, HTTP, timeouts)
[OUTPUT]: Normalized gateway error types
[POS]:    Error handling layer - unified error types for the gateway
[UPDATE]: When adding new failure sources or improving error messages
*/

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::types::AuthFailureKind;

/// Classified sign-in failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    pub kind: AuthFailureKind,
    pub reason: String,
}

impl AuthFailure {
    pub fn new(kind: AuthFailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Build a failure from a raw provider message, inferring its kind.
    pub fn from_message(message: impl Into<String>) -> Self {
        let reason = message.into();
        Self {
            kind: AuthFailureKind::classify(&reason),
            reason,
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reason, self.kind)
    }
}

/// Errors surfaced by a [`crate::WalletGateway`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The wallet provider could not be set up
    #[error("Wallet initialization failed: {0}")]
    InitFailed(String),

    /// The provider refused or could not complete a sign-in
    #[error("Authentication failed: {0}")]
    AuthFailed(AuthFailure),

    /// Remote sign-out did not complete
    #[error("Sign out failed: {0}")]
    SignOutFailed(String),

    /// Gateway call did not settle in time
    #[error("Gateway call timed out after {duration_secs}s")]
    Timeout { duration_secs: u64 },
}

impl GatewayError {
    pub fn auth(kind: AuthFailureKind, reason: impl Into<String>) -> Self {
        GatewayError::AuthFailed(AuthFailure::new(kind, reason))
    }

    /// Timeout for a call bounded by `limit`, rounded up to whole seconds
    pub fn timeout(limit: Duration) -> Self {
        GatewayError::Timeout {
            duration_secs: limit.as_secs() + u64::from(limit.subsec_nanos() > 0),
        }
    }

    /// Failure kind for sign-in errors, `None` for the other variants
    pub fn auth_kind(&self) -> Option<AuthFailureKind> {
        match self {
            GatewayError::AuthFailed(failure) => Some(failure.kind),
            _ => None,
        }
    }

    /// Whether retrying the same call could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout { .. } | GatewayError::InitFailed(_) => true,
            GatewayError::AuthFailed(failure) => failure.kind == AuthFailureKind::Network,
            GatewayError::SignOutFailed(_) => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::auth(AuthFailureKind::Network, format!("Network error: {err}"))
    }
}

impl From<&str> for GatewayError {
    fn from(message: &str) -> Self {
        GatewayError::AuthFailed(AuthFailure::from_message(message))
    }
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
