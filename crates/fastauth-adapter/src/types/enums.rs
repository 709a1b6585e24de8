/*
[INPUT]:  Connection lifecycle and failure taxonomy requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - shared enums for gateway and controller
[UPDATE]: When connection states or failure kinds change
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wallet connection status as seen by the presentation layer.
///
/// Exactly one value holds at any time; the controller owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Initializing,
    Ready,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub const ALL: [ConnectionStatus; 6] = [
        ConnectionStatus::Disconnected,
        ConnectionStatus::Initializing,
        ConnectionStatus::Ready,
        ConnectionStatus::Connecting,
        ConnectionStatus::Connected,
        ConnectionStatus::Error,
    ];

    /// Lowercase wire/display key (`"connected"`, `"ready"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Initializing => "initializing",
            ConnectionStatus::Ready => "ready",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Error => "error",
        }
    }

    /// True while an asynchronous gateway call is outstanding
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ConnectionStatus::Initializing | ConnectionStatus::Connecting
        )
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a wallet sign-in was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailureKind {
    UserCancelled,
    Network,
    InvalidInput,
    ProviderRejected,
    Unknown,
}

impl AuthFailureKind {
    /// Classify a raw provider message by the markers the wallet SDK emits.
    pub fn classify(message: &str) -> Self {
        if message.contains("User rejected") {
            AuthFailureKind::UserCancelled
        } else if message.contains("Network error") {
            AuthFailureKind::Network
        } else if message.contains("Invalid email") {
            AuthFailureKind::InvalidInput
        } else if message.contains("Contract error") {
            AuthFailureKind::ProviderRejected
        } else {
            AuthFailureKind::Unknown
        }
    }
}

impl fmt::Display for AuthFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuthFailureKind::UserCancelled => "user cancelled",
            AuthFailureKind::Network => "network failure",
            AuthFailureKind::InvalidInput => "invalid input",
            AuthFailureKind::ProviderRejected => "provider rejected",
            AuthFailureKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}
