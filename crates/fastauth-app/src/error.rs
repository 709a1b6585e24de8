/*
[INPUT]:  Guard failures and normalized gateway errors
[OUTPUT]: Controller error type with user-facing messages
[POS]:    Error handling layer - errors surfaced to the presentation layer
[UPDATE]: When adding controller guards or error kinds
*/

use fastauth_adapter::{AuthFailureKind, ConnectionStatus, GatewayError};
use thiserror::Error;

/// Errors returned by [`crate::AuthController`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// Input did not look like an email address
    #[error("Invalid email address: {0:?}")]
    Validation(String),

    /// Sign-in attempted before the gateway is ready
    #[error("Wallet not initialized")]
    NotInitialized,

    /// A sign-in is already in flight
    #[error("Sign in already in progress")]
    AlreadyInProgress,

    /// A session already exists
    #[error("Already connected")]
    AlreadyConnected,

    /// `start` called while initialization is running
    #[error("Initialization already in progress")]
    InitInProgress,

    /// Operation not permitted from the current status
    #[error("Operation not allowed while {status}")]
    InvalidTransition { status: ConnectionStatus },

    /// Normalized failure from the wallet gateway
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ControllerError {
    /// Guard and validation errors leave the status untouched
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ControllerError::Gateway(_))
    }

    /// Human-readable message for display
    pub fn user_message(&self) -> String {
        match self {
            ControllerError::Validation(_) => "Please enter a valid email address".to_string(),
            ControllerError::NotInitialized => {
                "Wallet is not ready yet. Please wait for initialization.".to_string()
            }
            ControllerError::AlreadyInProgress => "Sign in is already in progress.".to_string(),
            ControllerError::AlreadyConnected => {
                "You are already signed in. Sign out first.".to_string()
            }
            ControllerError::InitInProgress => "Wallet is still initializing.".to_string(),
            ControllerError::InvalidTransition { status } => {
                format!("That action is not available while {status}.")
            }
            ControllerError::Gateway(err) => gateway_message(err),
        }
    }
}

fn gateway_message(err: &GatewayError) -> String {
    let text = match err {
        GatewayError::InitFailed(_) => "Failed to initialize wallet",
        GatewayError::SignOutFailed(_) => "Sign out failed. You have been signed out locally.",
        GatewayError::Timeout { .. } => "The wallet did not respond in time. Please try again.",
        GatewayError::AuthFailed(failure) => match failure.kind {
            AuthFailureKind::UserCancelled => "Authentication cancelled by user",
            AuthFailureKind::Network => "Network error. Please check your connection.",
            AuthFailureKind::InvalidInput => "Please enter a valid email address",
            AuthFailureKind::ProviderRejected => "Contract interaction failed. Please try again.",
            AuthFailureKind::Unknown => "Authentication failed. Please try again.",
        },
    };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AuthFailureKind::UserCancelled, "Authentication cancelled by user")]
    #[case(AuthFailureKind::Network, "Network error. Please check your connection.")]
    #[case(AuthFailureKind::InvalidInput, "Please enter a valid email address")]
    #[case(AuthFailureKind::ProviderRejected, "Contract interaction failed. Please try again.")]
    #[case(AuthFailureKind::Unknown, "Authentication failed. Please try again.")]
    fn test_auth_failure_messages(#[case] kind: AuthFailureKind, #[case] expected: &str) {
        let err = ControllerError::from(GatewayError::auth(kind, "raw sdk text"));
        assert_eq!(err.user_message(), expected);
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_guard_errors_are_rejections() {
        assert!(ControllerError::NotInitialized.is_rejection());
        assert!(ControllerError::Validation("x".to_string()).is_rejection());
        assert!(
            ControllerError::InvalidTransition {
                status: ConnectionStatus::Ready
            }
            .is_rejection()
        );
    }

    #[test]
    fn test_gateway_error_display_is_transparent() {
        let err = ControllerError::from(GatewayError::InitFailed("offline".to_string()));
        assert_eq!(err.to_string(), "Wallet initialization failed: offline");
        assert_eq!(err.user_message(), "Failed to initialize wallet");
    }
}
