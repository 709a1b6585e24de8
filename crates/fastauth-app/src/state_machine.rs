/*
[INPUT]:  ConnectionStatus from the adapter, AuthEvent enum
[OUTPUT]: Validated connection status transitions
[POS]:    Controller domain logic - state machine for the auth lifecycle
[UPDATE]: When connection status transitions change
*/

use fastauth_adapter::ConnectionStatus;
use thiserror::Error;

/// Events that can move the connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    Start,
    InitSucceeded,
    InitFailed,
    SignInRequested,
    SignInSucceeded,
    SignInFailed,
    SignOutCompleted,
    ClearError,
}

/// Errors occurring during state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Invalid transition: {from:?} -> {event:?}")]
    InvalidTransition {
        from: ConnectionStatus,
        event: AuthEvent,
    },
}

/// Transition table. `None` means the event is not listed for `current`
/// and must be treated as a no-op.
pub fn next_status(current: ConnectionStatus, event: AuthEvent) -> Option<ConnectionStatus> {
    use AuthEvent as E;
    use ConnectionStatus as S;

    match (current, event) {
        (S::Disconnected | S::Ready | S::Error, E::Start) => Some(S::Initializing),
        (S::Initializing, E::InitSucceeded) => Some(S::Ready),
        (S::Initializing, E::InitFailed) => Some(S::Error),
        (S::Ready | S::Error, E::SignInRequested) => Some(S::Connecting),
        (S::Connecting, E::SignInSucceeded) => Some(S::Connected),
        (S::Connecting, E::SignInFailed) => Some(S::Error),
        (S::Connected, E::SignOutCompleted) => Some(S::Disconnected),
        (S::Error, E::ClearError) => Some(S::Disconnected),
        _ => None,
    }
}

/// State machine holding the current connection status
#[derive(Debug, Clone, Default)]
pub struct StatusModel {
    current: ConnectionStatus,
}

impl StatusModel {
    /// Start in `Disconnected`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(current: ConnectionStatus) -> Self {
        Self { current }
    }

    pub fn can_transition(&self, event: AuthEvent) -> bool {
        next_status(self.current, event).is_some()
    }

    /// Perform a transition, rejecting unlisted events
    pub fn transition(&mut self, event: AuthEvent) -> Result<ConnectionStatus, StateError> {
        let next = next_status(self.current, event).ok_or(StateError::InvalidTransition {
            from: self.current,
            event,
        })?;
        self.current = next;
        Ok(next)
    }

    /// Apply an event, ignoring it when unlisted. Returns whether the
    /// status changed.
    pub fn apply(&mut self, event: AuthEvent) -> bool {
        match next_status(self.current, event) {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionStatus {
        self.current
    }
}
