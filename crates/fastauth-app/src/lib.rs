/*
[INPUT]:  Public API exports for fastauth-app crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod controller;
pub mod email;
pub mod error;
pub mod oplog;
pub mod presentation;
pub mod state_machine;

// Re-export main types for convenience
pub use config::AppConfig;
pub use controller::{AuthController, AuthSnapshot, SignOutOutcome};
pub use email::{sanitize_input, validate_email};
pub use error::ControllerError;
pub use oplog::{OperationLog, OperationLogEntry};
pub use state_machine::{AuthEvent, StateError, StatusModel};
