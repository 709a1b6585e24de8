/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public fast-auth adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod error;
pub mod gateway;
pub mod relayer;
pub mod types;

pub use error::{AuthFailure, GatewayError, Result};

pub use gateway::{CallGate, MockHandle, MockWalletGateway, WalletGateway};

pub use relayer::{ClientConfig, RelayerGateway, RelayerHandle};

// Re-export all types
pub use types::*;
