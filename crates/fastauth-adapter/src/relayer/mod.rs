/*
[INPUT]:  Relayer configuration and HTTP endpoints
[OUTPUT]: WalletGateway implementation over the fast-auth relayer
[POS]:    Relayer layer - HTTP binding of the gateway
[UPDATE]: When adding relayer endpoints or changing client behavior
*/

pub mod client;

pub use client::{ClientConfig, RelayerGateway, RelayerHandle};
