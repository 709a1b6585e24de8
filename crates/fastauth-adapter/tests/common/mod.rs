/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for fastauth-adapter tests

use fastauth_adapter::WalletConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock relayer that answers its health probe
pub async fn setup_mock_relayer() -> MockServer {
    let server = MockServer::builder().start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;
    server
}

/// Wallet config pointing at the mock relayer
pub fn wallet_config(server: &MockServer) -> WalletConfig {
    WalletConfig::new(
        "testnet",
        server.uri(),
        "https://wallet.testnet.example",
        "contract.near",
    )
}
