/*
[INPUT]:  Test configuration and gateway doubles
[OUTPUT]: Shared fixtures for controller tests
[POS]:    Test infrastructure - shared across integration tests
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for fastauth-app tests

use std::sync::Arc;

use fastauth_adapter::{ConnectionStatus, MockWalletGateway, WalletConfig};
use fastauth_app::{AuthController, OperationLog};
use tokio::sync::watch;

pub fn wallet_config() -> WalletConfig {
    WalletConfig::new(
        "testnet",
        "https://relayer.testnet.example",
        "https://wallet.testnet.example",
        "contract.near",
    )
}

/// Controller with a private operation log over a shared mock gateway
pub fn controller(gateway: MockWalletGateway) -> Arc<AuthController<MockWalletGateway>> {
    Arc::new(AuthController::new(gateway).with_operation_log(OperationLog::new()))
}

/// Wait until the controller publishes `status`
#[allow(dead_code)]
pub async fn wait_for_status(
    updates: &mut watch::Receiver<fastauth_app::AuthSnapshot>,
    status: ConnectionStatus,
) {
    updates
        .wait_for(|snapshot| snapshot.status == status)
        .await
        .unwrap();
}
