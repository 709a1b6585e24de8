/*
[INPUT]:  Scripted gateway outcomes and gated gateway calls
[OUTPUT]: Observed status sequences and guard behavior
[POS]:    Integration tests - controller lifecycle scenarios
[UPDATE]: When controller transitions or guards change
*/

mod common;

use std::sync::Arc;

use common::{controller, wait_for_status, wallet_config};
use fastauth_adapter::{CallGate, ConnectionStatus, GatewayError, MockWalletGateway, Session};
use fastauth_app::{ControllerError, SignOutOutcome};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn scenario_start_succeeds() {
    let gate = CallGate::new();
    let controller = controller(MockWalletGateway::new().with_init_gate(gate.clone()));
    assert_eq!(controller.status(), ConnectionStatus::Disconnected);

    let task = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start(&wallet_config()).await })
    };

    gate.entered().await;
    assert_eq!(controller.status(), ConnectionStatus::Initializing);

    gate.release();
    assert_ok!(task.await.unwrap());
    assert_eq!(controller.status(), ConnectionStatus::Ready);
}

#[tokio::test]
async fn scenario_start_fails() {
    let gate = CallGate::new();
    let gateway = MockWalletGateway::new().with_init_gate(gate.clone());
    gateway.push_init_result(Err(GatewayError::InitFailed("relayer offline".to_string())));
    let controller = controller(gateway);

    let task = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start(&wallet_config()).await })
    };

    gate.entered().await;
    assert_eq!(controller.status(), ConnectionStatus::Initializing);

    gate.release();
    assert_err!(task.await.unwrap());
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.status, ConnectionStatus::Error);
    assert_eq!(
        snapshot.last_error,
        Some(ControllerError::Gateway(GatewayError::InitFailed(
            "relayer offline".to_string()
        )))
    );
    assert_eq!(snapshot.error_message().as_deref(), Some("Failed to initialize wallet"));
}

#[tokio::test]
async fn scenario_sign_in_succeeds() {
    let gate = CallGate::new();
    let controller = controller(MockWalletGateway::new().with_sign_in_gate(gate.clone()));
    assert_ok!(controller.start(&wallet_config()).await);
    assert_eq!(controller.status(), ConnectionStatus::Ready);

    let task = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.sign_in("user@example.com", "contract.near").await })
    };

    gate.entered().await;
    assert_eq!(controller.status(), ConnectionStatus::Connecting);
    assert!(controller.snapshot().is_busy());
    assert!(controller.session().is_none());

    gate.release();
    assert_ok!(task.await.unwrap());
    assert_eq!(controller.status(), ConnectionStatus::Connected);
    assert_eq!(
        controller.session(),
        Some(Session::new("user@example.com", "contract.near"))
    );
}

#[tokio::test]
async fn scenario_invalid_email_is_rejected() {
    let controller = controller(MockWalletGateway::new());
    assert_ok!(controller.start(&wallet_config()).await);

    let err = assert_err!(controller.sign_in("not-an-email", "contract.near").await);
    assert!(matches!(err, ControllerError::Validation(_)));
    assert_eq!(controller.status(), ConnectionStatus::Ready);
    assert_eq!(controller.gateway().sign_in_calls(), 0);
}

#[tokio::test]
async fn scenario_sign_out_survives_gateway_failure() {
    let gateway = MockWalletGateway::new();
    gateway.push_sign_out_result(Err(GatewayError::SignOutFailed("timeout".to_string())));
    let controller = controller(gateway);
    assert_ok!(controller.start(&wallet_config()).await);
    assert_ok!(controller.sign_in("user@example.com", "contract.near").await);

    let outcome = controller.sign_out().await;
    assert!(matches!(outcome, SignOutOutcome::SignedOutLocally(_)));
    assert_eq!(controller.status(), ConnectionStatus::Disconnected);
    assert!(controller.session().is_none());
    assert!(controller.last_error().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sign_in_while_connecting_is_rejected_without_second_call() {
    let gate = CallGate::new();
    let controller = controller(MockWalletGateway::new().with_sign_in_gate(gate.clone()));
    assert_ok!(controller.start(&wallet_config()).await);

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.sign_in("user@example.com", "contract.near").await })
    };
    gate.entered().await;

    let rivals: Vec<_> = (0..8)
        .map(|i| {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                controller
                    .sign_in(&format!("user{i}@example.com"), "contract.near")
                    .await
            })
        })
        .collect();

    for rival in rivals {
        let err = assert_err!(rival.await.unwrap());
        assert_eq!(err, ControllerError::AlreadyInProgress);
    }
    assert_eq!(controller.gateway().sign_in_calls(), 1);

    gate.release();
    assert_ok!(first.await.unwrap());
    assert_eq!(controller.status(), ConnectionStatus::Connected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sign_ins_from_ready_yield_one_gateway_call() {
    let controller = controller(MockWalletGateway::new());
    assert_ok!(controller.start(&wallet_config()).await);

    let attempts: Vec<_> = (0..16)
        .map(|_| {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.sign_in("user@example.com", "contract.near").await })
        })
        .collect();

    let mut successes = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert!(matches!(
                err,
                ControllerError::AlreadyInProgress | ControllerError::AlreadyConnected
            )),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(controller.gateway().sign_in_calls(), 1);
}

#[tokio::test]
async fn start_while_initializing_is_rejected() {
    let gate = CallGate::new();
    let controller = controller(MockWalletGateway::new().with_init_gate(gate.clone()));

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start(&wallet_config()).await })
    };
    gate.entered().await;

    let err = assert_err!(controller.start(&wallet_config()).await);
    assert_eq!(err, ControllerError::InitInProgress);
    assert_eq!(controller.gateway().init_calls(), 1);

    gate.release();
    assert_ok!(first.await.unwrap());
}

#[tokio::test]
async fn concurrent_sign_out_calls_gateway_once() {
    let gate = CallGate::new();
    let controller = controller(MockWalletGateway::new().with_sign_out_gate(gate.clone()));
    assert_ok!(controller.start(&wallet_config()).await);
    assert_ok!(controller.sign_in("user@example.com", "contract.near").await);

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.sign_out().await })
    };
    gate.entered().await;

    assert_eq!(controller.sign_out().await, SignOutOutcome::NotConnected);
    assert_eq!(controller.status(), ConnectionStatus::Connected);

    gate.release();
    assert_eq!(first.await.unwrap(), SignOutOutcome::SignedOut);
    assert_eq!(controller.gateway().sign_out_calls(), 1);
    assert_eq!(controller.status(), ConnectionStatus::Disconnected);
}

#[tokio::test]
async fn clear_error_then_restart_recovers() {
    let gateway = MockWalletGateway::new();
    gateway.push_sign_in_result(Err("User rejected the request".into()));
    let controller = controller(gateway);
    let mut updates = controller.subscribe();

    assert_ok!(controller.start(&wallet_config()).await);
    let err = assert_err!(controller.sign_in("user@example.com", "contract.near").await);
    assert_eq!(err.user_message(), "Authentication cancelled by user");
    wait_for_status(&mut updates, ConnectionStatus::Error).await;

    assert_ok!(controller.clear_error());
    assert_eq!(controller.status(), ConnectionStatus::Disconnected);

    let err = assert_err!(controller.sign_in("user@example.com", "contract.near").await);
    assert_eq!(err, ControllerError::NotInitialized);

    assert_ok!(controller.start(&wallet_config()).await);
    assert_ok!(controller.sign_in("user@example.com", "contract.near").await);
    assert_eq!(controller.gateway().init_calls(), 2);
    assert_eq!(controller.status(), ConnectionStatus::Connected);

    let operations = controller.operation_log().operations();
    assert_eq!(
        operations,
        vec![
            "walletInitialized",
            "signInAttempt",
            "signInFailed",
            "errorCleared",
            "walletInitialized",
            "signInAttempt",
            "signInSuccess",
        ]
    );
}
