/*
[INPUT]:  Scripted outcomes and optional call gates
[OUTPUT]: Deterministic WalletGateway for tests and demos
[POS]:    Gateway layer - in-memory test double
[UPDATE]: When the WalletGateway trait changes
*/

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::Result;
use crate::types::WalletConfig;

use super::WalletGateway;

/// Holds a gateway call in flight until released
#[derive(Debug, Default)]
pub struct CallGate {
    entered: Notify,
    release: Notify,
}

impl CallGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wait until a gated call has started
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let one gated call settle
    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Handle produced by [`MockWalletGateway::initialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockHandle {
    pub config: WalletConfig,
    /// 1-based count of successful initializations
    pub generation: usize,
}

/// Mock gateway for testing
///
/// Each operation pops its next scripted outcome and succeeds once the
/// script is exhausted.
#[derive(Debug, Default)]
pub struct MockWalletGateway {
    init_results: Mutex<VecDeque<Result<()>>>,
    sign_in_results: Mutex<VecDeque<Result<()>>>,
    sign_out_results: Mutex<VecDeque<Result<()>>>,
    init_gate: Option<Arc<CallGate>>,
    sign_in_gate: Option<Arc<CallGate>>,
    sign_out_gate: Option<Arc<CallGate>>,
    init_calls: AtomicUsize,
    init_successes: AtomicUsize,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
    sign_in_requests: Mutex<Vec<(String, String)>>,
}

impl MockWalletGateway {
    /// Create a gateway whose calls all succeed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_init_result(&self, result: Result<()>) -> &Self {
        lock(&self.init_results).push_back(result);
        self
    }

    pub fn push_sign_in_result(&self, result: Result<()>) -> &Self {
        lock(&self.sign_in_results).push_back(result);
        self
    }

    pub fn push_sign_out_result(&self, result: Result<()>) -> &Self {
        lock(&self.sign_out_results).push_back(result);
        self
    }

    pub fn with_init_gate(mut self, gate: Arc<CallGate>) -> Self {
        self.init_gate = Some(gate);
        self
    }

    pub fn with_sign_in_gate(mut self, gate: Arc<CallGate>) -> Self {
        self.sign_in_gate = Some(gate);
        self
    }

    pub fn with_sign_out_gate(mut self, gate: Arc<CallGate>) -> Self {
        self.sign_out_gate = Some(gate);
        self
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    /// `(identifier, contract_id)` pairs seen by `sign_in`, in call order
    pub fn sign_in_requests(&self) -> Vec<(String, String)> {
        lock(&self.sign_in_requests).clone()
    }
}

#[async_trait]
impl WalletGateway for MockWalletGateway {
    type Handle = MockHandle;

    async fn initialize(&self, config: &WalletConfig) -> Result<MockHandle> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.init_gate {
            gate.pass().await;
        }

        next_outcome(&self.init_results)?;
        let generation = self.init_successes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MockHandle {
            config: config.clone(),
            generation,
        })
    }

    async fn sign_in(&self, _handle: &MockHandle, identifier: &str, contract_id: &str) -> Result<()> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.sign_in_requests).push((identifier.to_string(), contract_id.to_string()));
        if let Some(gate) = &self.sign_in_gate {
            gate.pass().await;
        }
        next_outcome(&self.sign_in_results)
    }

    async fn sign_out(&self, _handle: &MockHandle) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.sign_out_gate {
            gate.pass().await;
        }
        next_outcome(&self.sign_out_results)
    }
}

fn next_outcome(queue: &Mutex<VecDeque<Result<()>>>) -> Result<()> {
    lock(queue).pop_front().unwrap_or(Ok(()))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::types::AuthFailureKind;

    #[tokio::test]
    async fn test_mock_gateway_defaults_to_success() {
        let gateway = MockWalletGateway::new();
        let handle = gateway.initialize(&WalletConfig::default()).await.unwrap();

        assert_eq!(handle.generation, 1);
        assert!(gateway.sign_in(&handle, "a@b.co", "c.near").await.is_ok());
        assert!(gateway.sign_out(&handle).await.is_ok());
        assert_eq!(gateway.init_calls(), 1);
        assert_eq!(gateway.sign_in_calls(), 1);
        assert_eq!(gateway.sign_out_calls(), 1);
        assert_eq!(
            gateway.sign_in_requests(),
            vec![("a@b.co".to_string(), "c.near".to_string())]
        );
    }

    #[tokio::test]
    async fn test_mock_gateway_replays_script_in_order() {
        let gateway = MockWalletGateway::new();
        gateway
            .push_sign_in_result(Err("User rejected".into()))
            .push_sign_in_result(Ok(()));
        let handle = gateway.initialize(&WalletConfig::default()).await.unwrap();

        let err = gateway.sign_in(&handle, "a@b.co", "c.near").await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(AuthFailureKind::UserCancelled));
        assert!(gateway.sign_in(&handle, "a@b.co", "c.near").await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_init_does_not_advance_generation() {
        let gateway = MockWalletGateway::new();
        gateway.push_init_result(Err(GatewayError::InitFailed("offline".to_string())));

        assert!(gateway.initialize(&WalletConfig::default()).await.is_err());
        let handle = gateway.initialize(&WalletConfig::default()).await.unwrap();
        assert_eq!(handle.generation, 1);
        assert_eq!(gateway.init_calls(), 2);
    }

    #[tokio::test]
    async fn test_gate_holds_call_until_released() {
        let gate = CallGate::new();
        let gateway = Arc::new(MockWalletGateway::new().with_sign_out_gate(gate.clone()));
        let handle = gateway.initialize(&WalletConfig::default()).await.unwrap();

        let task = {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.sign_out(&handle).await })
        };

        gate.entered().await;
        assert!(!task.is_finished());
        gate.release();
        assert!(task.await.unwrap().is_ok());
    }
}
