/*
[INPUT]:  WalletGateway, WalletConfig, user email and contract id
[OUTPUT]: Connection status, session and last error for the presentation layer
[POS]:    Controller layer - orchestrates the sign-in/sign-out lifecycle
[UPDATE]: When controller operations, guards or transitions change
*/

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use fastauth_adapter::{
    AuthFailureKind, ConnectionStatus, GatewayError, Session, WalletConfig, WalletGateway,
};
use serde_json::json;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::email::validate_email;
use crate::error::ControllerError;
use crate::oplog::{self, OperationLog};
use crate::state_machine::{AuthEvent, StatusModel};

/// Read-only view of the controller state after the last settled step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub status: ConnectionStatus,
    pub session: Option<Session>,
    pub last_error: Option<ControllerError>,
}

impl AuthSnapshot {
    /// A gateway call is outstanding (replaces a UI loading flag)
    pub fn is_busy(&self) -> bool {
        self.status.is_pending()
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// User-facing text for `last_error`
    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(ControllerError::user_message)
    }
}

/// Result of [`AuthController::sign_out`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutOutcome {
    /// Nothing to do: not connected, or a sign-out is already running
    NotConnected,
    SignedOut,
    /// Remote sign-out failed; local state was cleared anyway
    SignedOutLocally(GatewayError),
}

struct Inner<H> {
    model: StatusModel,
    session: Option<Session>,
    last_error: Option<ControllerError>,
    handle: Option<Arc<H>>,
    signing_out: bool,
}

impl<H> Inner<H> {
    fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            status: self.model.state(),
            session: self.session.clone(),
            last_error: self.last_error.clone(),
        }
    }

    fn status(&self) -> ConnectionStatus {
        self.model.state()
    }
}

/// Stateful orchestrator between a presentation layer and a wallet gateway.
///
/// Every check-then-transition step runs inside one mutex section and the
/// lock is never held across a gateway call. The `Initializing` and
/// `Connecting` statuses act as the single-flight guards: re-entrant calls
/// are rejected, never queued.
pub struct AuthController<G: WalletGateway> {
    gateway: Arc<G>,
    inner: Mutex<Inner<G::Handle>>,
    updates: watch::Sender<AuthSnapshot>,
    log: OperationLog,
    call_timeout: Option<Duration>,
}

impl<G: WalletGateway> AuthController<G> {
    pub fn new(gateway: G) -> Self {
        Self::from_shared(Arc::new(gateway))
    }

    /// Build a controller over a gateway the caller keeps a handle to
    pub fn from_shared(gateway: Arc<G>) -> Self {
        let (updates, _) = watch::channel(AuthSnapshot::default());
        Self {
            gateway,
            inner: Mutex::new(Inner {
                model: StatusModel::new(),
                session: None,
                last_error: None,
                handle: None,
                signing_out: false,
            }),
            updates,
            log: OperationLog::global(),
            call_timeout: None,
        }
    }

    /// Record operations into `log` instead of the process-wide log
    pub fn with_operation_log(mut self, log: OperationLog) -> Self {
        self.log = log;
        self
    }

    /// Abandon gateway calls that have not settled after `timeout`
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn operation_log(&self) -> &OperationLog {
        &self.log
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.lock().snapshot()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.lock().status()
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn last_error(&self) -> Option<ControllerError> {
        self.lock().last_error.clone()
    }

    /// Receive a fresh snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.updates.subscribe()
    }

    /// Initialize the gateway: `Disconnected | Ready | Error -> Initializing`,
    /// then `Ready` or `Error`.
    pub async fn start(&self, config: &WalletConfig) -> Result<(), ControllerError> {
        self.with_inner(|inner| {
            let status = inner.status();
            match status {
                ConnectionStatus::Initializing => return Err(ControllerError::InitInProgress),
                ConnectionStatus::Connecting => return Err(ControllerError::AlreadyInProgress),
                ConnectionStatus::Connected => return Err(ControllerError::AlreadyConnected),
                _ => {}
            }
            inner
                .model
                .transition(AuthEvent::Start)
                .map_err(|_| ControllerError::InvalidTransition { status })?;
            inner.handle = None;
            inner.last_error = None;
            Ok(())
        })?;

        info!(network_id = %config.network_id, wallet_id = %config.wallet_id, "initializing wallet");
        let mut pending = PendingCall::new(self, abandon_init::<G::Handle>);
        let result = self.settle(self.gateway.initialize(config)).await;
        pending.disarm();

        match result {
            Ok(handle) => {
                self.with_inner(|inner| {
                    inner.model.apply(AuthEvent::InitSucceeded);
                    inner.handle = Some(Arc::new(handle));
                });
                self.log.record(
                    oplog::WALLET_INITIALIZED,
                    json!({ "success": true, "networkId": config.network_id }),
                );
                info!(network_id = %config.network_id, "wallet ready");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "wallet initialization failed");
                self.log.record(
                    oplog::WALLET_INITIALIZED,
                    json!({ "success": false, "error": err.to_string() }),
                );
                Err(self.fail(AuthEvent::InitFailed, err))
            }
        }
    }

    /// Sign in with `email` against `contract_id`.
    ///
    /// Rejections (no status change): `AlreadyInProgress` while connecting,
    /// `AlreadyConnected` while connected, `Validation` for a malformed email,
    /// `NotInitialized` without a ready gateway.
    pub async fn sign_in(&self, email: &str, contract_id: &str) -> Result<Session, ControllerError> {
        let handle = self.with_inner(|inner| {
            match inner.status() {
                ConnectionStatus::Connecting => return Err(ControllerError::AlreadyInProgress),
                ConnectionStatus::Connected => return Err(ControllerError::AlreadyConnected),
                _ => {}
            }
            if !validate_email(email) {
                return Err(ControllerError::Validation(email.to_string()));
            }
            let handle = match (inner.status(), &inner.handle) {
                (ConnectionStatus::Ready | ConnectionStatus::Error, Some(handle)) => handle.clone(),
                _ => return Err(ControllerError::NotInitialized),
            };
            inner.model.apply(AuthEvent::SignInRequested);
            inner.last_error = None;
            Ok(handle)
        })?;

        self.log.record(oplog::SIGN_IN_ATTEMPT, json!({ "email": email }));
        info!(email, contract_id, "signing in");

        let mut pending = PendingCall::new(self, abandon_sign_in::<G::Handle>);
        let result = self
            .settle(self.gateway.sign_in(&handle, email, contract_id))
            .await;
        pending.disarm();

        match result {
            Ok(()) => {
                let session = Session::new(email, contract_id);
                self.with_inner(|inner| {
                    inner.model.apply(AuthEvent::SignInSucceeded);
                    inner.session = Some(session.clone());
                });
                self.log.record(oplog::SIGN_IN_SUCCESS, json!({ "email": email }));
                info!(email, contract_id, "signed in");
                Ok(session)
            }
            Err(err) => {
                warn!(email, error = %err, "sign in failed");
                self.log.record(
                    oplog::SIGN_IN_FAILED,
                    json!({ "email": email, "error": err.to_string() }),
                );
                Err(self.fail(AuthEvent::SignInFailed, err))
            }
        }
    }

    /// Sign out. Local state always reaches `Disconnected`, whatever the
    /// gateway reports.
    pub async fn sign_out(&self) -> SignOutOutcome {
        let handle = self.with_inner(|inner| {
            if inner.status() != ConnectionStatus::Connected || inner.signing_out {
                return None;
            }
            inner.signing_out = true;
            Some(inner.handle.clone())
        });
        let Some(handle) = handle else {
            return SignOutOutcome::NotConnected;
        };

        self.log.record(oplog::SIGN_OUT_ATTEMPT, json!({}));

        let mut pending = PendingCall::new(self, finish_sign_out::<G::Handle>);
        let result = match handle {
            Some(handle) => self.settle(self.gateway.sign_out(&handle)).await,
            None => Ok(()),
        };
        pending.disarm();
        self.with_inner(finish_sign_out::<G::Handle>);

        match result {
            Ok(()) => {
                self.log.record(oplog::SIGN_OUT_SUCCESS, json!({}));
                info!("signed out");
                SignOutOutcome::SignedOut
            }
            Err(err) => {
                warn!(error = %err, "remote sign out failed; cleared local session");
                self.log
                    .record(oplog::SIGN_OUT_FAILED, json!({ "error": err.to_string() }));
                SignOutOutcome::SignedOutLocally(err)
            }
        }
    }

    /// `Error -> Disconnected`; rejected from any other status
    pub fn clear_error(&self) -> Result<(), ControllerError> {
        self.with_inner(|inner| {
            let status = inner.status();
            inner
                .model
                .transition(AuthEvent::ClearError)
                .map_err(|_| ControllerError::InvalidTransition { status })?;
            inner.last_error = None;
            Ok::<(), ControllerError>(())
        })?;
        self.log.record(oplog::ERROR_CLEARED, json!({}));
        Ok(())
    }

    fn fail(&self, event: AuthEvent, err: GatewayError) -> ControllerError {
        let err = ControllerError::Gateway(err);
        self.with_inner(|inner| {
            inner.model.apply(event);
            inner.last_error = Some(err.clone());
        });
        err
    }

    async fn settle<T>(
        &self,
        call: impl Future<Output = fastauth_adapter::Result<T>>,
    ) -> fastauth_adapter::Result<T> {
        match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| Err(GatewayError::timeout(limit))),
            None => call.await,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<G::Handle>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` under the state lock and publish the resulting snapshot
    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner<G::Handle>) -> R) -> R {
        let mut inner = self.lock();
        let result = f(&mut inner);
        let snapshot = inner.snapshot();
        self.updates.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
        result
    }
}

/// Restores a consistent status when a caller drops an operation future
/// before its gateway call settles.
struct PendingCall<'a, G: WalletGateway> {
    controller: &'a AuthController<G>,
    on_abandon: fn(&mut Inner<G::Handle>),
    armed: bool,
}

impl<'a, G: WalletGateway> PendingCall<'a, G> {
    fn new(controller: &'a AuthController<G>, on_abandon: fn(&mut Inner<G::Handle>)) -> Self {
        Self {
            controller,
            on_abandon,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<G: WalletGateway> Drop for PendingCall<'_, G> {
    fn drop(&mut self) {
        if self.armed {
            warn!("gateway call abandoned before settling");
            self.controller.with_inner(self.on_abandon);
        }
    }
}

fn abandon_init<H>(inner: &mut Inner<H>) {
    inner.model.apply(AuthEvent::InitFailed);
    inner.last_error = Some(ControllerError::Gateway(GatewayError::InitFailed(
        "initialization abandoned".to_string(),
    )));
}

fn abandon_sign_in<H>(inner: &mut Inner<H>) {
    inner.model.apply(AuthEvent::SignInFailed);
    inner.last_error = Some(ControllerError::Gateway(GatewayError::auth(
        AuthFailureKind::UserCancelled,
        "sign in abandoned",
    )));
}

fn finish_sign_out<H>(inner: &mut Inner<H>) {
    inner.model.apply(AuthEvent::SignOutCompleted);
    inner.session = None;
    inner.signing_out = false;
}
