/*
[INPUT]:  Wallet configuration, identifier and contract id
[OUTPUT]: Gateway handle and settled sign-in/sign-out results
[POS]:    Gateway layer - wallet provider abstraction
[UPDATE]: When the provider capability set changes
*/

use async_trait::async_trait;

use crate::error::Result;
use crate::types::WalletConfig;

/// Trait over an external wallet-authentication provider
///
/// Implementations wrap whatever SDK or service performs the actual
/// authentication. Every call suspends until the provider settles and
/// reports failures as [`crate::GatewayError`]; nothing raw leaks out.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// Capability returned by [`WalletGateway::initialize`]; shared read-only
    /// by every later call.
    type Handle: Send + Sync + 'static;

    /// Set up the provider. Config values are passed through untouched.
    async fn initialize(&self, config: &WalletConfig) -> Result<Self::Handle>;

    /// Establish an external session for `identifier` on `contract_id`.
    ///
    /// The gateway does not track the session; the caller does.
    async fn sign_in(&self, handle: &Self::Handle, identifier: &str, contract_id: &str)
    -> Result<()>;

    /// Best-effort remote sign-out
    async fn sign_out(&self, handle: &Self::Handle) -> Result<()>;
}
