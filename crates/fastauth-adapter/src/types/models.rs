/*
[INPUT]:  Wallet provider settings and sign-in results
[OUTPUT]: Session and configuration data structures
[POS]:    Data layer - core domain models
[UPDATE]: When session fields or provider settings change
*/

use serde::{Deserialize, Serialize};

pub const DEFAULT_NETWORK_ID: &str = "testnet";
pub const DEFAULT_WALLET_ID: &str = "fast-auth-wallet";

/// Wallet provider settings forwarded verbatim to the gateway.
///
/// None of these values are interpreted by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "default_network_id")]
    pub network_id: String,
    pub relayer_url: String,
    pub wallet_url: String,
    pub contract_id: String,
    /// Wallet module selected from the provider
    #[serde(default = "default_wallet_id")]
    pub wallet_id: String,
}

impl WalletConfig {
    pub fn new(
        network_id: impl Into<String>,
        relayer_url: impl Into<String>,
        wallet_url: impl Into<String>,
        contract_id: impl Into<String>,
    ) -> Self {
        Self {
            network_id: network_id.into(),
            relayer_url: relayer_url.into(),
            wallet_url: wallet_url.into(),
            contract_id: contract_id.into(),
            wallet_id: default_wallet_id(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_NETWORK_ID,
            "YOUR_RELAYER_URL",
            "YOUR_WALLET_URL",
            "YOUR_CONTRACT_ID",
        )
    }
}

fn default_network_id() -> String {
    DEFAULT_NETWORK_ID.to_string()
}

fn default_wallet_id() -> String {
    DEFAULT_WALLET_ID.to_string()
}

/// Authenticated identity bound to a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email the user signed in with
    pub identifier: String,
    #[serde(rename = "contractId")]
    pub contract_id: String,
}

impl Session {
    pub fn new(identifier: impl Into<String>, contract_id: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            contract_id: contract_id.into(),
        }
    }
}
