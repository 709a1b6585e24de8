/*
[INPUT]:  Sign-in parameters from the gateway layer
[OUTPUT]: Serializable relayer request bodies
[POS]:    Data layer - relayer API request types
[UPDATE]: When relayer request schema changes
*/

use serde::{Deserialize, Serialize};

/// POST /fastauth/sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub contract_id: String,
    pub network_id: String,
    pub wallet_id: String,
    pub is_recovery: bool,
    pub request_id: String,
}

/// POST /fastauth/sign-out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutRequest {
    pub network_id: String,
    pub wallet_id: String,
    pub request_id: String,
}

/// Error body returned by the relayer on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayerErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RelayerErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
