/*
[INPUT]:  HTTP configuration (timeouts) and WalletConfig URLs
[OUTPUT]: Relayer-backed WalletGateway with normalized errors
[POS]:    Relayer layer - core client implementation
[UPDATE]: When relayer endpoints, payloads or error mapping change
*/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::error::{AuthFailure, GatewayError, Result};
use crate::gateway::WalletGateway;
use crate::types::{AuthFailureKind, RelayerErrorBody, SignInRequest, SignOutRequest, WalletConfig};

// Relative so a path prefix on the configured relayer URL survives `Url::join`
const HEALTH_ENDPOINT: &str = "health";
const SIGN_IN_ENDPOINT: &str = "fastauth/sign-in";
const SIGN_OUT_ENDPOINT: &str = "fastauth/sign-out";

/// Status some relayers use when the user closes the wallet prompt
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Resolved relayer endpoints, produced once by `initialize`
#[derive(Debug, Clone)]
pub struct RelayerHandle {
    relayer_url: Url,
    wallet_url: Url,
    network_id: String,
    wallet_id: String,
}

impl RelayerHandle {
    pub fn relayer_url(&self) -> &Url {
        &self.relayer_url
    }

    pub fn wallet_url(&self) -> &Url {
        &self.wallet_url
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    fn endpoint(&self, endpoint: &str) -> Result<Url> {
        self.relayer_url
            .join(endpoint)
            .map_err(|e| GatewayError::InitFailed(format!("Invalid relayer endpoint: {e}")))
    }
}

/// Gateway that talks to a fast-auth relayer over HTTP
#[derive(Debug, Clone)]
pub struct RelayerGateway {
    http_client: Client,
    config: ClientConfig,
}

impl RelayerGateway {
    /// Create a new gateway with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new gateway with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GatewayError::InitFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client.request(method, url)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Response> {
        self.request(Method::POST, url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::timeout(self.config.timeout)
        } else {
            GatewayError::from(err)
        }
    }
}

#[async_trait]
impl WalletGateway for RelayerGateway {
    type Handle = RelayerHandle;

    /// GET {relayer_url}/health
    async fn initialize(&self, config: &WalletConfig) -> Result<RelayerHandle> {
        let relayer_url = with_trailing_slash(parse_url("relayer", &config.relayer_url)?);
        let wallet_url = parse_url("wallet", &config.wallet_url)?;

        let handle = RelayerHandle {
            relayer_url,
            wallet_url,
            network_id: config.network_id.clone(),
            wallet_id: config.wallet_id.clone(),
        };

        let url = handle.endpoint(HEALTH_ENDPOINT)?;
        debug!(url = %url, "probing relayer");
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| GatewayError::InitFailed(format!("Relayer unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(GatewayError::InitFailed(format!(
                "Relayer health check returned {status}: {message}"
            )));
        }

        info!(
            relayer = %handle.relayer_url,
            network_id = %handle.network_id,
            wallet_id = %handle.wallet_id,
            "relayer gateway initialized"
        );
        Ok(handle)
    }

    /// POST {relayer_url}/fastauth/sign-in
    async fn sign_in(
        &self,
        handle: &RelayerHandle,
        identifier: &str,
        contract_id: &str,
    ) -> Result<()> {
        let body = SignInRequest {
            email: identifier.to_string(),
            contract_id: contract_id.to_string(),
            network_id: handle.network_id.clone(),
            wallet_id: handle.wallet_id.clone(),
            is_recovery: false,
            request_id: Uuid::new_v4().to_string(),
        };

        let url = handle.endpoint(SIGN_IN_ENDPOINT)?;
        debug!(request_id = %body.request_id, contract_id, "sending sign-in");
        let response = self.post_json(url, &body).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = error_message(response).await;
        warn!(%status, %message, "relayer rejected sign-in");
        Err(GatewayError::AuthFailed(classify_response(status, message)))
    }

    /// POST {relayer_url}/fastauth/sign-out
    async fn sign_out(&self, handle: &RelayerHandle) -> Result<()> {
        let body = SignOutRequest {
            network_id: handle.network_id.clone(),
            wallet_id: handle.wallet_id.clone(),
            request_id: Uuid::new_v4().to_string(),
        };

        let url = handle.endpoint(SIGN_OUT_ENDPOINT)?;
        let response = self
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::SignOutFailed(format!("Network error: {e}")))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = error_message(response).await;
            Err(GatewayError::SignOutFailed(format!("{status}: {message}")))
        }
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| GatewayError::InitFailed(format!("Invalid {name} URL '{raw}': {e}")))
}

/// `https://host/relayer` and `https://host/relayer/` both mount endpoints under `/relayer/`
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Map a non-2xx relayer response onto a failure kind.
///
/// The status code decides when it is specific; otherwise the message is
/// classified the same way raw SDK messages are.
fn classify_response(status: StatusCode, message: String) -> AuthFailure {
    let kind = match status.as_u16() {
        400 | 422 => AuthFailureKind::InvalidInput,
        401 | 403 => AuthFailureKind::ProviderRejected,
        CLIENT_CLOSED_REQUEST => AuthFailureKind::UserCancelled,
        502..=504 => AuthFailureKind::Network,
        _ => AuthFailureKind::classify(&message),
    };
    AuthFailure::new(kind, message)
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<RelayerErrorBody>(&text)
        .ok()
        .and_then(RelayerErrorBody::into_message)
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| format!("relayer returned {}", status.as_u16()))
}
