/*
[INPUT]:  Relayer/wallet URLs and an email from the environment
[OUTPUT]: Printed gateway results for one sign-in/sign-out cycle
[POS]:    Examples - relayer gateway demonstration
[UPDATE]: When the gateway contract changes
*/

use fastauth_adapter::*;

/// Example: drive the relayer gateway directly
///
/// FASTAUTH_RELAYER_URL=http://localhost:3030 \
/// FASTAUTH_EMAIL=user@example.com cargo run --example relayer_sign_in
#[tokio::main]
async fn main() {
    println!("=== Fast Auth Relayer Example ===\n");

    let relayer_url =
        std::env::var("FASTAUTH_RELAYER_URL").unwrap_or_else(|_| "http://localhost:3030".into());
    let email = std::env::var("FASTAUTH_EMAIL").unwrap_or_else(|_| "user@example.com".into());
    let config = WalletConfig::new(
        DEFAULT_NETWORK_ID,
        relayer_url,
        "https://wallet.testnet.example",
        "contract.testnet",
    );

    let gateway = match RelayerGateway::new() {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Failed to create gateway: {}", e);
            return;
        }
    };

    let handle = match gateway.initialize(&config).await {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("✗ {}", e);
            return;
        }
    };
    println!("✓ Relayer reachable at {}", handle.relayer_url());

    match gateway.sign_in(&handle, &email, &config.contract_id).await {
        Ok(()) => println!("✓ Signed in as {}", email),
        Err(GatewayError::AuthFailed(failure)) => {
            println!("✗ Sign in refused: {} ({})", failure.reason, failure.kind);
            return;
        }
        Err(e) => {
            println!("✗ {}", e);
            return;
        }
    }

    match gateway.sign_out(&handle).await {
        Ok(()) => println!("✓ Signed out"),
        Err(e) => println!("✗ {}", e),
    }
}
