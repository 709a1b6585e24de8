/*
[INPUT]:  AuthController, AppConfig, optional email and shutdown token
[OUTPUT]: Live status lines and a signed-in session until shutdown
[POS]:    CLI sign-in flow
[UPDATE]: When the sign-in walkthrough or status output changes
*/

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use fastauth_adapter::WalletGateway;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use fastauth_app::presentation::render_status_line;
use fastauth_app::{
    AppConfig, AuthController, ControllerError, SignOutOutcome, sanitize_input, validate_email,
};

pub struct SignInOptions {
    pub email: Option<String>,
    pub contract_id: Option<String>,
    /// Sign out right after a successful sign-in instead of waiting for shutdown
    pub once: bool,
}

pub async fn run_sign_in<G>(
    controller: Arc<AuthController<G>>,
    config: &AppConfig,
    options: SignInOptions,
    shutdown: CancellationToken,
) -> Result<()>
where
    G: WalletGateway + 'static,
{
    println!("{}", style("Fast Auth sign in").bold().cyan());
    let stop_watcher = CancellationToken::new();
    let watcher = spawn_status_watcher(&controller, stop_watcher.clone());

    let result = sign_in_flow(&controller, config, options, shutdown).await;

    stop_watcher.cancel();
    if let Err(err) = watcher.await {
        tracing::warn!(error = %err, "status watcher task failed");
    }
    result
}

async fn sign_in_flow<G>(
    controller: &AuthController<G>,
    config: &AppConfig,
    options: SignInOptions,
    shutdown: CancellationToken,
) -> Result<()>
where
    G: WalletGateway + 'static,
{
    let Some(started) = until_shutdown(&shutdown, controller.start(&config.wallet)).await else {
        info!("shutdown requested during initialization");
        return Ok(());
    };
    started.map_err(user_facing)?;

    let email = match options.email {
        Some(email) => sanitize_input(&email),
        None => prompt_email()?,
    };
    let contract_id = options
        .contract_id
        .unwrap_or_else(|| config.wallet.contract_id.clone());

    let Some(signed_in) = until_shutdown(&shutdown, controller.sign_in(&email, &contract_id)).await
    else {
        info!("shutdown requested during sign in");
        return Ok(());
    };
    signed_in.map_err(user_facing)?;

    if !options.once {
        println!("{}", style("Signed in. Press Ctrl-C to sign out.").dim());
        shutdown.cancelled().await;
        info!("shutdown requested; signing out");
    }

    match controller.sign_out().await {
        SignOutOutcome::SignedOutLocally(err) => {
            println!(
                "{}",
                style(format!("Remote sign out failed ({err}); local session cleared.")).yellow()
            );
        }
        SignOutOutcome::SignedOut | SignOutOutcome::NotConnected => {}
    }
    Ok(())
}

/// Drive `call` unless shutdown fires first; a dropped controller call settles to `Error`.
async fn until_shutdown<F: Future>(shutdown: &CancellationToken, call: F) -> Option<F::Output> {
    tokio::select! {
        output = call => Some(output),
        _ = shutdown.cancelled() => None,
    }
}

fn user_facing(err: ControllerError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

fn prompt_email() -> Result<String> {
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if validate_email(&sanitize_input(input)) {
                Ok(())
            } else {
                Err("Please enter a valid email address")
            }
        })
        .interact_text()?;
    Ok(sanitize_input(&email))
}

/// Print every published snapshot; on `stop`, flush the latest one and exit.
fn spawn_status_watcher<G>(controller: &AuthController<G>, stop: CancellationToken) -> JoinHandle<()>
where
    G: WalletGateway + 'static,
{
    let mut updates = controller.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    println!("{}", render_status_line(&snapshot));
                }
                _ = stop.cancelled() => {
                    if updates.has_changed().unwrap_or(false) {
                        let snapshot = updates.borrow_and_update().clone();
                        println!("{}", render_status_line(&snapshot));
                    }
                    break;
                }
            }
        }
    })
}
