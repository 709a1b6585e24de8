/*
[INPUT]:  CLI arguments, YAML configuration file, FASTAUTH_* env, OS shutdown signals
[OUTPUT]: Fast-auth sign-in session with graceful sign-out
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fastauth_adapter::{
    ClientConfig, ConnectionStatus, MockWalletGateway, RelayerGateway, WalletGateway,
};
use fastauth_app::presentation::{status_color, status_icon, status_label};
use fastauth_app::{AppConfig, AuthController};

use crate::cli::sign_in::SignInOptions;

#[derive(Parser, Debug)]
#[command(name = "fastauth-app", version, about = "Email-based fast auth wallet sign-in")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize the wallet and sign in with an email address
    SignIn {
        #[arg(long)]
        email: Option<String>,
        #[arg(long = "contract-id")]
        contract_id: Option<String>,
        /// Sign out immediately after signing in
        #[arg(long)]
        once: bool,
        /// Use the in-memory gateway instead of the relayer
        #[arg(long)]
        mock: bool,
    },
    /// Validate configuration and exit
    Check,
    /// Write a configuration file
    Init {
        #[arg(long, value_name = "PATH", default_value = "fastauth.yaml")]
        output: PathBuf,
        #[arg(long)]
        force: bool,
        /// Write defaults without prompting
        #[arg(long = "non-interactive")]
        non_interactive: bool,
    },
    /// Print the status badge legend
    Statuses,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Command::Init {
        output,
        force,
        non_interactive,
    } = &args.command
    {
        return cli::init::run_init(output, *force, !non_interactive);
    }

    let config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    let log_level = args.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(log_level)?;

    info!(
        config_path = ?args.config_path,
        network_id = %config.wallet.network_id,
        "starting fastauth-app"
    );

    match args.command {
        Command::Check => run_check(&config),
        Command::Statuses => {
            print_statuses();
            Ok(())
        }
        Command::SignIn {
            email,
            contract_id,
            once,
            mock,
        } => {
            let options = SignInOptions {
                email,
                contract_id,
                once,
            };
            if mock {
                run_with_gateway(MockWalletGateway::new(), &config, options).await
            } else {
                let gateway = RelayerGateway::with_config(ClientConfig::default())
                    .context("build relayer gateway")?;
                run_with_gateway(gateway, &config, options).await
            }
        }
        Command::Init { .. } => Ok(()),
    }
}

async fn run_with_gateway<G>(gateway: G, config: &AppConfig, options: SignInOptions) -> Result<()>
where
    G: WalletGateway + 'static,
{
    let mut controller = AuthController::new(gateway);
    if let Some(timeout) = config.call_timeout() {
        controller = controller.with_call_timeout(timeout);
    }
    let controller = Arc::new(controller);

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    cli::sign_in::run_sign_in(controller, config, options, shutdown).await
}

fn run_check(config: &AppConfig) -> Result<()> {
    println!("{}", style("Configuration").bold());
    println!("  network_id:  {}", config.wallet.network_id);
    println!("  relayer_url: {}", config.wallet.relayer_url);
    println!("  wallet_url:  {}", config.wallet.wallet_url);
    println!("  contract_id: {}", config.wallet.contract_id);
    match config.call_timeout_secs {
        Some(secs) => println!("  timeout:     {secs}s"),
        None => println!("  timeout:     none"),
    }

    if config.has_placeholders() {
        warn!("configuration still contains placeholder values");
        println!("{}", style("Placeholder values present").yellow());
    } else {
        println!("{}", style("Configuration OK").green());
    }
    Ok(())
}

fn print_statuses() {
    for status in ConnectionStatus::ALL {
        println!(
            "{} {:<16} {}",
            status_icon(status),
            status_label(status),
            status_color(status)
        );
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
