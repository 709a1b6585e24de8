/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::Path;

use fastauth_app::AppConfig;

const NETWORKS: [&str; 2] = ["testnet", "mainnet"];

pub fn run_init(output: &Path, force: bool, interactive: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            output.display()
        );
    }

    let config = if interactive {
        prompt_config()?
    } else {
        AppConfig::default()
    };

    let yaml = config.to_yaml().context("serialize config")?;
    std::fs::write(output, yaml)
        .with_context(|| format!("write config to {}", output.display()))?;

    println!(
        "{} {}",
        style("Configuration written to").green(),
        style(output.display()).bold()
    );
    if config.has_placeholders() {
        println!(
            "{}",
            style("Some values are placeholders; edit them before signing in.").yellow()
        );
    }
    Ok(())
}

fn prompt_config() -> Result<AppConfig> {
    println!("{}", style("Fast Auth configuration").bold().cyan());
    let theme = ColorfulTheme::default();
    let mut config = AppConfig::default();

    let network = Select::with_theme(&theme)
        .with_prompt("Network")
        .items(&NETWORKS)
        .default(0)
        .interact()?;
    config.wallet.network_id = NETWORKS[network].to_string();

    config.wallet.relayer_url = Input::with_theme(&theme)
        .with_prompt("Relayer URL")
        .default(config.wallet.relayer_url)
        .interact_text()?;

    config.wallet.wallet_url = Input::with_theme(&theme)
        .with_prompt("Wallet URL")
        .default(config.wallet.wallet_url)
        .interact_text()?;

    config.wallet.contract_id = Input::with_theme(&theme)
        .with_prompt("Contract ID")
        .default(config.wallet.contract_id)
        .interact_text()?;

    Ok(config)
}
