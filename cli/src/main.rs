mod cli;
mod commands;
mod sources;
mod table_theme;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::handle_command;
use parcel_core::crypto::init_crypto;
use parcel_core::instrumentation::init_instrumentation;
use parcel_core::kubernetes::config_maps::ConfigMaps;
use parcel_core::kubernetes::create_kube_client;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    init_crypto();

    let cli = Cli::parse();

    if cli.verbose {
        init_instrumentation("debug");
    } else {
        init_instrumentation("info");
    }

    let client = create_kube_client(cli.kubeconfig.as_deref(), cli.context.as_deref())
        .await
        .context("Failed to create Kubernetes client")?;

    debug!("Operating in namespace {}", cli.namespace);

    let config_maps = ConfigMaps::for_client(client, Arc::new(cli.options()));

    handle_command(&config_maps, &cli).await
}
