//! Calico Provider
//!
//! Manages Calico IPPool resources (`projectcalico.org/v3`) on a Kubernetes
//! cluster:
//! - validates configuration before any remote call
//! - plans create, in-place update or replacement
//! - applies the plan and refreshes state from the cluster

mod cli;
mod config;
mod error;
mod mapping;
mod meta;
mod model;
mod plan;
mod provider;
mod resource;
mod schema;
mod validation;

#[cfg(test)]
mod mapping_test;
#[cfg(test)]
mod validation_test;

use clap::Parser;
use cli::Cli;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // kube's rustls-tls needs a process-wide crypto provider
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        debug!("rustls crypto provider already installed");
    }

    cli.run().await
}
