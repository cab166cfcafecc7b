//! Command-line entry points driving the resource lifecycle.

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::meta::Meta;
use crate::model::IPPoolData;
use crate::provider::{apply, validate_and_plan};
use crate::resource::{IPPoolResource, ResourceLifecycle};
use crate::schema::ProviderSchema;
use crate::validation::validate_ip_pool;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Manage Calico IPPools on a Kubernetes cluster
#[derive(Debug, Parser)]
#[command(name = "terraform-provider-calico", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub config: ProviderConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the provider and resource schema as JSON
    Schema,

    /// Decode and validate a configuration file
    Validate {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the action needed to converge to a configuration file
    Plan {
        #[arg(short, long)]
        file: PathBuf,

        /// State file from a previous apply
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Converge the cluster to a configuration file
    Apply {
        #[arg(short, long)]
        file: PathBuf,

        /// State file, read before and written after the apply
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Print the current state of a pool
    Read { name: String },

    /// Report whether a pool exists
    Exists { name: String },

    /// Delete a pool
    Delete { name: String },
}

fn load(path: &Path) -> Result<IPPoolData, ProviderError> {
    let document = std::fs::read_to_string(path)?;
    IPPoolData::from_yaml(&document)
}

fn load_state(path: Option<&Path>) -> Result<Option<IPPoolData>, ProviderError> {
    match path {
        Some(path) if path.exists() => load(path).map(Some),
        _ => Ok(None),
    }
}

fn print_yaml(data: &IPPoolData) -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(data)?);
    Ok(())
}

/// Refresh prior state from the cluster; a removed pool comes back without an id
async fn refresh(resource: &IPPoolResource, prior: Option<IPPoolData>) -> Result<Option<IPPoolData>, ProviderError> {
    match prior {
        Some(mut state) if state.id.is_some() => {
            resource.read(&mut state).await?;
            Ok(Some(state))
        }
        other => Ok(other),
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Schema => {
                println!("{}", serde_json::to_string_pretty(&ProviderSchema::default())?);
                return Ok(());
            }
            Command::Validate { ref file } => {
                let data = load(file).with_context(|| format!("loading {}", file.display()))?;
                let diagnostics = validate_ip_pool(&data);
                for diagnostic in diagnostics.iter() {
                    println!("{diagnostic}");
                }
                info!(
                    "{}: {} diagnostic(s), {} error(s)",
                    file.display(),
                    diagnostics.len(),
                    diagnostics.errors().count()
                );
                if diagnostics.into_result()?.is_empty() {
                    println!("{} is valid", file.display());
                }
                return Ok(());
            }
            _ => {}
        }

        let meta = Arc::new(Meta::connect(&self.config).await?);
        let resource = IPPoolResource::new(meta);

        match self.command {
            Command::Plan { file, state } => {
                let proposed = load(&file).with_context(|| format!("loading {}", file.display()))?;
                let prior = refresh(&resource, load_state(state.as_deref())?).await?;

                let plan = validate_and_plan(&resource, prior.as_ref(), &proposed)?;
                println!("{} {}: {}", resource.type_name(), plan.planned.pool_name(), plan.action);
                for path in &plan.requires_replace {
                    println!("  # {path} forces replacement");
                }
            }
            Command::Apply { file, state } => {
                let proposed = load(&file).with_context(|| format!("loading {}", file.display()))?;
                let prior = refresh(&resource, load_state(state.as_deref())?).await?;

                let refreshed = apply(&resource, prior.as_ref(), &proposed).await?;
                if let Some(path) = &state {
                    std::fs::write(path, serde_yaml::to_string(&refreshed)?)
                        .with_context(|| format!("writing state to {}", path.display()))?;
                    info!("State written to {}", path.display());
                }
                print_yaml(&refreshed)?;
            }
            Command::Read { name } => {
                let mut data = IPPoolData::named(name);
                resource.read(&mut data).await?;
                if data.id.is_none() {
                    warn!("IPPool {} does not exist", data.pool_name());
                }
                print_yaml(&data)?;
            }
            Command::Exists { name } => match resource.exists(&IPPoolData::named(name)).await {
                Ok(found) => println!("{found}"),
                Err(e) if e.is_not_found() => println!("false"),
                Err(e) => return Err(e.into()),
            },
            Command::Delete { name } => {
                let mut data = IPPoolData::named(name);
                resource.delete(&mut data).await?;
                println!("{} deleted", data.pool_name());
            }
            Command::Schema | Command::Validate { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apply_with_state() {
        let cli = Cli::try_parse_from([
            "terraform-provider-calico",
            "--debug",
            "apply",
            "-f",
            "pool.yaml",
            "--state",
            "pool.state.yaml",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Command::Apply { file, state } => {
                assert_eq!(file, PathBuf::from("pool.yaml"));
                assert_eq!(state, Some(PathBuf::from("pool.state.yaml")));
            }
            other => panic!("expected apply, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_connection_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "terraform-provider-calico",
            "read",
            "pool-a",
            "--kubeconfig",
            "/tmp/kubeconfig",
            "--context",
            "kind-calico",
        ])
        .unwrap();

        assert_eq!(cli.config.kubeconfig, Some(PathBuf::from("/tmp/kubeconfig")));
        assert_eq!(cli.config.context.as_deref(), Some("kind-calico"));
        assert!(matches!(cli.command, Command::Read { ref name } if name == "pool-a"));
    }

    #[test]
    fn test_load_state_missing_file_is_empty() {
        let state = load_state(Some(Path::new("/nonexistent/pool.state.yaml"))).unwrap();
        assert_eq!(state, None);
        assert_eq!(load_state(None).unwrap(), None);
    }

    #[test]
    fn test_validate_requires_file() {
        assert!(Cli::try_parse_from(["terraform-provider-calico", "validate"]).is_err());
    }
}
