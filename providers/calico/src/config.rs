//! Provider configuration.

use clap::Args;
use std::path::PathBuf;

/// Connection settings for the Kubernetes API hosting the Calico resources
///
/// Without a kubeconfig path the configuration is inferred: in-cluster
/// service account first, then the standard kubeconfig discovery
/// (`KUBECONFIG`, `~/.kube/config`).
#[derive(Debug, Clone, Default, Args)]
pub struct ProviderConfig {
    /// Path to the kubeconfig file
    #[arg(long, env = "CALICO_KUBECONFIG", global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, env = "CALICO_CONTEXT", global = true)]
    pub context: Option<String>,
}
