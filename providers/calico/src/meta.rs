//! Shared provider state handed to every resource operation.

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use calico_client::{CalicoClient, CalicoClientTrait};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

/// Client handle plus the lock serializing remote reads made through it
pub struct Meta {
    client: Box<dyn CalicoClientTrait>,
    read_lock: Mutex<()>,
}

impl std::fmt::Debug for Meta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Meta").finish_non_exhaustive()
    }
}

impl Meta {
    /// Wrap a client
    pub fn new(client: impl CalicoClientTrait + 'static) -> Self {
        Self {
            client: Box::new(client),
            read_lock: Mutex::new(()),
        }
    }

    /// Connect to the cluster described by `config`
    pub async fn connect(config: &ProviderConfig) -> Result<Self, ProviderError> {
        info!(
            "Connecting to Kubernetes (kubeconfig: {}, context: {})",
            config
                .kubeconfig
                .as_ref()
                .map_or_else(|| "inferred".to_string(), |p| p.display().to_string()),
            config.context.as_deref().unwrap_or("current")
        );

        let client = CalicoClient::connect(config.kubeconfig.as_deref(), config.context.clone()).await?;
        Ok(Self::new(client))
    }

    /// Calico API client
    pub fn client(&self) -> &dyn CalicoClientTrait {
        self.client.as_ref()
    }

    /// Acquire the read lock; released when the guard drops
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.read_lock.lock().await
    }
}
