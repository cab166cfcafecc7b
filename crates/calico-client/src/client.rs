//! Kubernetes-backed Calico client

use crate::calico_trait::CalicoClientTrait;
use crate::error::CalicoError;
use crds::IPPool;
use kube::api::{DeleteParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use std::path::Path;
use tracing::debug;

/// Calico IPPool client over the Kubernetes API
///
/// IPPools are cluster scoped, so the client always talks to the
/// cluster-wide endpoint.
#[derive(Clone)]
pub struct CalicoClient {
    api: Api<IPPool>,
}

impl std::fmt::Debug for CalicoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalicoClient").finish_non_exhaustive()
    }
}

impl CalicoClient {
    /// Wrap an existing Kubernetes client
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }

    /// Build a client from the inferred configuration (in-cluster or default kubeconfig)
    pub async fn try_default() -> Result<Self, CalicoError> {
        let config = Config::infer().await?;
        Ok(Self::new(Client::try_from(config)?))
    }

    /// Build a client from an explicit kubeconfig file
    ///
    /// `context` selects a kubeconfig context; the file's current context is
    /// used when it is `None`.
    pub async fn from_kubeconfig(path: &Path, context: Option<String>) -> Result<Self, CalicoError> {
        debug!("Loading kubeconfig from {}", path.display());

        let kubeconfig = Kubeconfig::read_from(path)?;
        let options = KubeConfigOptions {
            context,
            ..Default::default()
        };
        let config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;
        Ok(Self::new(Client::try_from(config)?))
    }

    /// Build a client from an optional kubeconfig path and context
    pub async fn connect(kubeconfig: Option<&Path>, context: Option<String>) -> Result<Self, CalicoError> {
        match kubeconfig {
            Some(path) => Self::from_kubeconfig(path, context).await,
            None if context.is_some() => {
                let options = KubeConfigOptions {
                    context,
                    ..Default::default()
                };
                let config = Config::from_kubeconfig(&options).await?;
                Ok(Self::new(Client::try_from(config)?))
            }
            None => Self::try_default().await,
        }
    }
}

#[async_trait::async_trait]
impl CalicoClientTrait for CalicoClient {
    async fn get_ip_pool(&self, name: &str) -> Result<IPPool, CalicoError> {
        debug!("Fetching IPPool {}", name);
        self.api
            .get_opt(name)
            .await?
            .ok_or_else(|| CalicoError::NotFound(name.to_string()))
    }

    async fn create_ip_pool(&self, pool: &IPPool) -> Result<IPPool, CalicoError> {
        debug!(
            "Creating IPPool {} ({})",
            pool.metadata.name.as_deref().unwrap_or_default(),
            pool.spec.cidr
        );
        Ok(self.api.create(&PostParams::default(), pool).await?)
    }

    async fn update_ip_pool(&self, pool: &IPPool) -> Result<IPPool, CalicoError> {
        let name = pool.metadata.name.as_deref().ok_or_else(|| {
            CalicoError::InvalidRequest("IPPool update requires metadata.name".to_string())
        })?;

        debug!(
            "Replacing IPPool {} at resourceVersion {}",
            name,
            pool.metadata.resource_version.as_deref().unwrap_or_default()
        );
        Ok(self.api.replace(name, &PostParams::default(), pool).await?)
    }

    async fn delete_ip_pool(&self, name: &str) -> Result<(), CalicoError> {
        debug!("Deleting IPPool {}", name);
        self.api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }
}
