//! `calico_ippool` resource adapter

use super::ResourceLifecycle;
use crate::error::{Diagnostics, ProviderError};
use crate::mapping::{expand_ip_pool, flatten_ip_pool};
use crate::meta::Meta;
use crate::model::IPPoolData;
use crate::plan::force_new_changes;
use crate::schema::{Block, IP_POOL_RESOURCE, ip_pool_schema};
use crate::validation::validate_ip_pool;
use calico_client::CalicoError;
use crds::IPPool;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Manages Calico IPPools through the shared client handle
#[derive(Debug, Clone)]
pub struct IPPoolResource {
    meta: Arc<Meta>,
}

impl IPPoolResource {
    pub fn new(meta: Arc<Meta>) -> Self {
        Self { meta }
    }

    async fn get_ip_pool(&self, name: &str) -> Result<IPPool, CalicoError> {
        debug!("{} get IPPool wait for lock", name);
        let _guard = self.meta.lock().await;
        debug!("{} get IPPool got lock, started", name);

        match self.meta.client().get_ip_pool(name).await {
            Ok(pool) => {
                debug!("{} get IPPool done", name);
                Ok(pool)
            }
            Err(e) => {
                debug!("get IPPool for {} errored: {}", name, e);
                Err(e)
            }
        }
    }
}

#[async_trait::async_trait]
impl ResourceLifecycle for IPPoolResource {
    type Data = IPPoolData;

    fn type_name(&self) -> &'static str {
        IP_POOL_RESOURCE
    }

    fn schema(&self) -> Block {
        ip_pool_schema()
    }

    fn validate(&self, data: &IPPoolData) -> Diagnostics {
        validate_ip_pool(data)
    }

    async fn exists(&self, data: &IPPoolData) -> Result<bool, ProviderError> {
        let name = data.pool_name();
        debug!("[IPPool exists: {}] Start", name);

        // Not found and transport failures come back the same way
        self.get_ip_pool(name).await?;

        debug!("[IPPool exists: {}] Done", name);
        Ok(true)
    }

    async fn read(&self, data: &mut IPPoolData) -> Result<(), ProviderError> {
        let name = data.pool_name().to_string();

        match self.exists(data).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                info!("IPPool {} not found, removing from state", name);
                data.id = None;
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        debug!("[IPPool read: {}] Started", name);
        let pool = self.get_ip_pool(&name).await?;
        flatten_ip_pool(&pool, data);
        debug!("[IPPool read: {}] Done", name);

        Ok(())
    }

    async fn create(&self, data: &mut IPPoolData) -> Result<(), ProviderError> {
        self.validate(data).into_result()?;

        // Computed; a configured value must not reach the API server
        data.metadata.resource_version.clear();
        let pool = expand_ip_pool(data);
        let name = data.metadata.name.clone();
        info!("Creating IPPool {} ({})", name, pool.spec.cidr);

        let created = self.meta.client().create_ip_pool(&pool).await.map_err(|e| {
            error!("Failed to create IPPool {}: {}", name, e);
            e
        })?;

        data.id = Some(created.metadata.name.unwrap_or(name));
        info!("Created IPPool {}", data.pool_name());
        Ok(())
    }

    async fn update(&self, prior: &IPPoolData, data: &mut IPPoolData) -> Result<(), ProviderError> {
        let requires_replace = force_new_changes(&self.schema(), prior, data)?;
        if !requires_replace.is_empty() {
            return Err(ProviderError::RequiresReplace(requires_replace));
        }
        self.validate(data).into_result()?;

        *data = std::mem::take(data).with_computed_from(prior);
        let pool = expand_ip_pool(data);
        let name = data.metadata.name.clone();
        info!("Updating IPPool {}", name);

        let updated = self.meta.client().update_ip_pool(&pool).await.map_err(|e| {
            error!("Failed to update IPPool {}: {}", name, e);
            e
        })?;

        data.id = Some(updated.metadata.name.unwrap_or(name));
        info!("Updated IPPool {}", data.pool_name());
        Ok(())
    }

    async fn delete(&self, data: &mut IPPoolData) -> Result<(), ProviderError> {
        let name = data.pool_name().to_string();
        info!("Deleting IPPool {}", name);

        self.meta.client().delete_ip_pool(&name).await.map_err(|e| {
            error!("Failed to delete IPPool {}: {}", name, e);
            e
        })?;

        data.id = None;
        info!("Deleted IPPool {}", name);
        Ok(())
    }
}
