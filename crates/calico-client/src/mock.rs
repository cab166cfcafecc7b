//! Mock CalicoClient for unit testing
//!
//! Stores pools in memory and behaves like the API server where the provider
//! depends on it: resource versions are assigned on every write, creates
//! that are duplicates or carry a resource version are rejected, stale
//! updates conflict, and missing names fail with `NotFound`.

use crate::calico_trait::CalicoClientTrait;
use crate::error::CalicoError;
use crds::IPPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock CalicoClient for testing
#[derive(Clone, Debug, Default)]
pub struct MockCalicoClient {
    pools: Arc<Mutex<HashMap<String, IPPool>>>,
    // Last assigned resource version
    version: Arc<Mutex<u64>>,
    // Error message returned by the next call, if any
    next_error: Arc<Mutex<Option<String>>>,
    // Operation log, e.g. "get:pool-a"
    calls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCalicoClient {
    /// Create an empty mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pool to the mock store (for test setup)
    ///
    /// A resource version is assigned as if the pool had been created.
    pub fn add_ip_pool(&self, mut pool: IPPool) {
        let name = pool.metadata.name.clone().unwrap_or_default();
        pool.metadata.resource_version = Some(self.next_version());
        lock(&self.pools).insert(name, pool);
    }

    /// Current stored copy of a pool
    pub fn ip_pool(&self, name: &str) -> Option<IPPool> {
        lock(&self.pools).get(name).cloned()
    }

    /// Make the next call fail with an API error carrying `message`
    pub fn fail_next(&self, message: impl Into<String>) {
        *lock(&self.next_error) = Some(message.into());
    }

    /// Operations issued so far, in order
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    fn next_version(&self) -> String {
        let mut version = lock(&self.version);
        *version += 1;
        version.to_string()
    }

    fn record(&self, op: &str, name: &str) -> Result<(), CalicoError> {
        lock(&self.calls).push(format!("{op}:{name}"));
        match lock(&self.next_error).take() {
            Some(message) => Err(CalicoError::Api(message)),
            None => Ok(()),
        }
    }
}

fn pool_name(pool: &IPPool) -> Result<String, CalicoError> {
    pool.metadata
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CalicoError::InvalidRequest("metadata.name: Required value: name is required".to_string()))
}

#[async_trait::async_trait]
impl CalicoClientTrait for MockCalicoClient {
    async fn get_ip_pool(&self, name: &str) -> Result<IPPool, CalicoError> {
        self.record("get", name)?;
        self.ip_pool(name)
            .ok_or_else(|| CalicoError::NotFound(name.to_string()))
    }

    async fn create_ip_pool(&self, pool: &IPPool) -> Result<IPPool, CalicoError> {
        let name = pool_name(pool)?;
        self.record("create", &name)?;

        if pool.metadata.resource_version.as_deref().is_some_and(|v| !v.is_empty()) {
            return Err(CalicoError::InvalidRequest(
                "resourceVersion should not be set on objects to be created".to_string(),
            ));
        }

        let mut pools = lock(&self.pools);
        if pools.contains_key(&name) {
            return Err(CalicoError::AlreadyExists(name));
        }

        let mut stored = pool.clone();
        stored.metadata.resource_version = Some(self.next_version());
        pools.insert(name, stored.clone());
        Ok(stored)
    }

    async fn update_ip_pool(&self, pool: &IPPool) -> Result<IPPool, CalicoError> {
        let name = pool_name(pool)?;
        self.record("update", &name)?;

        let mut pools = lock(&self.pools);
        let current = pools
            .get(&name)
            .ok_or_else(|| CalicoError::NotFound(name.clone()))?;

        match pool.metadata.resource_version.as_deref() {
            None | Some("") => {
                return Err(CalicoError::InvalidRequest(
                    "metadata.resourceVersion: Invalid value: 0x0: must be specified for an update".to_string(),
                ));
            }
            Some(version) if Some(version) != current.metadata.resource_version.as_deref() => {
                return Err(CalicoError::Conflict(name));
            }
            Some(_) => {}
        }

        let mut stored = pool.clone();
        stored.metadata.resource_version = Some(self.next_version());
        pools.insert(name, stored.clone());
        Ok(stored)
    }

    async fn delete_ip_pool(&self, name: &str) -> Result<(), CalicoError> {
        self.record("delete", name)?;
        lock(&self.pools)
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CalicoError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::IPPoolSpec;

    fn pool(name: &str, cidr: &str) -> IPPool {
        IPPool::new(
            name,
            IPPoolSpec {
                cidr: cidr.to_string(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_create_assigns_resource_version() {
        let client = MockCalicoClient::new();
        let created = client.create_ip_pool(&pool("a", "10.0.0.0/16")).await.unwrap();

        assert_eq!(created.metadata.resource_version.as_deref(), Some("1"));
        assert_eq!(client.get_ip_pool("a").await.unwrap().spec.cidr, "10.0.0.0/16");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let client = MockCalicoClient::new();
        client.create_ip_pool(&pool("a", "10.0.0.0/16")).await.unwrap();

        let err = client.create_ip_pool(&pool("a", "10.1.0.0/16")).await.unwrap_err();
        assert!(matches!(err, CalicoError::AlreadyExists(name) if name == "a"));
    }

    #[tokio::test]
    async fn test_create_rejects_resource_version() {
        let client = MockCalicoClient::new();
        let mut versioned = pool("a", "10.0.0.0/16");
        versioned.metadata.resource_version = Some("7".to_string());

        let err = client.create_ip_pool(&versioned).await.unwrap_err();
        assert!(matches!(err, CalicoError::InvalidRequest(_)));
        assert!(client.ip_pool("a").is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_stale_resource_version() {
        let client = MockCalicoClient::new();
        let created = client.create_ip_pool(&pool("a", "10.0.0.0/16")).await.unwrap();

        let mut first = created.clone();
        first.spec.disabled = true;
        client.update_ip_pool(&first).await.unwrap();

        // Still carries version "1"
        let err = client.update_ip_pool(&created).await.unwrap_err();
        assert!(matches!(err, CalicoError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_pool() {
        let client = MockCalicoClient::new();

        assert!(client.get_ip_pool("missing").await.unwrap_err().is_not_found());
        assert!(client.delete_ip_pool("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let client = MockCalicoClient::new();
        client.add_ip_pool(pool("a", "10.0.0.0/16"));
        client.fail_next("connection refused");

        let err = client.get_ip_pool("a").await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert!(client.get_ip_pool("a").await.is_ok());
        assert_eq!(client.calls(), vec!["get:a", "get:a"]);
    }
}
