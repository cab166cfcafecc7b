//! CalicoClient trait for mocking
//!
//! The provider only depends on this trait, so tests can swap the
//! Kubernetes-backed client for an in-memory one.

use crate::error::CalicoError;
use crds::IPPool;

/// Trait for Calico IPPool API operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait CalicoClientTrait: Send + Sync {
    /// Fetch a pool by name
    async fn get_ip_pool(&self, name: &str) -> Result<IPPool, CalicoError>;

    /// Create a pool, returning the stored object
    async fn create_ip_pool(&self, pool: &IPPool) -> Result<IPPool, CalicoError>;

    /// Replace a pool as a whole, returning the stored object
    ///
    /// The pool's `metadata.resourceVersion` must match the server's copy.
    async fn update_ip_pool(&self, pool: &IPPool) -> Result<IPPool, CalicoError>;

    /// Delete a pool by name
    async fn delete_ip_pool(&self, name: &str) -> Result<(), CalicoError>;
}
