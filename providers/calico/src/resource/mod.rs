//! Resource lifecycle interface and its implementations.
//!
//! The orchestrator drives resources only through [`ResourceLifecycle`], so
//! the transport in front of it (CLI today) is independent of the adapters.

pub mod ip_pool;

use crate::error::{Diagnostics, ProviderError};
use crate::schema::Block;

pub use ip_pool::IPPoolResource;

/// Lifecycle operations of one managed resource type
///
/// Every operation issues at most the remote calls it documents; none retries.
/// On failure the data's identifier is left as it was.
#[async_trait::async_trait]
pub trait ResourceLifecycle: Send + Sync {
    /// Resource data record exchanged with the orchestrator
    type Data: Send + Sync;

    /// Resource type name, e.g. `calico_ippool`
    fn type_name(&self) -> &'static str;

    /// Configuration schema
    fn schema(&self) -> Block;

    /// Configuration-level checks; never touches the remote API
    fn validate(&self, data: &Self::Data) -> Diagnostics;

    /// Whether the remote object exists
    async fn exists(&self, data: &Self::Data) -> Result<bool, ProviderError>;

    /// Refresh `data` from the remote object, clearing the identifier if it is gone
    async fn read(&self, data: &mut Self::Data) -> Result<(), ProviderError>;

    /// Create the remote object and set the identifier
    async fn create(&self, data: &mut Self::Data) -> Result<(), ProviderError>;

    /// Replace the remote object in place
    async fn update(&self, prior: &Self::Data, data: &mut Self::Data) -> Result<(), ProviderError>;

    /// Delete the remote object and clear the identifier
    async fn delete(&self, data: &mut Self::Data) -> Result<(), ProviderError>;
}
