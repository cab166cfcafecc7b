//! Calico API Client
//!
//! A thin client over the `projectcalico.org/v3` IPPool resource.
//!
//! # Example
//!
//! ```no_run
//! use calico_client::{CalicoClient, CalicoClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CalicoClient::try_default().await?;
//!
//! let pool = client.get_ip_pool("default-ipv4-ippool").await?;
//! println!("{}", pool.spec.cidr);
//! # Ok(())
//! # }
//! ```
//!
//! Errors from the API server are passed through untouched, except that a
//! missing pool on `get` is reported as [`CalicoError::NotFound`].

pub mod client;
pub mod error;
#[path = "trait.rs"]
pub mod calico_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::CalicoClient;
pub use error::CalicoError;
pub use calico_trait::CalicoClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockCalicoClient;
