//! Calico CRD Definitions
//!
//! Kubernetes custom resource types for the Calico `projectcalico.org/v3` API
//! group, as consumed by the IPPool provider.

pub mod ip_pool;

pub use ip_pool::*;
