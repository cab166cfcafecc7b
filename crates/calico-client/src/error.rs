//! Calico client errors

use thiserror::Error;

/// Errors that can occur when talking to the Calico API
#[derive(Debug, Error)]
pub enum CalicoError {
    /// Kubernetes API request/response error, passed through as-is
    #[error("{0}")]
    Kube(#[from] kube::Error),

    /// Kubeconfig could not be loaded
    #[error("Kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    /// Neither in-cluster nor local configuration could be inferred
    #[error("Kubernetes configuration error: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    /// The named IPPool does not exist
    #[error("ippools.projectcalico.org \"{0}\" not found")]
    NotFound(String),

    /// An IPPool with this name already exists
    #[error("ippools.projectcalico.org \"{0}\" already exists")]
    AlreadyExists(String),

    /// Optimistic concurrency check failed on the server
    #[error("Operation cannot be fulfilled on ippools.projectcalico.org \"{0}\": the object has been modified; please apply your changes to the latest version and try again")]
    Conflict(String),

    /// The request was rejected as invalid
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Calico API returned an error
    #[error("{0}")]
    Api(String),
}

impl CalicoError {
    /// True when the error means the pool is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
