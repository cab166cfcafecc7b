//! Typed resource data for `calico_ippool`.
//!
//! This is the record exchanged with the orchestrator: the configuration on
//! the way in, the refreshed state on the way out. Raw documents are decoded
//! once at the boundary, so a wrongly typed value (for example a non-string
//! annotation) is a decode error instead of a failure deep in the adapter.

use crate::error::ProviderError;
use crate::schema::DEFAULT_MODE;
use crds::DEFAULT_BLOCK_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State and configuration of one IPPool resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IPPoolData {
    /// Identifier of the managed pool; `None` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub metadata: MetadataBlock,

    pub spec: SpecBlock,
}

/// `metadata` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataBlock {
    #[serde(default)]
    pub name: String,

    /// Computed; ignored in configuration
    #[serde(default)]
    pub resource_version: String,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// `spec` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecBlock {
    pub cidr: String,

    #[serde(default = "default_block_size")]
    pub block_size: i32,

    #[serde(default = "default_mode")]
    pub ipip_mode: String,

    #[serde(default = "default_mode")]
    pub vxlan_mode: String,

    #[serde(default)]
    pub nat_outgoing: bool,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub disable_bgp_export: bool,
}

fn default_block_size() -> i32 {
    DEFAULT_BLOCK_SIZE
}

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

impl Default for SpecBlock {
    fn default() -> Self {
        Self {
            cidr: String::new(),
            block_size: DEFAULT_BLOCK_SIZE,
            ipip_mode: default_mode(),
            vxlan_mode: default_mode(),
            nat_outgoing: false,
            disabled: false,
            disable_bgp_export: false,
        }
    }
}

impl IPPoolData {
    /// Record addressing an existing pool by name only
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Some(name.clone()),
            metadata: MetadataBlock {
                name,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Decode a YAML (or JSON) document
    pub fn from_yaml(document: &str) -> Result<Self, ProviderError> {
        serde_yaml::from_str(document).map_err(|e| ProviderError::Decode {
            what: "IPPool configuration".to_string(),
            message: e.to_string(),
        })
    }

    /// Name used to address the remote pool: the configured name, else the identifier
    pub fn pool_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            self.id.as_deref().unwrap_or_default()
        } else {
            &self.metadata.name
        }
    }

    /// Carry identifier and computed attributes over from prior state
    ///
    /// A configuration never supplies `resource_version`, and may leave the
    /// optional-computed `name` unset.
    pub fn with_computed_from(mut self, prior: &IPPoolData) -> Self {
        if self.id.is_none() {
            self.id.clone_from(&prior.id);
        }
        if self.metadata.name.is_empty() {
            self.metadata.name.clone_from(&prior.metadata.name);
        }
        self.metadata.resource_version.clone_from(&prior.metadata.resource_version);
        self
    }
}
