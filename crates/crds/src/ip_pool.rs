//! IPPool CRD
//!
//! Mirrors the Calico `projectcalico.org/v3` IPPool resource. Only the fields
//! managed by the provider are modelled; the API server owns everything else.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block size assigned by Calico when a pool does not specify one.
pub const DEFAULT_BLOCK_SIZE: i32 = 26;

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[kube(
    group = "projectcalico.org",
    version = "v3",
    kind = "IPPool",
    plural = "ippools"
)]
#[serde(rename_all = "camelCase")]
pub struct IPPoolSpec {
    /// The pool CIDR
    pub cidr: String,

    /// The CIDR size of allocation blocks used by this pool
    #[serde(default = "default_block_size")]
    pub block_size: i32,

    /// When IPIP encapsulation is used for traffic leaving the pool
    #[serde(default)]
    pub ipip_mode: IPIPMode,

    /// When VXLAN encapsulation is used for traffic leaving the pool
    #[serde(default)]
    pub vxlan_mode: VXLANMode,

    /// Masquerade traffic leaving the pool
    #[serde(default)]
    pub nat_outgoing: bool,

    /// Exclude the pool from IPAM assignment
    #[serde(default)]
    pub disabled: bool,

    /// Do not export the pool CIDR over BGP
    #[serde(default, rename = "disableBGPExport")]
    pub disable_bgp_export: bool,
}

fn default_block_size() -> i32 {
    DEFAULT_BLOCK_SIZE
}

impl Default for IPPoolSpec {
    fn default() -> Self {
        Self {
            cidr: String::new(),
            block_size: DEFAULT_BLOCK_SIZE,
            ipip_mode: IPIPMode::default(),
            vxlan_mode: VXLANMode::default(),
            nat_outgoing: false,
            disabled: false,
            disable_bgp_export: false,
        }
    }
}

/// IPIP encapsulation mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq, Hash)]
pub enum IPIPMode {
    /// Always encapsulate
    Always,

    /// Encapsulate only across subnet boundaries
    CrossSubnet,

    /// Never encapsulate
    #[default]
    Never,
}

/// VXLAN encapsulation mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq, Hash)]
pub enum VXLANMode {
    /// Always encapsulate
    Always,

    /// Encapsulate only across subnet boundaries
    CrossSubnet,

    /// Never encapsulate
    #[default]
    Never,
}

impl IPIPMode {
    /// Wire name of the mode
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::CrossSubnet => "CrossSubnet",
            Self::Never => "Never",
        }
    }
}

impl VXLANMode {
    /// Wire name of the mode
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::CrossSubnet => "CrossSubnet",
            Self::Never => "Never",
        }
    }
}

impl fmt::Display for IPIPMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VXLANMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
