//! Translation between resource data and the Calico `IPPool` object.

use crate::model::{IPPoolData, MetadataBlock, SpecBlock};
use crds::{IPIPMode, IPPool, IPPoolSpec, VXLANMode};

/// Map a mode string to [`IPIPMode`]; unrecognised values become `Never`
pub fn ipip_mode(mode: &str) -> IPIPMode {
    match mode {
        "Always" => IPIPMode::Always,
        "CrossSubnet" => IPIPMode::CrossSubnet,
        _ => IPIPMode::Never,
    }
}

/// Map a mode string to [`VXLANMode`]; unrecognised values become `Never`
pub fn vxlan_mode(mode: &str) -> VXLANMode {
    match mode {
        "Always" => VXLANMode::Always,
        "CrossSubnet" => VXLANMode::CrossSubnet,
        _ => VXLANMode::Never,
    }
}

/// Build the remote object from resource data
///
/// Empty `resource_version` and empty annotations are left unset so the
/// server fills or ignores them.
pub fn expand_ip_pool(data: &IPPoolData) -> IPPool {
    let spec = IPPoolSpec {
        cidr: data.spec.cidr.clone(),
        block_size: data.spec.block_size,
        ipip_mode: ipip_mode(&data.spec.ipip_mode),
        vxlan_mode: vxlan_mode(&data.spec.vxlan_mode),
        nat_outgoing: data.spec.nat_outgoing,
        disabled: data.spec.disabled,
        disable_bgp_export: data.spec.disable_bgp_export,
    };

    let mut pool = IPPool::new(&data.metadata.name, spec);
    pool.metadata.resource_version = Some(data.metadata.resource_version.clone())
        .filter(|version| !version.is_empty());
    pool.metadata.annotations = Some(data.metadata.annotations.clone())
        .filter(|annotations| !annotations.is_empty());
    pool
}

/// Overwrite every field of `data` from the remote object
pub fn flatten_ip_pool(pool: &IPPool, data: &mut IPPoolData) {
    let name = pool.metadata.name.clone().unwrap_or_default();

    data.id = Some(name.clone());
    data.metadata = MetadataBlock {
        name,
        resource_version: pool.metadata.resource_version.clone().unwrap_or_default(),
        annotations: pool.metadata.annotations.clone().unwrap_or_default(),
    };
    data.spec = SpecBlock {
        cidr: pool.spec.cidr.clone(),
        block_size: pool.spec.block_size,
        ipip_mode: pool.spec.ipip_mode.to_string(),
        vxlan_mode: pool.spec.vxlan_mode.to_string(),
        nat_outgoing: pool.spec.nat_outgoing,
        disabled: pool.spec.disabled,
        disable_bgp_export: pool.spec.disable_bgp_export,
    };
}
