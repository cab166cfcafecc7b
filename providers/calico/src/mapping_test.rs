//! Unit tests for expand/flatten

#[cfg(test)]
mod tests {
    use crate::mapping::*;
    use crate::model::{IPPoolData, MetadataBlock, SpecBlock};
    use crds::{IPIPMode, IPPool, IPPoolSpec, VXLANMode};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_known_modes() {
        assert_eq!(ipip_mode("Always"), IPIPMode::Always);
        assert_eq!(ipip_mode("CrossSubnet"), IPIPMode::CrossSubnet);
        assert_eq!(ipip_mode("Never"), IPIPMode::Never);
        assert_eq!(vxlan_mode("Always"), VXLANMode::Always);
        assert_eq!(vxlan_mode("CrossSubnet"), VXLANMode::CrossSubnet);
        assert_eq!(vxlan_mode("Never"), VXLANMode::Never);
    }

    #[test]
    fn test_unknown_modes_fall_back_to_never() {
        for mode in ["", "always", "ALWAYS", "crosssubnet", "Cross-Subnet", " Always"] {
            assert_eq!(ipip_mode(mode), IPIPMode::Never, "{mode:?}");
            assert_eq!(vxlan_mode(mode), VXLANMode::Never, "{mode:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_unrecognised_mode_is_never(mode in ".*") {
            prop_assume!(!["Always", "CrossSubnet", "Never"].contains(&mode.as_str()));
            prop_assert_eq!(ipip_mode(&mode), IPIPMode::Never);
            prop_assert_eq!(vxlan_mode(&mode), VXLANMode::Never);
        }
    }

    #[test]
    fn test_expand_ip_pool() {
        let data = IPPoolData {
            id: None,
            metadata: MetadataBlock {
                name: "pool-a".to_string(),
                resource_version: "12".to_string(),
                annotations: BTreeMap::from([("owner".to_string(), "net".to_string())]),
            },
            spec: SpecBlock {
                cidr: "10.0.0.0/16".to_string(),
                block_size: 24,
                ipip_mode: "CrossSubnet".to_string(),
                vxlan_mode: "Never".to_string(),
                nat_outgoing: true,
                disabled: true,
                disable_bgp_export: true,
            },
        };

        let pool = expand_ip_pool(&data);

        assert_eq!(pool.metadata.name.as_deref(), Some("pool-a"));
        assert_eq!(pool.metadata.resource_version.as_deref(), Some("12"));
        assert_eq!(pool.metadata.annotations.as_ref().unwrap()["owner"], "net");
        assert_eq!(pool.spec, IPPoolSpec {
            cidr: "10.0.0.0/16".to_string(),
            block_size: 24,
            ipip_mode: IPIPMode::CrossSubnet,
            vxlan_mode: VXLANMode::Never,
            nat_outgoing: true,
            disabled: true,
            disable_bgp_export: true,
        });
    }

    #[test]
    fn test_expand_leaves_empty_fields_unset() {
        let data = IPPoolData {
            spec: SpecBlock {
                cidr: "10.0.0.0/16".to_string(),
                ipip_mode: "bogus".to_string(),
                ..Default::default()
            },
            ..IPPoolData::named("pool-a")
        };

        let pool = expand_ip_pool(&data);

        assert_eq!(pool.metadata.resource_version, None);
        assert_eq!(pool.metadata.annotations, None);
        assert_eq!(pool.spec.ipip_mode, IPIPMode::Never);
    }

    #[test]
    fn test_flatten_overwrites_every_field() {
        let mut pool = IPPool::new(
            "remote",
            IPPoolSpec {
                cidr: "192.168.0.0/16".to_string(),
                block_size: 28,
                vxlan_mode: VXLANMode::Always,
                nat_outgoing: true,
                ..Default::default()
            },
        );
        pool.metadata.resource_version = Some("99".to_string());

        let mut data = IPPoolData {
            id: Some("stale".to_string()),
            metadata: MetadataBlock {
                name: "stale".to_string(),
                resource_version: "1".to_string(),
                annotations: BTreeMap::from([("gone".to_string(), "x".to_string())]),
            },
            spec: SpecBlock {
                cidr: "10.0.0.0/8".to_string(),
                disabled: true,
                ..Default::default()
            },
        };

        flatten_ip_pool(&pool, &mut data);

        assert_eq!(data.id.as_deref(), Some("remote"));
        assert_eq!(data.metadata.name, "remote");
        assert_eq!(data.metadata.resource_version, "99");
        assert!(data.metadata.annotations.is_empty());
        assert_eq!(data.spec, SpecBlock {
            cidr: "192.168.0.0/16".to_string(),
            block_size: 28,
            ipip_mode: "Never".to_string(),
            vxlan_mode: "Always".to_string(),
            nat_outgoing: true,
            disabled: false,
            disable_bgp_export: false,
        });
    }
}
