//! Unit tests for configuration validation

#[cfg(test)]
mod tests {
    use crate::error::Severity;
    use crate::model::{IPPoolData, SpecBlock};
    use crate::validation::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn pool(ipip_mode: &str, vxlan_mode: &str) -> IPPoolData {
        IPPoolData {
            spec: SpecBlock {
                cidr: "10.0.0.0/16".to_string(),
                ipip_mode: ipip_mode.to_string(),
                vxlan_mode: vxlan_mode.to_string(),
                ..Default::default()
            },
            ..IPPoolData::named("pool-a")
        }
    }

    #[test]
    fn test_qualified_name_accepts_valid_keys() {
        for key in ["foo", "a", "foo-bar_baz.qux", "example.com/foo", "projectcalico.org/metadata", "123-abc"] {
            assert!(is_qualified_name(key).is_empty(), "{key} should be valid");
        }
    }

    #[test]
    fn test_qualified_name_rejects_bad_name_part() {
        let errors = is_qualified_name("-foo");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("name part must consist of alphanumeric characters"));

        let errors = is_qualified_name("foo_");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_patterns_match_whole_value() {
        // Anchored: a valid prefix or suffix is not enough
        assert_eq!(is_qualified_name("foo\n").len(), 1);
        assert_eq!(is_qualified_name("foo bar").len(), 1);
        assert_eq!(is_dns1123_subdomain("example.com\n").len(), 1);

        assert!(is_dns1123_subdomain("a.b-c.example").is_empty());
        for bad in ["example..com", "-example.com", "example.com-", "Example.com", ".example.com"] {
            let errors = is_dns1123_subdomain(bad);
            assert_eq!(errors.len(), 1, "{bad:?}");
            assert!(errors[0].starts_with("a lowercase RFC 1123 subdomain"), "{bad:?}");
        }
    }

    #[test]
    fn test_qualified_name_rejects_empty_name() {
        let errors = is_qualified_name("example.com/");
        assert_eq!(errors[0], "name part must be non-empty");
        // Empty also fails the pattern
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_qualified_name_rejects_long_name() {
        let errors = is_qualified_name(&"a".repeat(64));
        assert_eq!(errors, vec!["name part must be no more than 63 characters".to_string()]);
        assert!(is_qualified_name(&"a".repeat(63)).is_empty());
    }

    #[test]
    fn test_qualified_name_rejects_bad_prefix() {
        let errors = is_qualified_name("/foo");
        assert_eq!(errors, vec!["prefix part must be non-empty".to_string()]);

        let errors = is_qualified_name("-bad.example/foo");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("prefix part a lowercase RFC 1123 subdomain"));
    }

    #[test]
    fn test_qualified_name_rejects_multiple_slashes() {
        let errors = is_qualified_name("a/b/c");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("a qualified name must consist of"));
        assert!(errors[0].ends_with("(e.g. 'example.com/MyName')"));
    }

    #[test]
    fn test_regex_error_message_format() {
        let errors = is_qualified_name("_x");
        assert_eq!(
            errors[0],
            "name part must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character (e.g. 'MyName',  or 'my.name',  or '123-abc', regex used for validation is '([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]')"
        );
    }

    #[test]
    fn test_annotation_keys_are_lowercased() {
        let annotations = BTreeMap::from([("Example.COM/Owner".to_string(), "team".to_string())]);
        assert!(validate_annotations(&annotations, "metadata.0.annotations").is_empty());
    }

    #[test]
    fn test_annotations_report_every_offending_key() {
        let annotations = BTreeMap::from([
            ("good".to_string(), "v".to_string()),
            ("-bad".to_string(), "v".to_string()),
            ("also bad".to_string(), "v".to_string()),
            ("a/b/c".to_string(), "v".to_string()),
        ]);

        let diagnostics = validate_annotations(&annotations, "metadata.0.annotations");
        let summaries: Vec<&str> = diagnostics.iter().map(|d| d.summary.as_str()).collect();

        assert_eq!(diagnostics.len(), 3);
        assert!(summaries.iter().any(|s| s.starts_with("metadata.0.annotations (\"-bad\") ")));
        assert!(summaries.iter().any(|s| s.starts_with("metadata.0.annotations (\"also bad\") ")));
        assert!(summaries.iter().any(|s| s.starts_with("metadata.0.annotations (\"a/b/c\") ")));
    }

    #[test]
    fn test_validate_ip_pool_accepts_defaults() {
        assert!(!validate_ip_pool(&pool("Never", "Never")).has_errors());
        assert!(!validate_ip_pool(&pool("Always", "Never")).has_errors());
        assert!(!validate_ip_pool(&pool("Never", "CrossSubnet")).has_errors());
    }

    #[test]
    fn test_validate_ip_pool_rejects_conflicting_modes() {
        let diagnostics = validate_ip_pool(&pool("Always", "CrossSubnet"));
        let attributes: Vec<_> = diagnostics.errors().filter_map(|d| d.attribute.as_deref()).collect();

        assert_eq!(attributes, vec!["spec.0.ipip_mode", "spec.0.vxlan_mode"]);
    }

    #[test]
    fn test_validate_ip_pool_rejects_unknown_mode() {
        let diagnostics = validate_ip_pool(&pool("always", "Never"));
        let errors: Vec<_> = diagnostics.errors().collect();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].attribute.as_deref(), Some("spec.0.ipip_mode"));
        assert!(errors[0].summary.contains("got always"));
    }

    #[test]
    fn test_validate_ip_pool_warns_on_configured_resource_version() {
        let mut data = pool("Never", "Never");
        data.id = None;
        data.metadata.resource_version = "7".to_string();

        let diagnostics = validate_ip_pool(&data);
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.iter().next().map(|d| d.severity), Some(Severity::Warning));
    }

    proptest! {
        #[test]
        fn prop_every_invalid_key_reported(keys in proptest::collection::btree_set("[a-z]{1,10}", 1..8)) {
            // A leading '-' makes each key invalid exactly once
            let annotations: BTreeMap<String, String> = keys
                .iter()
                .map(|k| (format!("-{k}"), String::new()))
                .collect();

            let diagnostics = validate_annotations(&annotations, "metadata.0.annotations");
            prop_assert_eq!(diagnostics.len(), annotations.len());
            for key in annotations.keys() {
                let needle = format!("({key:?})");
                prop_assert!(diagnostics.iter().any(|d| d.summary.contains(&needle)));
            }
        }
    }
}
