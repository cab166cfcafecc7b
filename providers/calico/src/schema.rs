//! Configuration schema for the `calico_ippool` resource.
//!
//! The schema is a typed declaration of every attribute the resource accepts:
//! its type, whether it is required, optional or computed, its default, and
//! the constraints checked before any remote call. It is rendered as JSON by
//! the `schema` command and drives ForceNew detection during planning.

use crds::DEFAULT_BLOCK_SIZE;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Type name of the IPPool resource
pub const IP_POOL_RESOURCE: &str = "calico_ippool";

/// Accepted encapsulation mode values
pub const ENCAPSULATION_MODES: [&str; 3] = ["Always", "CrossSubnet", "Never"];

/// Default encapsulation mode
pub const DEFAULT_MODE: &str = "Never";

/// Attribute path of the annotations map, used in diagnostics
pub const ANNOTATIONS_PATH: &str = "metadata.0.annotations";

/// Attribute value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// String value
    String,
    /// Integer value
    Int,
    /// Boolean value
    Bool,
    /// Map of string keys to values of the element type
    Map(Box<AttributeType>),
    /// Nested block list
    List,
}

/// One schema attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Block>,
}

impl Attribute {
    fn new(kind: AttributeType) -> Self {
        Self {
            kind,
            description: None,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            default: None,
            allowed_values: None,
            conflicts_with: Vec::new(),
            max_items: None,
            block: None,
        }
    }

    /// Required attribute
    pub fn required(kind: AttributeType) -> Self {
        Self {
            required: true,
            ..Self::new(kind)
        }
    }

    /// Optional attribute
    pub fn optional(kind: AttributeType) -> Self {
        Self {
            optional: true,
            ..Self::new(kind)
        }
    }

    /// Read-only attribute filled from the remote object
    pub fn computed(kind: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::new(kind)
        }
    }

    /// Required nested block
    pub fn required_block(block: Block) -> Self {
        Self {
            block: Some(block),
            ..Self::required(AttributeType::List)
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn also_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn one_of(mut self, values: &[&'static str]) -> Self {
        self.allowed_values = Some(values.to_vec());
        self
    }

    pub fn conflicts_with(mut self, path: &'static str) -> Self {
        self.conflicts_with.push(path);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }
}

/// A set of named attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl Block {
    pub fn with(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    /// Paths of every ForceNew attribute, as `(block, attribute)` pairs
    ///
    /// Only one level of nesting is walked; the IPPool schema has no deeper blocks.
    pub fn force_new_paths(&self) -> Vec<(&'static str, &'static str)> {
        let mut paths = Vec::new();
        for (block_name, attribute) in &self.attributes {
            if let Some(block) = &attribute.block {
                for (name, nested) in &block.attributes {
                    if nested.force_new {
                        paths.push((*block_name, *name));
                    }
                }
            }
        }
        paths
    }
}

/// Full schema of the `calico_ippool` resource
pub fn ip_pool_schema() -> Block {
    let metadata = Block::default()
        .with(
            "name",
            Attribute::optional(AttributeType::String)
                .also_computed()
                .force_new()
                .describe("Name is the name of the IPPool."),
        )
        .with(
            "resource_version",
            Attribute::computed(AttributeType::String)
                .describe("An opaque value that represents the internal version"),
        )
        .with(
            "annotations",
            Attribute::optional(AttributeType::Map(Box::new(AttributeType::String)))
                .describe("An unstructured key value map"),
        );

    let spec = Block::default()
        .with("cidr", Attribute::required(AttributeType::String).force_new())
        .with(
            "block_size",
            Attribute::optional(AttributeType::Int)
                .force_new()
                .default_value(json!(DEFAULT_BLOCK_SIZE))
                .describe("The CIDR size of allocation blocks used by this pool. Blocks are allocated on demand to hosts and are used to aggregate routes. The value can only be set when the pool is created."),
        )
        .with(
            "ipip_mode",
            Attribute::optional(AttributeType::String)
                .default_value(json!(DEFAULT_MODE))
                .one_of(&ENCAPSULATION_MODES)
                .conflicts_with("spec.0.vxlan_mode")
                .describe("The mode defining when IPIP will be used. Cannot be set at the same time as vxlanMode."),
        )
        .with(
            "vxlan_mode",
            Attribute::optional(AttributeType::String)
                .default_value(json!(DEFAULT_MODE))
                .one_of(&ENCAPSULATION_MODES)
                .conflicts_with("spec.0.ipip_mode")
                .describe("The mode defining when VXLAN will be used. Cannot be set at the same time as ipipMode."),
        )
        .with(
            "nat_outgoing",
            Attribute::optional(AttributeType::Bool)
                .default_value(json!(false))
                .describe("When enabled, packets sent from Calico networked containers in this pool to destinations outside of this pool will be masqueraded."),
        )
        .with(
            "disabled",
            Attribute::optional(AttributeType::Bool)
                .default_value(json!(false))
                .describe("When set to true, Calico IPAM will not assign addresses from this pool."),
        )
        .with(
            "disable_bgp_export",
            Attribute::optional(AttributeType::Bool)
                .default_value(json!(false))
                .describe("Disable exporting routes from this IP Pool's CIDR over BGP."),
        );

    Block::default()
        .with(
            "metadata",
            Attribute::required_block(metadata)
                .max_items(1)
                .describe("IPPool Metadata."),
        )
        .with(
            "spec",
            Attribute::required_block(spec)
                .max_items(1)
                .describe("Spec defines the specification of the desired behavior of the IPPool. More info: https://projectcalico.docs.tigera.io/reference/resources/ippool"),
        )
}

/// Provider-level configuration schema
pub fn provider_schema() -> Block {
    Block::default()
        .with(
            "kubeconfig",
            Attribute::optional(AttributeType::String)
                .describe("Path to the kubeconfig file. Defaults to in-cluster or standard kubeconfig discovery."),
        )
        .with(
            "context",
            Attribute::optional(AttributeType::String)
                .describe("Kubeconfig context to use."),
        )
}

/// Provider and resource schemas, as printed by the `schema` command
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSchema {
    pub provider: Block,
    pub resources: BTreeMap<&'static str, Block>,
}

impl Default for ProviderSchema {
    fn default() -> Self {
        Self {
            provider: provider_schema(),
            resources: BTreeMap::from([(IP_POOL_RESOURCE, ip_pool_schema())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_new_paths() {
        let paths = ip_pool_schema().force_new_paths();
        assert_eq!(
            paths,
            vec![("metadata", "name"), ("spec", "block_size"), ("spec", "cidr")]
        );
    }

    #[test]
    fn test_defaults_declared() {
        let schema = ip_pool_schema();
        let spec = schema.attributes["spec"].block.as_ref().unwrap();

        assert_eq!(spec.attributes["block_size"].default, Some(json!(26)));
        assert_eq!(spec.attributes["ipip_mode"].default, Some(json!("Never")));
        assert_eq!(spec.attributes["vxlan_mode"].default, Some(json!("Never")));
        assert_eq!(spec.attributes["nat_outgoing"].default, Some(json!(false)));
        assert_eq!(spec.attributes["disabled"].default, Some(json!(false)));
        assert_eq!(spec.attributes["disable_bgp_export"].default, Some(json!(false)));
        assert!(spec.attributes["cidr"].required);
    }

    #[test]
    fn test_modes_conflict_with_each_other() {
        let schema = ip_pool_schema();
        let spec = schema.attributes["spec"].block.as_ref().unwrap();

        assert_eq!(spec.attributes["ipip_mode"].conflicts_with, vec!["spec.0.vxlan_mode"]);
        assert_eq!(spec.attributes["vxlan_mode"].conflicts_with, vec!["spec.0.ipip_mode"]);
    }

    #[test]
    fn test_schema_renders_as_json() {
        let value = serde_json::to_value(ProviderSchema::default()).unwrap();
        let metadata = &value["resources"]["calico_ippool"]["attributes"]["metadata"];

        assert_eq!(metadata["type"], "list");
        assert_eq!(metadata["block"]["attributes"]["resource_version"]["computed"], true);
        assert_eq!(metadata["block"]["attributes"]["annotations"]["type"], json!({"map": "string"}));

        let spec = &value["resources"]["calico_ippool"]["attributes"]["spec"];
        assert_eq!(spec["max_items"], 1);
        assert_eq!(spec["block"]["attributes"]["cidr"]["force_new"], true);
        assert_eq!(spec["block"]["attributes"]["nat_outgoing"]["force_new"], false);
    }
}
