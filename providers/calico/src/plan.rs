//! Planning: decide how proposed configuration is applied to prior state.

use crate::error::ProviderError;
use crate::model::IPPoolData;
use crate::schema::Block;
use serde_json::Value;
use std::fmt;

/// Action needed to converge prior state to the proposed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    /// Nothing exists yet
    Create,
    /// Mutable attributes changed
    Update,
    /// A ForceNew attribute changed; destroy, then create
    Replace,
    /// Already converged
    NoOp,
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Replace => "replace",
            Self::NoOp => "no-op",
        })
    }
}

/// Result of planning one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub action: PlanAction,
    /// ForceNew attribute paths that changed, e.g. `spec.0.cidr`
    pub requires_replace: Vec<String>,
    /// Proposed data with computed attributes carried over
    pub planned: IPPoolData,
}

fn to_value(data: &IPPoolData) -> Result<Value, ProviderError> {
    serde_json::to_value(data).map_err(|e| ProviderError::Decode {
        what: "IPPool state".to_string(),
        message: e.to_string(),
    })
}

/// ForceNew attributes whose value differs between `prior` and `proposed`
///
/// A `name` left empty in configuration is computed, not a change.
pub fn force_new_changes(
    schema: &Block,
    prior: &IPPoolData,
    proposed: &IPPoolData,
) -> Result<Vec<String>, ProviderError> {
    let prior_value = to_value(prior)?;
    let proposed_value = to_value(&proposed.clone().with_computed_from(prior))?;

    Ok(schema
        .force_new_paths()
        .into_iter()
        .filter(|(block, name)| prior_value[block][name] != proposed_value[block][name])
        .map(|(block, name)| format!("{block}.0.{name}"))
        .collect())
}

/// Plan the transition from `prior` (if any) to `proposed`
pub fn plan(schema: &Block, prior: Option<&IPPoolData>, proposed: &IPPoolData) -> Result<Plan, ProviderError> {
    let Some(prior) = prior.filter(|p| p.id.is_some()) else {
        // resource_version is assigned by the server on create
        let mut planned = proposed.clone();
        planned.id = None;
        planned.metadata.resource_version.clear();
        return Ok(Plan {
            action: PlanAction::Create,
            requires_replace: Vec::new(),
            planned,
        });
    };

    let requires_replace = force_new_changes(schema, prior, proposed)?;
    if !requires_replace.is_empty() {
        // Computed attributes are reassigned by the new object
        let mut planned = proposed.clone();
        planned.id = None;
        planned.metadata.resource_version.clear();
        if planned.metadata.name.is_empty() {
            planned.metadata.name.clone_from(&prior.metadata.name);
        }
        return Ok(Plan {
            action: PlanAction::Replace,
            requires_replace,
            planned,
        });
    }

    let planned = proposed.clone().with_computed_from(prior);
    let action = if &planned == prior {
        PlanAction::NoOp
    } else {
        PlanAction::Update
    };

    Ok(Plan {
        action,
        requires_replace,
        planned,
    })
}
