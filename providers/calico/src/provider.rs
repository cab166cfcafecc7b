//! Orchestration of lifecycle calls: validate, plan, then apply.

use crate::error::{Diagnostics, ProviderError};
use crate::model::IPPoolData;
use crate::plan::{Plan, PlanAction, plan};
use crate::resource::ResourceLifecycle;
use tracing::{info, warn};

/// Validate `proposed` and plan it against `prior`
///
/// Warnings are logged; any error stops here, before a remote call.
pub fn validate_and_plan<R>(
    resource: &R,
    prior: Option<&IPPoolData>,
    proposed: &IPPoolData,
) -> Result<Plan, ProviderError>
where
    R: ResourceLifecycle<Data = IPPoolData>,
{
    let diagnostics: Diagnostics = resource.validate(proposed).into_result()?;
    for warning in diagnostics.iter() {
        warn!("{}: {}", resource.type_name(), warning);
    }

    plan(&resource.schema(), prior, proposed)
}

/// Converge the remote object to `proposed`, returning the refreshed state
///
/// Replacement deletes the prior object first, then creates the new one.
pub async fn apply<R>(
    resource: &R,
    prior: Option<&IPPoolData>,
    proposed: &IPPoolData,
) -> Result<IPPoolData, ProviderError>
where
    R: ResourceLifecycle<Data = IPPoolData>,
{
    let plan = validate_and_plan(resource, prior, proposed)?;
    info!("{} {}: {}", resource.type_name(), proposed.pool_name(), plan.action);

    let mut state = plan.planned;
    match plan.action {
        PlanAction::NoOp => return Ok(state),
        PlanAction::Create => resource.create(&mut state).await?,
        PlanAction::Update => {
            if let Some(prior) = prior {
                resource.update(prior, &mut state).await?;
            }
        }
        PlanAction::Replace => {
            if let Some(prior) = prior {
                info!("Replacing {} because of: {}", prior.pool_name(), plan.requires_replace.join(", "));
                let mut old = prior.clone();
                resource.delete(&mut old).await?;
            }
            resource.create(&mut state).await?;
        }
    }

    resource.read(&mut state).await?;
    Ok(state)
}
