//! # Parameter Resolver
//!
//! Turns a partial [`RunRequest`] into [`ResolvedParameters`]. Each field is
//! resolved on its own, first non-empty value wins:
//!
//! 1. the request
//! 2. the scenario (the requested one, otherwise the current default)
//! 3. the global [`OptimizerSetting`]
//! 4. the hard-coded fallback (`balanced`, `0`, `true`, `[]`)
//!
//! "Empty" means a blank strategy, zero days, an absent gravity flag or an
//! empty priority list. Resolution only reads.

use sqlx::SqlitePool;
use tracing::debug;

use super::types::{ResolvedParameters, RunRequest};
use crate::constants::fallback;
use crate::error::{OptiplanError, OptiplanResult};
use crate::models::{OptimizationScenario, OptimizerSetting};
use crate::validation::{validate_campaign_window_days, validate_priority_ids};

pub struct ParameterResolver;

impl ParameterResolver {
    /// Load the scenario and settings layers, then resolve
    pub async fn resolve_for_run(
        pool: &SqlitePool,
        request: &RunRequest,
    ) -> OptiplanResult<ResolvedParameters> {
        Self::validate_request(request)?;

        let scenario = match request.scenario_id {
            Some(id) => Some(
                OptimizationScenario::find_by_id(pool, id)
                    .await?
                    .ok_or_else(|| OptiplanError::not_found("OptimizationScenario", id))?,
            ),
            None => OptimizationScenario::find_default(pool).await?,
        };

        let settings = OptimizerSetting::get_or_default(pool).await?;

        Self::resolve(request, scenario.as_ref(), &settings)
    }

    /// Resolve against explicitly supplied layers
    pub fn resolve(
        request: &RunRequest,
        scenario: Option<&OptimizationScenario>,
        settings: &OptimizerSetting,
    ) -> OptiplanResult<ResolvedParameters> {
        Self::validate_request(request)?;

        let strategy = non_blank(request.strategy.as_deref())
            .or_else(|| scenario.and_then(|s| non_blank(s.strategy.as_deref())))
            .or_else(|| non_blank(Some(settings.strategy.as_str())))
            .unwrap_or(fallback::STRATEGY)
            .to_string();

        let campaign_window_days = positive(request.campaign_window_days)
            .or_else(|| scenario.and_then(|s| positive(s.campaign_window_days)))
            .or_else(|| positive(Some(settings.campaign_window_days)))
            .unwrap_or(fallback::CAMPAIGN_WINDOW_DAYS);

        let gravity = request
            .gravity
            .or_else(|| scenario.and_then(|s| s.gravity))
            .unwrap_or(settings.gravity);

        let resource_priority = request
            .resource_priority
            .clone()
            .filter(|ids| !ids.is_empty())
            .or_else(|| scenario.map(|s| s.priority_list()).filter(|ids| !ids.is_empty()))
            .unwrap_or_else(|| settings.priority_list());

        let resolved = ResolvedParameters {
            scenario_id: scenario.map(|s| s.id),
            strategy,
            campaign_window_days,
            gravity,
            resource_priority,
        };

        debug!(?request, ?resolved, "Run parameters resolved");

        Ok(resolved)
    }

    fn validate_request(request: &RunRequest) -> OptiplanResult<()> {
        validate_campaign_window_days(request.campaign_window_days)?;
        validate_priority_ids(request.resource_priority.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v > 0)
}
