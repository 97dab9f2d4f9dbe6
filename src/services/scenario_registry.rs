use sqlx::SqlitePool;
use tracing::{error, info};

use crate::constants::messages;
use crate::error::{OperationResult, OptiplanError, OptiplanResult};
use crate::models::{NewOptimizationScenario, OptimizationScenario, ScenarioUpdate};
use crate::validation::{validate_campaign_window_days, validate_priority_ids};

/// Registry of named optimizer configurations.
///
/// Every path that writes `is_default` clears the flag on the other rows in
/// the same transaction, so at most one scenario is default once any
/// operation completes.
#[derive(Debug, Clone)]
pub struct ScenarioRegistry {
    db_pool: SqlitePool,
}

impl ScenarioRegistry {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Create a scenario, optionally taking over the default flag
    pub async fn create(
        &self,
        new_scenario: NewOptimizationScenario,
        is_default: bool,
    ) -> OptiplanResult<OptimizationScenario> {
        validate_payload(
            Some(&new_scenario.name),
            new_scenario.campaign_window_days,
            Some(new_scenario.resource_priority.as_slice()),
        )?;

        let mut tx = self.db_pool.begin().await?;

        let scenario = OptimizationScenario::create(&mut *tx, &new_scenario, is_default)
            .await
            .map_err(|e| OptiplanError::from_write_error(e, messages::SCENARIO_NAME_TAKEN))?;

        if is_default {
            OptimizationScenario::clear_default_except(&mut *tx, scenario.id).await?;
        }

        tx.commit().await?;

        info!(
            scenario_id = scenario.id,
            name = %scenario.name,
            is_default = scenario.is_default,
            "Optimization scenario created"
        );

        Ok(scenario)
    }

    /// Apply only the supplied fields
    pub async fn update(
        &self,
        id: i64,
        update: ScenarioUpdate,
    ) -> OptiplanResult<OptimizationScenario> {
        validate_payload(
            update.name.as_ref(),
            update.campaign_window_days.flatten(),
            update.resource_priority.as_deref(),
        )?;

        let mut tx = self.db_pool.begin().await?;

        let scenario = OptimizationScenario::update(&mut *tx, id, &update)
            .await
            .map_err(|e| OptiplanError::from_write_error(e, messages::SCENARIO_NAME_TAKEN))?
            .ok_or_else(|| OptiplanError::not_found("OptimizationScenario", id))?;

        if update.is_default == Some(true) {
            OptimizationScenario::clear_default_except(&mut *tx, scenario.id).await?;
        }

        tx.commit().await?;

        Ok(scenario)
    }

    /// Make `id` the only default scenario
    pub async fn set_default(&self, id: i64) -> OperationResult {
        match self.swap_default(id).await {
            Ok(true) => {
                info!(scenario_id = id, "Default optimization scenario changed");
                OperationResult::ok(messages::SCENARIO_DEFAULT_SET)
            }
            Ok(false) => OperationResult::failure(format!(
                "Failed to set default: {}",
                messages::SCENARIO_NOT_FOUND
            )),
            Err(e) => {
                error!(scenario_id = id, error = %e, "Failed to set default scenario");
                OperationResult::failure(format!("Failed to set default: {e}"))
            }
        }
    }

    async fn swap_default(&self, id: i64) -> OptiplanResult<bool> {
        let mut tx = self.db_pool.begin().await?;

        OptimizationScenario::clear_all_defaults(&mut *tx).await?;

        // Dropping the transaction rolls back the cleared flags
        if !OptimizationScenario::mark_default(&mut *tx, id).await? {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a scenario; executions keep their resolved parameters by value
    pub async fn delete(&self, id: i64) -> OperationResult {
        match OptimizationScenario::delete(&self.db_pool, id).await {
            Ok(true) => OperationResult::ok(messages::SCENARIO_DELETED),
            Ok(false) => OperationResult::failure(messages::SCENARIO_NOT_FOUND),
            Err(e) => OperationResult::failure(e.to_string()),
        }
    }

    pub async fn get(&self, id: i64) -> OptiplanResult<Option<OptimizationScenario>> {
        Ok(OptimizationScenario::find_by_id(&self.db_pool, id).await?)
    }

    pub async fn list(&self) -> OptiplanResult<Vec<OptimizationScenario>> {
        Ok(OptimizationScenario::list_all(&self.db_pool).await?)
    }

    pub async fn default_scenario(&self) -> OptiplanResult<Option<OptimizationScenario>> {
        Ok(OptimizationScenario::find_default(&self.db_pool).await?)
    }
}

fn validate_payload(
    name: Option<&String>,
    campaign_window_days: Option<i64>,
    resource_priority: Option<&[i64]>,
) -> OptiplanResult<()> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(OptiplanError::InvalidInput(
                "scenario name must not be blank".to_string(),
            ));
        }
    }

    validate_campaign_window_days(campaign_window_days)?;
    validate_priority_ids(resource_priority)
}
