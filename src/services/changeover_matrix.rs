use sqlx::SqlitePool;
use tracing::{debug, error, warn};

use crate::constants::messages;
use crate::error::{OperationResult, OptiplanError, OptiplanResult};
use crate::logging::log_matrix_operation;
use crate::models::{
    Attribute, AttributeParameter, ChangeoverData, ChangeoverGroup, ChangeoverTime, MatrixCellKey,
};
use crate::validation::validate_duration;

/// Service maintaining sequence-dependent setup times per changeover group.
///
/// Baselines and matrix cells are written with one `INSERT .. ON CONFLICT`
/// statement against the compound unique indexes, so each (group, attribute)
/// pair has at most one baseline and each cell key at most one row, and
/// concurrent writers of the same key converge on the last value. Deletes
/// that span several tables run in one transaction and report through
/// [`OperationResult`].
#[derive(Debug, Clone)]
pub struct ChangeoverMatrixStore {
    db_pool: SqlitePool,
}

impl ChangeoverMatrixStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn create_group(&self, name: &str) -> OptiplanResult<ChangeoverGroup> {
        let name = validate_name(name)?;
        let group = ChangeoverGroup::create(&self.db_pool, name).await?;
        log_matrix_operation("create_group", group.id, None, Some(group.id), "created");
        Ok(group)
    }

    pub async fn rename_group(&self, id: i64, name: &str) -> OptiplanResult<ChangeoverGroup> {
        let name = validate_name(name)?;
        ChangeoverGroup::rename(&self.db_pool, id, name)
            .await?
            .ok_or_else(|| OptiplanError::not_found("ChangeoverGroup", id))
    }

    pub async fn get_group(&self, id: i64) -> OptiplanResult<Option<ChangeoverGroup>> {
        Ok(ChangeoverGroup::find_by_id(&self.db_pool, id).await?)
    }

    pub async fn list_groups(&self) -> OptiplanResult<Vec<ChangeoverGroup>> {
        Ok(ChangeoverGroup::list_all(&self.db_pool).await?)
    }

    /// Delete a group with all of its baselines and matrix cells
    pub async fn delete_group(&self, id: i64) -> OperationResult {
        match self.delete_group_cascade(id).await {
            Ok(true) => {
                log_matrix_operation("delete_group", id, None, Some(id), "deleted");
                OperationResult::ok(messages::GROUP_DELETED)
            }
            Ok(false) => OperationResult::failure(messages::GROUP_NOT_FOUND),
            Err(e) => {
                error!(changeover_group_id = id, error = %e, "Failed to delete changeover group");
                OperationResult::failure(e.to_string())
            }
        }
    }

    async fn delete_group_cascade(&self, id: i64) -> OptiplanResult<bool> {
        let mut tx = self.db_pool.begin().await?;

        if ChangeoverGroup::find_by_id(&mut *tx, id).await?.is_none() {
            return Ok(false);
        }

        let cells = ChangeoverData::delete_for_group(&mut *tx, id).await?;
        let baselines = ChangeoverTime::delete_for_group(&mut *tx, id).await?;
        let deleted = ChangeoverGroup::delete(&mut *tx, id).await?;

        tx.commit().await?;

        debug!(
            changeover_group_id = id,
            cells_removed = cells,
            baselines_removed = baselines,
            "Changeover group removed"
        );

        Ok(deleted)
    }

    /// Upsert the baseline changeover time of one attribute within a group
    pub async fn set_baseline_time(
        &self,
        changeover_group_id: i64,
        attribute_id: i64,
        changeover_time: i64,
    ) -> OptiplanResult<ChangeoverTime> {
        validate_duration("changeover time", changeover_time)?;

        ensure_group_exists(&self.db_pool, changeover_group_id).await?;
        find_attribute(&self.db_pool, attribute_id).await?;

        let record =
            ChangeoverTime::upsert(&self.db_pool, changeover_group_id, attribute_id, changeover_time)
                .await?;

        log_matrix_operation(
            "set_baseline_time",
            changeover_group_id,
            Some(attribute_id),
            Some(record.id),
            upsert_status(record.created_at == record.updated_at),
        );

        Ok(record)
    }

    /// Upsert one matrix cell keyed by (group, attribute, from, to)
    pub async fn set_matrix_cell(
        &self,
        key: MatrixCellKey,
        setup_time: i64,
    ) -> OptiplanResult<ChangeoverData> {
        validate_duration("setup time", setup_time)?;

        ensure_group_exists(&self.db_pool, key.changeover_group_id).await?;
        let attribute = find_attribute(&self.db_pool, key.attribute_id).await?;

        if !attribute.is_param {
            return Err(OptiplanError::InvalidInput(format!(
                "attribute {} is not parameterized and cannot have a transition matrix",
                attribute.id
            )));
        }

        ensure_parameter_of(&self.db_pool, key.from_attr_param_id, attribute.id).await?;
        ensure_parameter_of(&self.db_pool, key.to_attr_param_id, attribute.id).await?;

        let cell = ChangeoverData::upsert(&self.db_pool, key, setup_time).await?;

        log_matrix_operation(
            "set_matrix_cell",
            key.changeover_group_id,
            Some(key.attribute_id),
            Some(cell.id),
            upsert_status(cell.created_at == cell.updated_at),
        );

        Ok(cell)
    }

    /// Delete a baseline together with every matrix cell of its (group, attribute) pair
    pub async fn delete_baseline_time(&self, id: i64) -> OperationResult {
        match self.delete_baseline_cascade(id).await {
            Ok(Some(record)) => {
                log_matrix_operation(
                    "delete_baseline_time",
                    record.changeover_group_id,
                    Some(record.attribute_id),
                    Some(record.id),
                    "deleted",
                );
                OperationResult::ok(messages::BASELINE_DELETED)
            }
            Ok(None) => OperationResult::failure(messages::RECORD_NOT_FOUND),
            Err(e) => {
                error!(changeover_time_id = id, error = %e, "Failed to delete changeover time");
                OperationResult::failure(e.to_string())
            }
        }
    }

    async fn delete_baseline_cascade(&self, id: i64) -> OptiplanResult<Option<ChangeoverTime>> {
        let mut tx = self.db_pool.begin().await?;

        let Some(record) = ChangeoverTime::find_by_id(&mut *tx, id).await? else {
            return Ok(None);
        };

        ChangeoverData::delete_for_matrix(&mut *tx, record.changeover_group_id, record.attribute_id)
            .await?;
        ChangeoverTime::delete(&mut *tx, record.id).await?;

        tx.commit().await?;

        Ok(Some(record))
    }

    /// Delete a single matrix cell
    pub async fn delete_matrix_cell(&self, id: i64) -> OperationResult {
        match ChangeoverData::delete(&self.db_pool, id).await {
            Ok(true) => OperationResult::ok(messages::CELL_DELETED),
            Ok(false) => OperationResult::failure(messages::RECORD_NOT_FOUND),
            Err(e) => {
                warn!(changeover_data_id = id, error = %e, "Failed to delete changeover data");
                OperationResult::failure(e.to_string())
            }
        }
    }

    pub async fn get_matrix(
        &self,
        changeover_group_id: i64,
        attribute_id: i64,
    ) -> OptiplanResult<Vec<ChangeoverData>> {
        Ok(ChangeoverData::list_for_matrix(&self.db_pool, changeover_group_id, attribute_id).await?)
    }

    pub async fn list_baselines(&self, changeover_group_id: i64) -> OptiplanResult<Vec<ChangeoverTime>> {
        Ok(ChangeoverTime::list_for_group(&self.db_pool, changeover_group_id).await?)
    }
}

fn validate_name(name: &str) -> OptiplanResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(OptiplanError::InvalidInput(
            "changeover group name must not be blank".to_string(),
        ));
    }
    Ok(trimmed)
}

fn upsert_status(inserted: bool) -> &'static str {
    if inserted {
        "created"
    } else {
        "updated"
    }
}

async fn ensure_group_exists(pool: &SqlitePool, id: i64) -> OptiplanResult<()> {
    ChangeoverGroup::find_by_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| OptiplanError::not_found("ChangeoverGroup", id))
}

async fn find_attribute(pool: &SqlitePool, id: i64) -> OptiplanResult<Attribute> {
    Attribute::find_by_id(pool, id)
        .await?
        .ok_or_else(|| OptiplanError::not_found("Attribute", id))
}

async fn ensure_parameter_of(
    pool: &SqlitePool,
    parameter_id: i64,
    attribute_id: i64,
) -> OptiplanResult<()> {
    let parameter = AttributeParameter::find_by_id(pool, parameter_id)
        .await?
        .ok_or_else(|| OptiplanError::not_found("AttributeParameter", parameter_id))?;

    if parameter.attribute_id != attribute_id {
        return Err(OptiplanError::InvalidInput(format!(
            "attribute parameter {parameter_id} belongs to attribute {}, not {attribute_id}",
            parameter.attribute_id
        )));
    }

    Ok(())
}
