use crate::constants::{fallback, system::OPTIMIZER_SETTING_ID};
use crate::error::OptiplanResult;
use crate::utils::priority;
use crate::utils::serde::{deserialize_priority_list, serialize_priority_list};
use crate::validation::{validate_campaign_window_days, validate_priority_ids};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// Global fallback run parameters, a single row with `id = 1`.
///
/// The row is created lazily by the first [`OptimizerSetting::update`];
/// [`OptimizerSetting::get_or_default`] serves hard-coded fallbacks until then.
/// Maps to `optimizer_settings` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OptimizerSetting {
    /// `0` for the unsaved fallback instance
    pub id: i64,
    pub strategy: String,
    pub campaign_window_days: i64,
    pub gravity: bool,
    #[serde(
        serialize_with = "serialize_priority_list",
        deserialize_with = "deserialize_priority_list"
    )]
    pub resource_priority: String,
    pub updated_at: DateTime<Utc>,
}

/// Partial settings write; `None` keeps the current (or fallback) value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizerSettingsUpdate {
    pub strategy: Option<String>,
    pub campaign_window_days: Option<i64>,
    pub gravity: Option<bool>,
    pub resource_priority: Option<Vec<i64>>,
}

impl Default for OptimizerSetting {
    fn default() -> Self {
        Self {
            id: 0,
            strategy: fallback::STRATEGY.to_string(),
            campaign_window_days: fallback::CAMPAIGN_WINDOW_DAYS,
            gravity: fallback::GRAVITY,
            resource_priority: String::new(),
            updated_at: Utc::now(),
        }
    }
}

impl OptimizerSetting {
    /// Decoded resource priority list
    pub fn priority_list(&self) -> Vec<i64> {
        priority::decode(&self.resource_priority)
    }

    /// Read the singleton, `None` until it has been written once
    pub async fn find(pool: &SqlitePool) -> Result<Option<OptimizerSetting>, sqlx::Error> {
        sqlx::query_as::<_, OptimizerSetting>(
            r#"
            SELECT id, strategy, campaign_window_days, gravity, resource_priority, updated_at
            FROM optimizer_settings
            WHERE id = ?1
            "#,
        )
        .bind(OPTIMIZER_SETTING_ID)
        .fetch_optional(pool)
        .await
    }

    /// Read the singleton, falling back to hard-coded defaults when absent
    pub async fn get_or_default(pool: &SqlitePool) -> Result<OptimizerSetting, sqlx::Error> {
        Ok(Self::find(pool).await?.unwrap_or_default())
    }

    /// Merge `update` over the stored values (or the fallbacks) and upsert row `id = 1`.
    ///
    /// The merge is a single `INSERT .. ON CONFLICT` statement; negative days or
    /// priority ids are rejected before it runs.
    pub async fn update(
        pool: &SqlitePool,
        update: OptimizerSettingsUpdate,
    ) -> OptiplanResult<OptimizerSetting> {
        validate_campaign_window_days(update.campaign_window_days)?;
        validate_priority_ids(update.resource_priority.as_deref())?;

        let saved = sqlx::query_as::<_, OptimizerSetting>(
            r#"
            INSERT INTO optimizer_settings
                (id, strategy, campaign_window_days, gravity, resource_priority, updated_at)
            VALUES (?1, COALESCE(?2, ?6), COALESCE(?3, ?7), COALESCE(?4, ?8), COALESCE(?5, ''), ?9)
            ON CONFLICT (id) DO UPDATE SET
                strategy = COALESCE(?2, strategy),
                campaign_window_days = COALESCE(?3, campaign_window_days),
                gravity = COALESCE(?4, gravity),
                resource_priority = COALESCE(?5, resource_priority),
                updated_at = ?9
            RETURNING id, strategy, campaign_window_days, gravity, resource_priority, updated_at
            "#,
        )
        .bind(OPTIMIZER_SETTING_ID)
        .bind(update.strategy)
        .bind(update.campaign_window_days)
        .bind(update.gravity)
        .bind(update.resource_priority.map(|ids| priority::encode(&ids)))
        .bind(fallback::STRATEGY)
        .bind(fallback::CAMPAIGN_WINDOW_DAYS)
        .bind(fallback::GRAVITY)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(saved)
    }
}
