use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

/// A production property such as color or material.
///
/// Parameterized attributes draw their values from [`AttributeParameter`]s and
/// are the only ones that can carry a changeover matrix.
/// Maps to `attributes` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    pub is_param: bool,
}

/// One enumerated value of a parameterized attribute (e.g. "Red")
/// Maps to `attribute_parameters` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AttributeParameter {
    pub id: i64,
    pub attribute_id: i64,
    pub name: String,
}

/// New Attribute for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttribute {
    pub name: String,
    /// Defaults to parameterized when not given
    pub is_param: Option<bool>,
}

impl Attribute {
    pub async fn create<'e, E>(executor: E, new_attribute: NewAttribute) -> Result<Attribute, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Attribute>(
            r#"
            INSERT INTO attributes (name, is_param)
            VALUES (?1, ?2)
            RETURNING id, name, is_param
            "#,
        )
        .bind(new_attribute.name)
        .bind(new_attribute.is_param.unwrap_or(true))
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Attribute>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Attribute>("SELECT id, name, is_param FROM attributes WHERE id = ?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Attribute>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Attribute>("SELECT id, name, is_param FROM attributes ORDER BY name")
            .fetch_all(executor)
            .await
    }
}

impl AttributeParameter {
    pub async fn create<'e, E>(
        executor: E,
        attribute_id: i64,
        name: &str,
    ) -> Result<AttributeParameter, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, AttributeParameter>(
            r#"
            INSERT INTO attribute_parameters (attribute_id, name)
            VALUES (?1, ?2)
            RETURNING id, attribute_id, name
            "#,
        )
        .bind(attribute_id)
        .bind(name)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E>(
        executor: E,
        id: i64,
    ) -> Result<Option<AttributeParameter>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, AttributeParameter>(
            "SELECT id, attribute_id, name FROM attribute_parameters WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn list_for_attribute<'e, E>(
        executor: E,
        attribute_id: i64,
    ) -> Result<Vec<AttributeParameter>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, AttributeParameter>(
            r#"
            SELECT id, attribute_id, name
            FROM attribute_parameters
            WHERE attribute_id = ?1
            ORDER BY id
            "#,
        )
        .bind(attribute_id)
        .fetch_all(executor)
        .await
    }
}
