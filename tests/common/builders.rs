use optiplan_core::models::{Attribute, AttributeParameter, ChangeoverGroup, NewAttribute};
use sqlx::SqlitePool;

/// A group plus one parameterized attribute with three parameter values
pub struct MatrixFixture {
    pub group: ChangeoverGroup,
    pub attribute: Attribute,
    pub parameters: Vec<AttributeParameter>,
}

pub async fn create_attribute(pool: &SqlitePool, name: &str, is_param: bool) -> Attribute {
    Attribute::create(
        pool,
        NewAttribute {
            name: name.to_string(),
            is_param: Some(is_param),
        },
    )
    .await
    .expect("attribute")
}

pub async fn create_parameter(
    pool: &SqlitePool,
    attribute_id: i64,
    name: &str,
) -> AttributeParameter {
    AttributeParameter::create(pool, attribute_id, name)
        .await
        .expect("attribute parameter")
}

pub async fn matrix_fixture(pool: &SqlitePool) -> MatrixFixture {
    let group = ChangeoverGroup::create(pool, "Line 1")
        .await
        .expect("changeover group");
    let attribute = create_attribute(pool, "Color", true).await;

    let mut parameters = Vec::new();
    for name in ["Red", "Green", "Blue"] {
        parameters.push(create_parameter(pool, attribute.id, name).await);
    }

    MatrixFixture {
        group,
        attribute,
        parameters,
    }
}
