//! Scenario Registry Tests
//!
//! Name uniqueness, partial updates and the single-default invariant.

mod common;

use common::strategies::{scenario_ops_strategy, ScenarioOp};
use common::{setup_file_pool, setup_test_pool};
use futures::future::join_all;
use optiplan_core::constants::messages;
use optiplan_core::models::{NewOptimizationScenario, OptimizationScenario, ScenarioUpdate};
use optiplan_core::services::ScenarioRegistry;
use optiplan_core::{ErrorKind, OptiplanError};
use proptest::prelude::*;
use sqlx::SqlitePool;

fn scenario(name: &str) -> NewOptimizationScenario {
    NewOptimizationScenario {
        name: name.to_string(),
        ..NewOptimizationScenario::default()
    }
}

async fn default_ids(pool: &SqlitePool) -> Vec<i64> {
    OptimizationScenario::list_all(pool)
        .await
        .unwrap()
        .into_iter()
        .filter(|s| s.is_default)
        .map(|s| s.id)
        .collect()
}

#[tokio::test]
async fn test_create_and_read_back() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool);

    let created = registry
        .create(
            NewOptimizationScenario {
                name: "Rush order".to_string(),
                description: Some("Expedite everything".to_string()),
                strategy: Some("throughput".to_string()),
                campaign_window_days: Some(7),
                gravity: Some(false),
                resource_priority: vec![5, 2, 9],
            },
            false,
        )
        .await
        .unwrap();

    assert!(!created.is_default);
    assert_eq!(created.priority_list(), vec![5, 2, 9]);
    assert_eq!(created.gravity, Some(false));

    let fetched = registry.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool);

    registry.create(scenario("Weekend"), false).await.unwrap();
    let err = registry.create(scenario("Weekend"), false).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        err.to_string(),
        format!("Conflict: {}", messages::SCENARIO_NAME_TAKEN)
    );
}

#[tokio::test]
async fn test_create_default_clears_previous_default() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool.clone());

    let a = registry.create(scenario("A"), true).await.unwrap();
    assert_eq!(default_ids(&pool).await, vec![a.id]);

    let b = registry.create(scenario("B"), true).await.unwrap();
    assert_eq!(default_ids(&pool).await, vec![b.id]);
    assert_eq!(OptimizationScenario::count_defaults(&pool).await.unwrap(), 1);
    assert_eq!(registry.default_scenario().await.unwrap().unwrap().id, b.id);
}

#[tokio::test]
async fn test_set_default_swaps_flag() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool.clone());

    let a = registry.create(scenario("A"), true).await.unwrap();
    let b = registry.create(scenario("B"), false).await.unwrap();

    let result = registry.set_default(b.id).await;
    assert!(result.success);
    assert_eq!(result.message, messages::SCENARIO_DEFAULT_SET);
    assert_eq!(default_ids(&pool).await, vec![b.id]);

    let result = registry.set_default(a.id).await;
    assert!(result.success);
    assert_eq!(default_ids(&pool).await, vec![a.id]);
}

#[tokio::test]
async fn test_set_default_on_missing_scenario_keeps_current_default() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool.clone());

    let a = registry.create(scenario("A"), true).await.unwrap();

    let result = registry.set_default(9999).await;
    assert!(!result.success);
    assert!(result.message.contains(messages::SCENARIO_NOT_FOUND));

    assert_eq!(default_ids(&pool).await, vec![a.id]);
}

#[tokio::test]
async fn test_update_only_touches_supplied_fields() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool);

    let created = registry
        .create(
            NewOptimizationScenario {
                name: "Night".to_string(),
                strategy: Some("balanced".to_string()),
                campaign_window_days: Some(3),
                resource_priority: vec![1, 2],
                ..NewOptimizationScenario::default()
            },
            false,
        )
        .await
        .unwrap();

    let updated = registry
        .update(
            created.id,
            ScenarioUpdate {
                campaign_window_days: Some(Some(10)),
                resource_priority: Some(vec![4]),
                ..ScenarioUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Night");
    assert_eq!(updated.strategy.as_deref(), Some("balanced"));
    assert_eq!(updated.campaign_window_days, Some(10));
    assert_eq!(updated.priority_list(), vec![4]);
}

#[tokio::test]
async fn test_update_to_default_clears_others() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool.clone());

    registry.create(scenario("A"), true).await.unwrap();
    let b = registry.create(scenario("B"), false).await.unwrap();

    let updated = registry
        .update(
            b.id,
            ScenarioUpdate {
                is_default: Some(true),
                ..ScenarioUpdate::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.is_default);
    assert_eq!(default_ids(&pool).await, vec![b.id]);
}

#[tokio::test]
async fn test_update_errors() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool);

    registry.create(scenario("A"), false).await.unwrap();
    let b = registry.create(scenario("B"), false).await.unwrap();

    let err = registry
        .update(9999, ScenarioUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OptiplanError::NotFound { .. }));

    let err = registry
        .update(
            b.id,
            ScenarioUpdate {
                name: Some("A".to_string()),
                ..ScenarioUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let err = registry
        .update(
            b.id,
            ScenarioUpdate {
                campaign_window_days: Some(Some(-2)),
                ..ScenarioUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_delete_and_list_order() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool);

    let zulu = registry.create(scenario("Zulu"), false).await.unwrap();
    registry.create(scenario("Alpha"), false).await.unwrap();

    let names: Vec<String> = registry
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "Zulu"]);

    let result = registry.delete(zulu.id).await;
    assert!(result.success);
    assert_eq!(result.message, messages::SCENARIO_DELETED);

    let result = registry.delete(zulu.id).await;
    assert!(!result.success);
    assert_eq!(result.message, messages::SCENARIO_NOT_FOUND);
}

#[tokio::test]
async fn test_priority_ids_and_cleared_fields() {
    let pool = setup_test_pool().await;
    let registry = ScenarioRegistry::new(pool.clone());

    let err = registry
        .create(
            NewOptimizationScenario {
                name: "Broken".to_string(),
                resource_priority: vec![-7],
                ..NewOptimizationScenario::default()
            },
            false,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(registry.list().await.unwrap().is_empty());

    let created = registry
        .create(
            NewOptimizationScenario {
                name: "Weekend".to_string(),
                description: Some("Skeleton crew".to_string()),
                strategy: Some("throughput".to_string()),
                campaign_window_days: Some(5),
                gravity: Some(false),
                resource_priority: vec![2, 1],
            },
            false,
        )
        .await
        .unwrap();

    let err = registry
        .update(
            created.id,
            ScenarioUpdate {
                resource_priority: Some(vec![3, -1]),
                ..ScenarioUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    // explicit nulls fall back to the global settings again
    let cleared = registry
        .update(
            created.id,
            ScenarioUpdate {
                description: Some(None),
                strategy: Some(None),
                campaign_window_days: Some(None),
                gravity: Some(None),
                ..ScenarioUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.name, "Weekend");
    assert!(cleared.description.is_none());
    assert!(cleared.strategy.is_none());
    assert!(cleared.campaign_window_days.is_none());
    assert!(cleared.gravity.is_none());
    assert_eq!(cleared.priority_list(), vec![2, 1]);

    let patch: ScenarioUpdate =
        serde_json::from_str(r#"{"description":null,"strategy":"balanced"}"#).unwrap();
    let patched = registry.update(created.id, patch).await.unwrap();
    assert!(patched.description.is_none());
    assert_eq!(patched.strategy.as_deref(), Some("balanced"));
    assert!(patched.gravity.is_none());
}

#[tokio::test]
async fn test_concurrent_set_default_leaves_single_default() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_file_pool(dir.path(), 8).await;
    let registry = ScenarioRegistry::new(pool.clone());

    let mut ids = Vec::new();
    for i in 0..6 {
        let created = registry
            .create(scenario(&format!("Line {i}")), i == 0)
            .await
            .unwrap();
        ids.push(created.id);
    }

    for _ in 0..5 {
        let results = join_all(ids.iter().map(|id| registry.set_default(*id))).await;
        assert!(results.iter().all(|r| r.success), "{results:?}");

        let defaults = default_ids(&pool).await;
        assert_eq!(defaults.len(), 1);
        assert!(ids.contains(&defaults[0]));
    }
}

fn pick(ids: &[i64], slot: usize) -> i64 {
    ids.get(slot).copied().unwrap_or(9_999)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: no interleaving of registry writes leaves more than one default
    #[test]
    fn at_most_one_default_after_every_step(ops in scenario_ops_strategy()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let pool = setup_test_pool().await;
            let registry = ScenarioRegistry::new(pool.clone());
            let mut ids: Vec<i64> = Vec::new();

            for (step, op) in ops.iter().enumerate() {
                match op {
                    ScenarioOp::Create { is_default } => {
                        let created = registry
                            .create(scenario(&format!("Scenario {step}")), *is_default)
                            .await
                            .unwrap();
                        ids.push(created.id);
                    }
                    ScenarioOp::Update { slot, is_default } => {
                        let _ = registry
                            .update(
                                pick(&ids, *slot),
                                ScenarioUpdate {
                                    is_default: *is_default,
                                    ..ScenarioUpdate::default()
                                },
                            )
                            .await;
                    }
                    ScenarioOp::SetDefault { slot } => {
                        let id = pick(&ids, *slot);
                        let result = registry.set_default(id).await;
                        if result.success {
                            assert_eq!(default_ids(&pool).await, vec![id]);
                        }
                    }
                    ScenarioOp::Delete { slot } => {
                        let id = pick(&ids, *slot);
                        if registry.delete(id).await.success {
                            ids.retain(|existing| *existing != id);
                        }
                    }
                }

                let defaults = OptimizationScenario::count_defaults(&pool).await.unwrap();
                assert!(defaults <= 1, "step {step} ({op:?}) left {defaults} defaults");
            }
        });
    }
}
