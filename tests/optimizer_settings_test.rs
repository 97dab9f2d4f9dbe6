//! Optimizer Settings Tests

mod common;

use common::{setup_file_pool, setup_test_pool};
use optiplan_core::models::{OptimizerSetting, OptimizerSettingsUpdate};
use optiplan_core::ErrorKind;

#[tokio::test]
async fn test_fallbacks_before_first_write() {
    let pool = setup_test_pool().await;

    assert!(OptimizerSetting::find(&pool).await.unwrap().is_none());

    let settings = OptimizerSetting::get_or_default(&pool).await.unwrap();
    assert_eq!(settings.id, 0);
    assert_eq!(settings.strategy, "balanced");
    assert_eq!(settings.campaign_window_days, 0);
    assert!(settings.gravity);
    assert!(settings.priority_list().is_empty());
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let pool = setup_test_pool().await;

    let saved = OptimizerSetting::update(
        &pool,
        OptimizerSettingsUpdate {
            strategy: Some("throughput".to_string()),
            resource_priority: Some(vec![3, 1]),
            ..OptimizerSettingsUpdate::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(saved.id, 1);
    assert_eq!(saved.strategy, "throughput");
    assert!(saved.gravity);
    assert_eq!(saved.priority_list(), vec![3, 1]);

    let saved = OptimizerSetting::update(
        &pool,
        OptimizerSettingsUpdate {
            gravity: Some(false),
            campaign_window_days: Some(4),
            ..OptimizerSettingsUpdate::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(saved.strategy, "throughput");
    assert_eq!(saved.campaign_window_days, 4);
    assert!(!saved.gravity);
    assert_eq!(saved.priority_list(), vec![3, 1]);

    let stored = OptimizerSetting::find(&pool).await.unwrap().unwrap();
    assert_eq!(stored, saved);
}

#[tokio::test]
async fn test_negative_values_are_rejected() {
    let pool = setup_test_pool().await;

    let err = OptimizerSetting::update(
        &pool,
        OptimizerSettingsUpdate {
            campaign_window_days: Some(-3),
            ..OptimizerSettingsUpdate::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = OptimizerSetting::update(
        &pool,
        OptimizerSettingsUpdate {
            resource_priority: Some(vec![-1, 2]),
            ..OptimizerSettingsUpdate::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    assert!(OptimizerSetting::find(&pool).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_partial_updates_all_land() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_file_pool(dir.path(), 4).await;

    let updates = vec![
        OptimizerSettingsUpdate {
            strategy: Some("throughput".to_string()),
            ..OptimizerSettingsUpdate::default()
        },
        OptimizerSettingsUpdate {
            campaign_window_days: Some(6),
            ..OptimizerSettingsUpdate::default()
        },
        OptimizerSettingsUpdate {
            gravity: Some(false),
            ..OptimizerSettingsUpdate::default()
        },
        OptimizerSettingsUpdate {
            resource_priority: Some(vec![7, 3]),
            ..OptimizerSettingsUpdate::default()
        },
    ];

    let results = futures::future::join_all(
        updates
            .into_iter()
            .map(|update| OptimizerSetting::update(&pool, update)),
    )
    .await;
    for result in results {
        result.unwrap();
    }

    let stored = OptimizerSetting::find(&pool).await.unwrap().unwrap();
    assert_eq!(stored.strategy, "throughput");
    assert_eq!(stored.campaign_window_days, 6);
    assert!(!stored.gravity);
    assert_eq!(stored.priority_list(), vec![7, 3]);
}
