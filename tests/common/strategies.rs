use proptest::prelude::*;

/// Strategy for generating priority lists of non-negative resource ids
pub fn priority_list_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..1_000_000, 0..20)
}

/// Strategy for generating comma separated text with noise tokens mixed in
pub fn noisy_priority_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            (0i64..1000).prop_map(|id| id.to_string()),
            (0i64..1000).prop_map(|id| format!("  {id} ")),
            "[a-z]{1,4}",
            Just(String::new()),
        ],
        0..10,
    )
    .prop_map(|tokens| tokens.join(","))
}

/// One step of a scenario registry workload. `slot` picks among the
/// scenarios created so far; slots past the end address a missing id.
#[derive(Debug, Clone)]
pub enum ScenarioOp {
    Create { is_default: bool },
    Update { slot: usize, is_default: Option<bool> },
    SetDefault { slot: usize },
    Delete { slot: usize },
}

/// Strategy for generating interleavings of registry writes
pub fn scenario_ops_strategy() -> impl Strategy<Value = Vec<ScenarioOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => any::<bool>().prop_map(|is_default| ScenarioOp::Create { is_default }),
            2 => (0usize..8, prop::option::of(any::<bool>()))
                .prop_map(|(slot, is_default)| ScenarioOp::Update { slot, is_default }),
            2 => (0usize..8).prop_map(|slot| ScenarioOp::SetDefault { slot }),
            1 => (0usize..8).prop_map(|slot| ScenarioOp::Delete { slot }),
        ],
        1..24,
    )
}
