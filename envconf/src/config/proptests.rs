//! Property-based tests for deep merging.

use super::merger::DeepMerger;
use super::Mapping;
use proptest::prelude::*;
use serde_json::Value;

// Strategy for generating scalar leaves
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

// Strategy for generating nested values; a small key alphabet forces collisions
fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-e]", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map("[a-e]", value_strategy(), 0..5)
        .prop_map(|map| map.into_iter().collect())
}

fn merged(target: &Mapping, source: &Mapping) -> Mapping {
    let mut result = target.clone();
    DeepMerger::merge_into(&mut result, source);
    result
}

/// Every source leaf is visible in the result at the same path.
fn assert_source_wins(result: &Mapping, source: &Mapping) {
    for (key, value) in source {
        let actual = result.get(key).expect("source key missing from result");
        match (actual, value) {
            (Value::Object(actual_map), Value::Object(source_map)) => {
                assert_source_wins(actual_map, source_map);
            }
            (_, Value::Object(_)) => panic!("mapping in source was not kept as mapping"),
            _ => assert_eq!(actual, value),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    // Merging a mapping into itself changes nothing
    #[test]
    fn merge_with_self_is_identity(map in mapping_strategy()) {
        prop_assert_eq!(merged(&map, &map), map);
    }

    // Applying the same source twice equals applying it once
    #[test]
    fn merge_is_idempotent(target in mapping_strategy(), source in mapping_strategy()) {
        let once = merged(&target, &source);
        let twice = merged(&once, &source);
        prop_assert_eq!(twice, once);
    }

    // Keys from both sides survive
    #[test]
    fn merge_unions_keys(target in mapping_strategy(), source in mapping_strategy()) {
        let result = merged(&target, &source);
        for key in target.keys().chain(source.keys()) {
            prop_assert!(result.contains_key(key));
        }
        for key in result.keys() {
            prop_assert!(target.contains_key(key) || source.contains_key(key));
        }
    }

    // Later leaves overwrite earlier ones, at any depth
    #[test]
    fn merge_is_right_biased(target in mapping_strategy(), source in mapping_strategy()) {
        let result = merged(&target, &source);
        assert_source_wins(&result, &source);
    }

    // Merging into an empty mapping yields the source
    #[test]
    fn merge_into_empty_copies_source(source in mapping_strategy()) {
        prop_assert_eq!(merged(&Mapping::new(), &source), source);
    }

    // Target keys the source does not mention are left alone
    #[test]
    fn merge_preserves_untouched_keys(target in mapping_strategy(), source in mapping_strategy()) {
        let result = merged(&target, &source);
        for (key, value) in &target {
            if !source.contains_key(key) {
                prop_assert_eq!(result.get(key), Some(value));
            }
        }
    }
}
