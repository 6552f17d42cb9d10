//! Deep merging of configuration mappings.
//!
//! Merging is in place and right-biased: values from the source overwrite
//! values in the target, except that two mappings meeting at the same key are
//! merged key by key instead of replaced. Sequences are leaves; a later
//! sequence replaces an earlier one wholesale.

use serde_json::Value;

use crate::config::Mapping;

/// Merges configuration mappings according to deep-merge rules.
///
/// # Examples
///
/// ```
/// use envconf::config::DeepMerger;
/// use serde_json::json;
///
/// let mut target = json!({"db": {"host": "localhost", "port": 5432}});
/// let source = json!({"db": {"host": "db.internal"}, "debug": false});
///
/// DeepMerger::merge_into(
///     target.as_object_mut().unwrap(),
///     source.as_object().unwrap(),
/// );
/// assert_eq!(
///     target,
///     json!({"db": {"host": "db.internal", "port": 5432}, "debug": false})
/// );
/// ```
pub struct DeepMerger;

impl DeepMerger {
    /// Merge `source` into `target` (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Keys are unioned
    /// - Mapping onto mapping: merged recursively
    /// - Mapping onto anything else: replaced by a copy of the mapping
    /// - Scalars, sequences and nulls: replaced
    pub fn merge_into(target: &mut Mapping, source: &Mapping) {
        for (key, value) in source {
            match target.get_mut(key) {
                Some(existing) => Self::merge_value(existing, value),
                None => {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Merge a single value into its counterpart.
    pub fn merge_value(target: &mut Value, source: &Value) {
        match (target, source) {
            (Value::Object(target_map), Value::Object(source_map)) => {
                Self::merge_into(target_map, source_map);
            }
            (target, source) => *target = source.clone(),
        }
    }

    /// Merge several mappings, lowest precedence first.
    #[must_use]
    pub fn merge_all<'a, I>(sources: I) -> Mapping
    where
        I: IntoIterator<Item = &'a Mapping>,
    {
        let mut result = Mapping::new();
        for source in sources {
            Self::merge_into(&mut result, source);
        }
        result
    }
}
