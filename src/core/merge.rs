//! Overlay merge policy.

use crate::sources::Payload;

/// Overlay `overrides` onto `base`.
///
/// Top-level keys from `overrides` replace same-named keys in `base`
/// wholesale; nested objects are not merged. Keys unique to either side are
/// kept. An empty `overrides` leaves `base` unchanged.
///
/// # Examples
///
/// ```rust
/// use config_overlay::core::overlay;
/// use serde_json::json;
///
/// let base = json!({ "a": 1, "b": 2 }).as_object().cloned().unwrap();
/// let overrides = json!({ "b": 3, "c": 4 }).as_object().cloned().unwrap();
///
/// let merged = overlay(base, overrides);
/// assert_eq!(serde_json::Value::Object(merged), json!({ "a": 1, "b": 3, "c": 4 }));
/// ```
pub fn overlay(mut base: Payload, overrides: Payload) -> Payload {
    base.extend(overrides);
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_override_wins() {
        let merged = overlay(payload(json!({"a": 1, "b": 2})), payload(json!({"b": 3, "c": 4})));
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_nested_objects_replaced_not_merged() {
        let merged = overlay(
            payload(json!({"server": {"host": "a", "port": 1}})),
            payload(json!({"server": {"port": 2}})),
        );
        assert_eq!(merged["server"], json!({"port": 2}));
    }

    #[test]
    fn test_empty_override_is_noop() {
        let base = payload(json!({"a": 1}));
        assert_eq!(overlay(base.clone(), Payload::new()), base);
    }

    fn small_payload() -> impl Strategy<Value = Payload> {
        prop::collection::btree_map("[a-e]{1,2}", any::<i64>(), 0..8).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_contains_union_of_keys(base in small_payload(), overrides in small_payload()) {
            let merged = overlay(base.clone(), overrides.clone());
            for key in base.keys().chain(overrides.keys()) {
                prop_assert!(merged.contains_key(key));
            }
            prop_assert!(merged.keys().all(|k| base.contains_key(k) || overrides.contains_key(k)));
        }

        #[test]
        fn prop_override_values_win(base in small_payload(), overrides in small_payload()) {
            let merged = overlay(base.clone(), overrides.clone());
            for (key, value) in &overrides {
                prop_assert_eq!(&merged[key], value);
            }
            for (key, value) in &base {
                if !overrides.contains_key(key) {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }

        #[test]
        fn prop_deterministic(base in small_payload(), overrides in small_payload()) {
            prop_assert_eq!(
                overlay(base.clone(), overrides.clone()),
                overlay(base, overrides)
            );
        }
    }
}
