/*!
 * Serde helpers for persisted resource priority columns and partial updates.
 *
 * Models keep the priority list in its persisted comma-joined form. Callers
 * see it as a JSON array of ids, and either shape is accepted on input.
 */

use super::priority;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum PriorityRepr {
    List(Vec<i64>),
    Encoded(String),
}

/// Serialize an encoded priority column as an array of ids.
///
/// # Usage with serde
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use optiplan_core::utils::serde::{deserialize_priority_list, serialize_priority_list};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(
///         serialize_with = "serialize_priority_list",
///         deserialize_with = "deserialize_priority_list"
///     )]
///     resource_priority: String,
/// }
///
/// let row = Row { resource_priority: "3,1".to_string() };
/// assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"resource_priority":[3,1]}"#);
/// ```
pub fn serialize_priority_list<S>(encoded: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    priority::decode(encoded).serialize(serializer)
}

/// Accept either an array of ids or an already encoded string
pub fn deserialize_priority_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match PriorityRepr::deserialize(deserializer)? {
        PriorityRepr::List(ids) => Ok(priority::encode(&ids)),
        PriorityRepr::Encoded(encoded) => Ok(priority::encode(&priority::decode(&encoded))),
    }
}

/// Keep an explicit `null` apart from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_nullable")]` on an
/// `Option<Option<T>>`: absent is `None`, `null` is `Some(None)`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct TestStruct {
        #[serde(
            serialize_with = "serialize_priority_list",
            deserialize_with = "deserialize_priority_list"
        )]
        value: String,
    }

    #[test]
    fn test_serializes_as_array() {
        let row = TestStruct {
            value: "4,2,9".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"value":[4,2,9]}"#
        );
    }

    #[test]
    fn test_empty_column_serializes_as_empty_array() {
        let row = TestStruct {
            value: String::new(),
        };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"value":[]}"#);
    }

    #[test]
    fn test_deserializes_array_or_string() {
        let from_list: TestStruct = serde_json::from_str(r#"{"value":[1,2]}"#).unwrap();
        assert_eq!(from_list.value, "1,2");

        let from_string: TestStruct = serde_json::from_str(r#"{"value":"1, x,2"}"#).unwrap();
        assert_eq!(from_string.value, "1,2");
    }

    #[derive(Deserialize, Debug, Default)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_nullable")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_nullable_distinguishes_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.note, None);

        let cleared: Patch = serde_json::from_str(r#"{"note":null}"#).unwrap();
        assert_eq!(cleared.note, Some(None));

        let set: Patch = serde_json::from_str(r#"{"note":"rush"}"#).unwrap();
        assert_eq!(set.note, Some(Some("rush".to_string())));
    }
}
