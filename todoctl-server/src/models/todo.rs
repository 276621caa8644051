//! Todo record and its mutable fields

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-assigned todo identifier.
pub type TodoId = i64;

/// A persisted todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub category: String,
    pub state: String,
}

/// Mutable fields of a todo, decoded from create and update payloads.
///
/// Keys match case-insensitively (`title`, `Title` and `TITLE` are the same
/// field). Missing or `null` fields decode to empty strings and unknown
/// fields (including a body `Id`) are ignored. Update always writes all
/// three together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TodoFields {
    pub title: String,
    pub category: String,
    pub state: String,
}

impl TodoFields {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            state: state.into(),
        }
    }
}

impl<'de> Deserialize<'de> for TodoFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldsVisitor)
    }
}

struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
    type Value = TodoFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a todo object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TodoFields, A::Error> {
        let mut fields = TodoFields::default();

        // Later duplicates overwrite earlier ones
        while let Some(key) = map.next_key::<String>()? {
            let slot = if key.eq_ignore_ascii_case("title") {
                &mut fields.title
            } else if key.eq_ignore_ascii_case("category") {
                &mut fields.category
            } else if key.eq_ignore_ascii_case("state") {
                &mut fields.state
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = value;
            }
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_pascal_case_names() {
        let todo = Todo {
            id: 1,
            title: "Buy milk".into(),
            category: "errand".into(),
            state: "open".into(),
        };

        let json = serde_json::to_string(&todo).unwrap();
        assert_eq!(
            json,
            r#"{"Id":1,"Title":"Buy milk","Category":"errand","State":"open"}"#
        );
    }

    #[test]
    fn fields_default_missing_values_to_empty() {
        let fields: TodoFields = serde_json::from_str(r#"{"Title":"Only title"}"#).unwrap();
        assert_eq!(fields.title, "Only title");
        assert!(fields.category.is_empty());
        assert!(fields.state.is_empty());
    }

    #[test]
    fn fields_ignore_id_and_unknown_keys() {
        let fields: TodoFields = serde_json::from_str(
            r#"{"Id":42,"Title":"t","Category":"c","State":"s","Priority":"high"}"#,
        )
        .unwrap();
        assert_eq!(fields, TodoFields::new("t", "c", "s"));
    }

    #[test]
    fn fields_reject_non_object_json() {
        assert!(serde_json::from_str::<TodoFields>("[1, 2]").is_err());
        assert!(serde_json::from_str::<TodoFields>(r#""title""#).is_err());
    }

    #[test]
    fn fields_match_keys_case_insensitively() {
        let fields: TodoFields =
            serde_json::from_str(r#"{"title":"a","CATEGORY":"b","sTaTe":"c"}"#).unwrap();
        assert_eq!(fields, TodoFields::new("a", "b", "c"));
    }

    #[test]
    fn fields_treat_null_as_empty() {
        let fields: TodoFields =
            serde_json::from_str(r#"{"Title":null,"State":"open"}"#).unwrap();
        assert_eq!(fields, TodoFields::new("", "", "open"));
    }

    #[test]
    fn fields_reject_wrong_types() {
        let result = serde_json::from_str::<TodoFields>(r#"{"Title":5}"#);
        assert!(result.is_err());
    }
}
