use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::DecodeError;

/// A wire model that is decoded field by field out of a JSON object.
///
/// Implementations pull their own required and optional fields out of
/// [`Fields`]; nested structured fields are decoded through their own
/// `Decode` implementation so that errors carry the full field path.
pub trait Decode: Sized {
    /// Name reported in `MissingRequiredField` when the type is decoded on
    /// its own rather than inside a tagged response.
    const NAME: &'static str;

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError>;

    fn decode_object(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        Self::decode(&Fields::new(object, Self::NAME))
    }

    fn decode_value(value: &Value) -> Result<Self, DecodeError> {
        let object = value
            .as_object()
            .ok_or_else(|| DecodeError::unexpected("", "object", value))?;
        Self::decode_object(object)
    }
}

/// Read-only view over one JSON object being decoded.
///
/// Absent fields and fields set to `null` are both treated as "not present".
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
    owner: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(object: &'a Map<String, Value>, owner: &'a str) -> Self {
        Self { object, owner }
    }

    fn nested(&self, object: &'a Map<String, Value>) -> Self {
        Self { object, owner: self.owner }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name).filter(|value| !value.is_null())
    }

    fn missing(&self, name: &str) -> DecodeError {
        DecodeError::MissingRequiredField {
            variant: self.owner.to_string(),
            field: name.to_string(),
        }
    }

    pub fn required<T: DeserializeOwned>(&self, name: &str) -> Result<T, DecodeError> {
        let value = self.get(name).ok_or_else(|| self.missing(name))?;
        leaf(name, value)
    }

    pub fn optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, DecodeError> {
        self.get(name).map(|value| leaf(name, value)).transpose()
    }

    pub fn required_nested<T: Decode>(&self, name: &str) -> Result<T, DecodeError> {
        let value = self.get(name).ok_or_else(|| self.missing(name))?;
        self.nested_value(value).map_err(|error| error.at(name))
    }

    pub fn optional_nested<T: Decode>(&self, name: &str) -> Result<Option<T>, DecodeError> {
        self.get(name)
            .map(|value| self.nested_value(value).map_err(|error| error.at(name)))
            .transpose()
    }

    pub fn required_list<T: Decode>(&self, name: &str) -> Result<Vec<T>, DecodeError> {
        let value = self.get(name).ok_or_else(|| self.missing(name))?;
        self.nested_list(value).map_err(|error| error.at(name))
    }

    pub fn optional_list<T: Decode>(&self, name: &str) -> Result<Option<Vec<T>>, DecodeError> {
        self.get(name)
            .map(|value| self.nested_list(value).map_err(|error| error.at(name)))
            .transpose()
    }

    /// Every non-null key of the object that is not listed in `known`.
    pub fn remaining(&self, known: &[&str]) -> Map<String, Value> {
        self.object
            .iter()
            .filter(|(key, value)| !known.contains(&key.as_str()) && !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn nested_value<T: Decode>(&self, value: &'a Value) -> Result<T, DecodeError> {
        let object = value
            .as_object()
            .ok_or_else(|| DecodeError::unexpected("", "object", value))?;
        T::decode(&self.nested(object))
    }

    fn nested_list<T: Decode>(&self, value: &'a Value) -> Result<Vec<T>, DecodeError> {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::unexpected("", "array", value))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.nested_value(item)
                    .map_err(|error| error.at(&format!("[{index}]")))
            })
            .collect()
    }
}

fn leaf<T: DeserializeOwned>(name: &str, value: &Value) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|error| DecodeError::type_mismatch(name, mismatch_reason(&error)))
}

/// Rewrites serde's `invalid type: X, expected Y` as `expected Y, found X`.
fn mismatch_reason(error: &serde_json::Error) -> String {
    let message = error.to_string();
    message
        .strip_prefix("invalid type: ")
        .and_then(|rest| rest.rsplit_once(", expected "))
        .map(|(found, expected)| format!("expected {expected}, found {found}"))
        .unwrap_or(message)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_reads_present_value() {
        let fixture = object(json!({"time": 500}));
        let fields = Fields::new(&fixture, "pause");

        let actual: i64 = fields.required("time").unwrap();

        assert_eq!(actual, 500);
    }

    #[test]
    fn test_required_null_is_missing() {
        let fixture = object(json!({"time": null}));
        let fields = Fields::new(&fixture, "pause");

        let actual = fields.required::<i64>("time").unwrap_err();

        assert!(matches!(
            actual,
            DecodeError::MissingRequiredField { ref variant, ref field }
                if variant == "pause" && field == "time"
        ));
    }

    #[test]
    fn test_optional_keeps_empty_string_distinct_from_absent() {
        let fixture = object(json!({"title": ""}));
        let fields = Fields::new(&fixture, "image");

        let title: Option<String> = fields.optional("title").unwrap();
        let description: Option<String> = fields.optional("description").unwrap();

        assert_eq!(title, Some(String::new()));
        assert_eq!(description, None);
    }

    #[test]
    fn test_leaf_type_mismatch() {
        let fixture = object(json!({"typing": "yes"}));
        let fields = Fields::new(&fixture, "pause");

        let actual = fields.optional::<bool>("typing").unwrap_err();

        assert!(matches!(
            actual,
            DecodeError::TypeMismatch { ref field, ref reason }
                if field == "typing" && reason == "expected a boolean, found string \"yes\""
        ));
    }

    #[test]
    fn test_remaining_skips_null_values() {
        let fixture = object(json!({"body": ["a"], "answer": null, "extra": ["c"]}));
        let fields = Fields::new(&fixture, "search");

        let actual = fields.remaining(&["body", "title", "url"]);
        let expected = object(json!({"extra": ["c"]}));

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_remaining_skips_known_keys() {
        let fixture = object(json!({"body": ["a"], "answer": ["b"]}));
        let fields = Fields::new(&fixture, "search");

        let actual = fields.remaining(&["body", "title", "url"]);
        let expected = object(json!({"answer": ["b"]}));

        assert_eq!(actual, expected);
    }
}
