use serde_json::Value;

/// Failure to turn a JSON payload into a typed wire model.
///
/// Every variant that refers to a location inside the payload carries a field
/// path such as `output.generic[2].options[0].value.input.text`, so callers
/// can locate the offending value inside nested structures.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Missing discriminator field `{field}`")]
    MissingDiscriminator { field: String },

    #[error("Field `{field}` has an unexpected type: {reason}")]
    TypeMismatch { field: String, reason: String },

    #[error("Unknown value `{value}` for discriminator `{field}`")]
    UnknownVariant { field: String, value: String },

    #[error("Response type `{variant}` is missing required field `{field}`")]
    MissingRequiredField { variant: String, field: String },

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn type_mismatch(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeMismatch { field: field.into(), reason: reason.into() }
    }

    pub(crate) fn unexpected(field: impl Into<String>, expected: &str, found: &Value) -> Self {
        Self::type_mismatch(field, format!("expected {expected}, found {}", json_kind(found)))
    }

    /// Prepends `prefix` to the field path carried by this error.
    ///
    /// Index prefixes (`[3]`) and index-led paths are joined without a dot.
    pub fn at(self, prefix: &str) -> Self {
        match self {
            Self::MissingDiscriminator { field } => {
                Self::MissingDiscriminator { field: join_path(prefix, &field) }
            }
            Self::TypeMismatch { field, reason } => {
                Self::TypeMismatch { field: join_path(prefix, &field), reason }
            }
            Self::UnknownVariant { field, value } => {
                Self::UnknownVariant { field: join_path(prefix, &field), value }
            }
            Self::MissingRequiredField { variant, field } => {
                Self::MissingRequiredField { variant, field: join_path(prefix, &field) }
            }
            Self::Json(error) => Self::Json(error),
        }
    }

    /// The field path this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingDiscriminator { field }
            | Self::TypeMismatch { field, .. }
            | Self::UnknownVariant { field, .. }
            | Self::MissingRequiredField { field, .. } => Some(field),
            Self::Json(_) => None,
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else if field.is_empty() {
        prefix.to_string()
    } else if field.starts_with('[') {
        format!("{prefix}{field}")
    } else {
        format!("{prefix}.{field}")
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
