use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::{Decode, DecodeError, Fields};

/// The type of user input. Only `text` is currently defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageInputType {
    #[default]
    Text,
}

/// An input object that includes the input text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[setters(strip_option, into)]
pub struct MessageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageInputType>,
    /// The text of the user input. Limited to 2048 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Intents to use when evaluating the user input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents: Option<Vec<RuntimeIntent>>,
    /// Entities to use when evaluating the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<RuntimeEntity>>,
    /// For internal use only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<MessageInputOptions>,
}

impl MessageInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            message_type: Some(MessageInputType::Text),
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

impl Decode for MessageInput {
    const NAME: &'static str = "MessageInput";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            message_type: fields.optional("message_type")?,
            text: fields.optional("text")?,
            intents: fields.optional_list("intents")?,
            entities: fields.optional_list("entities")?,
            suggestion_id: fields.optional("suggestion_id")?,
            options: fields.optional("options")?,
        })
    }
}

/// Optional properties that control how the assistant responds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(strip_option)]
pub struct MessageInputOptions {
    /// Whether to restart dialog processing at the root of the dialog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<bool>,
    /// Whether to return more than one intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_intents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling: Option<MessageInputOptionsSpelling>,
    /// Whether to return additional diagnostic information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    /// Whether to return session context with the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_context: Option<bool>,
    /// Whether to return session context, including full conversation state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<bool>,
}

/// Spelling correction options for the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(strip_option)]
pub struct MessageInputOptionsSpelling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_correct: Option<bool>,
}

/// An intent identified in the user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeIntent {
    /// The name of the recognized intent.
    pub intent: String,
    /// A decimal percentage that represents confidence in the intent.
    pub confidence: f64,
    /// The skill that identified the intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl RuntimeIntent {
    pub fn new(intent: impl Into<String>, confidence: f64) -> Self {
        Self { intent: intent.into(), confidence, skill: None }
    }
}

impl Decode for RuntimeIntent {
    const NAME: &'static str = "RuntimeIntent";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            intent: fields.required("intent")?,
            confidence: fields.required("confidence")?,
            skill: fields.optional("skill")?,
        })
    }
}

/// An entity value identified in the user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeEntity {
    /// An entity detected in the input.
    pub entity: String,
    /// Zero-based character offsets of the entity value in the input text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<i64>>,
    /// The term in the input text that was recognized as an entity value.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// The recognized capture groups for the entity, as defined by the entity
    /// pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<CaptureGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<RuntimeEntityInterpretation>,
    /// Alternative values for system entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<RuntimeEntityAlternative>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<RuntimeEntityRole>,
    /// The skill that recognized the entity value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl RuntimeEntity {
    pub fn new(entity: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            location: None,
            value: value.into(),
            confidence: None,
            groups: None,
            interpretation: None,
            alternatives: None,
            role: None,
            skill: None,
        }
    }
}

impl Decode for RuntimeEntity {
    const NAME: &'static str = "RuntimeEntity";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            entity: fields.required("entity")?,
            location: fields.optional("location")?,
            value: fields.required("value")?,
            confidence: fields.optional("confidence")?,
            groups: fields.optional("groups")?,
            interpretation: fields.optional("interpretation")?,
            alternatives: fields.optional("alternatives")?,
            role: fields.optional("role")?,
            skill: fields.optional("skill")?,
        })
    }
}

/// A recognized capture group for a pattern-based entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureGroup {
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<i64>>,
}

/// Additional detail about a system entity value.
///
/// Only the commonly used properties are typed; any other property returned
/// by the service is kept in `additional`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeEntityInterpretation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub festival: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(flatten)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

/// An alternative value for the recognized entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeEntityAlternative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// An object describing the role played by a system entity that is specified
/// as the beginning or the end of a range recognized in the user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEntityRole {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
}
