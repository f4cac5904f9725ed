use derive_setters::Setters;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DecodeError, MessageInput, RuntimeEntity, RuntimeIntent, RuntimeResponseGeneric};

/// Response to creating a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
}

/// Body of a message request, stateful or stateless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[setters(strip_option, into)]
pub struct MessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<MessageInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<MessageContext>,
    /// A string value that identifies the user who is interacting with the
    /// assistant. Used for billing and for deleting user data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// State information for the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[setters(strip_option)]
pub struct MessageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<MessageContextGlobal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<MessageContextSkills>,
}

/// Session context data that is shared by all skills used by the assistant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageContextGlobal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<MessageContextGlobalSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Built-in system properties that apply to all skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageContextGlobalSystem {
    /// The user time zone. The assistant uses it to interpret dates and times
    /// in the user input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Number of interactions with the user, incremented by the assistant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// The base time for interpreting relative time mentions in user input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_start_time: Option<String>,
    /// Opaque state token returned by stateless calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_user_input: Option<bool>,
}

/// Skill-specific context, keyed by skill name (`main skill`, `actions skill`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageContextSkills(Map<String, Value>);

impl MessageContextSkills {
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Assistant output to be rendered or processed by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageOutput {
    /// Responses intended to be processed by a generic channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic: Option<Vec<RuntimeResponseGeneric>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents: Option<Vec<RuntimeIntent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<RuntimeEntity>>,
    /// Actions the client application should perform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<DialogNodeAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<MessageOutputDebug>,
    /// Arbitrary variables included by the dialog or action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_defined: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling: Option<MessageOutputSpelling>,
}

/// A client or server action the dialog requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogNodeAction {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    /// The context variable the result of the action is stored in.
    pub result_variable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

/// Diagnostic information, returned when `debug` is requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageOutputDebug {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_visited: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_messages: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_exited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_exited_reason: Option<String>,
}

/// Spelling correction that was applied to the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOutputSpelling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_text: Option<String>,
}

/// A response from the assistant to a stateful message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub output: MessageOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<MessageContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl MessageResponse {
    /// Decodes a response body, running `output.generic` through the variant
    /// decoder.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (mut response, generic) = split_generic::<Self>(bytes)?;
        response.output.generic = generic;
        Ok(response)
    }
}

/// A response from the assistant to a stateless message. The full context is
/// always returned so the client can send it back on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponseStateless {
    pub output: MessageOutput,
    pub context: MessageContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl MessageResponseStateless {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (mut response, generic) = split_generic::<Self>(bytes)?;
        response.output.generic = generic;
        Ok(response)
    }
}

type Generic = Option<Vec<RuntimeResponseGeneric>>;

fn split_generic<T: DeserializeOwned>(bytes: &[u8]) -> Result<(T, Generic), DecodeError> {
    let mut body: Value = serde_json::from_slice(bytes)?;

    let generic = match body.get_mut("output").and_then(Value::as_object_mut) {
        Some(output) => output.remove("generic"),
        None => None,
    };
    let generic = match generic {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            crate::decode_generic_list(&items).map_err(|error| error.at("output.generic"))?,
        ),
        Some(other) => return Err(DecodeError::unexpected("output.generic", "array", &other)),
    };

    Ok((serde_json::from_value(body)?, generic))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{ResponseType, RuntimeResponse};

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_message_response_decodes_generic_items() {
        let fixture = bytes(json!({
            "output": {
                "generic": [
                    {"response_type": "text", "text": "Hi there"},
                    {"response_type": "pause", "time": 500, "typing": true}
                ],
                "intents": [{"intent": "greeting", "confidence": 1.0}]
            },
            "user_id": "u-1"
        }));

        let actual = MessageResponse::from_slice(&fixture).unwrap();
        let types: Vec<ResponseType> = actual
            .output
            .generic
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(RuntimeResponse::response_type)
            .collect();

        assert_eq!(types, vec![ResponseType::Text, ResponseType::Pause]);
        assert_eq!(actual.output.intents, Some(vec![RuntimeIntent::new("greeting", 1.0)]));
        assert_eq!(actual.user_id, Some("u-1".to_string()));
    }

    #[test]
    fn test_message_response_prefixes_generic_errors() {
        let fixture = bytes(json!({
            "output": {
                "generic": [
                    {"response_type": "text", "text": "Hi"},
                    {"response_type": "text"}
                ]
            }
        }));

        let actual = MessageResponse::from_slice(&fixture).unwrap_err();

        assert!(matches!(
            actual,
            DecodeError::MissingRequiredField { ref variant, ref field }
                if variant == "text" && field == "output.generic[1].text"
        ));
    }

    #[test]
    fn test_message_response_rejects_non_array_generic() {
        let fixture = bytes(json!({"output": {"generic": {"response_type": "text"}}}));

        let actual = MessageResponse::from_slice(&fixture).unwrap_err();

        assert_eq!(actual.field(), Some("output.generic"));
    }

    #[test]
    fn test_message_response_without_generic() {
        let fixture = bytes(json!({"output": {}}));

        let actual = MessageResponse::from_slice(&fixture).unwrap();

        assert_eq!(actual.output, MessageOutput::default());
    }

    #[test]
    fn test_message_response_invalid_json() {
        let actual = MessageResponse::from_slice(b"<html>").unwrap_err();

        assert!(matches!(actual, DecodeError::Json(_)));
    }

    #[test]
    fn test_stateless_response_requires_context() {
        let fixture = bytes(json!({"output": {"generic": []}}));

        let actual = MessageResponseStateless::from_slice(&fixture).unwrap_err();

        assert!(matches!(actual, DecodeError::Json(_)));
    }

    #[test]
    fn test_stateless_response_keeps_context() {
        let fixture = bytes(json!({
            "output": {"generic": [{"response_type": "text", "text": "ok"}]},
            "context": {
                "global": {"system": {"turn_count": 2, "state": "abc"}},
                "skills": {"main skill": {"user_defined": {"name": "Ada"}}}
            }
        }));

        let actual = MessageResponseStateless::from_slice(&fixture).unwrap();
        let system = actual.context.global.and_then(|g| g.system).unwrap();
        let skills = actual.context.skills.unwrap();

        assert_eq!(system.turn_count, Some(2));
        assert_eq!(system.state.as_deref(), Some("abc"));
        assert_eq!(
            skills.get_property("main skill"),
            Some(&json!({"user_defined": {"name": "Ada"}}))
        );
        assert_eq!(actual.output.generic.map(|g| g.len()), Some(1));
    }

    #[test]
    fn test_skills_set_property() {
        let mut fixture = MessageContextSkills::default();

        fixture.set_property("actions skill", json!({"skill_variables": {}}));

        let actual = serde_json::to_value(&fixture).unwrap();
        let expected = json!({"actions skill": {"skill_variables": {}}});

        assert_eq!(actual, expected);
        assert_eq!(fixture.properties().len(), 1);
    }

    #[test]
    fn test_message_request_serializes_only_present_fields() {
        let fixture = MessageRequest::default()
            .input(MessageInput::from_text("hello"))
            .user_id("u-1");

        let actual = serde_json::to_value(&fixture).unwrap();
        let expected = json!({
            "input": {"message_type": "text", "text": "hello"},
            "user_id": "u-1"
        });

        assert_eq!(actual, expected);
    }
}
