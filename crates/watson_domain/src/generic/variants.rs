use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display};

use super::{ResponseType, RuntimeResponse};
use crate::{Decode, DecodeError, Fields, MessageInput};

/// A channel for which a response is intended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseGenericChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl Decode for ResponseGenericChannel {
    const NAME: &'static str = "ResponseGenericChannel";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { channel: fields.optional("channel")? })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeResponseGenericText {
    /// The text of the response.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ResponseGenericChannel>>,
}

impl Decode for RuntimeResponseGenericText {
    const NAME: &'static str = "text";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { text: fields.required("text")?, channels: fields.optional_list("channels")? })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeResponseGenericPause {
    /// How long to pause, in milliseconds.
    pub time: i64,
    /// Whether to send a "user is typing" event during the pause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ResponseGenericChannel>>,
}

impl Decode for RuntimeResponseGenericPause {
    const NAME: &'static str = "pause";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            time: fields.required("time")?,
            typing: fields.optional("typing")?,
            channels: fields.optional_list("channels")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeResponseGenericImage {
    /// The URL of the image.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Descriptive text that can be used for screen readers or other
    /// situations where the image cannot be seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ResponseGenericChannel>>,
}

impl Decode for RuntimeResponseGenericImage {
    const NAME: &'static str = "image";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            source: fields.required("source")?,
            title: fields.optional("title")?,
            description: fields.optional("description")?,
            alt_text: fields.optional("alt_text")?,
            channels: fields.optional_list("channels")?,
        })
    }
}

/// How an option response should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OptionPreference {
    Button,
    Dropdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeResponseGenericOption {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<OptionPreference>,
    /// The options the user can pick from.
    pub options: Vec<DialogNodeOutputOptionsElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ResponseGenericChannel>>,
}

impl Decode for RuntimeResponseGenericOption {
    const NAME: &'static str = "option";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            title: fields.required("title")?,
            description: fields.optional("description")?,
            preference: fields.optional("preference")?,
            options: fields.required_list("options")?,
            channels: fields.optional_list("channels")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogNodeOutputOptionsElement {
    /// The user-facing label for the option.
    pub label: String,
    pub value: DialogNodeOutputOptionsElementValue,
}

impl Decode for DialogNodeOutputOptionsElement {
    const NAME: &'static str = "DialogNodeOutputOptionsElement";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { label: fields.required("label")?, value: fields.required_nested("value")? })
    }
}

/// The message input sent to the assistant when the option is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DialogNodeOutputOptionsElementValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<MessageInput>,
}

impl Decode for DialogNodeOutputOptionsElementValue {
    const NAME: &'static str = "DialogNodeOutputOptionsElementValue";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { input: fields.optional_nested("input")? })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuntimeResponseGenericConnectToAgent {
    /// A message to be sent to the human agent who will be taking over the
    /// conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_to_human_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_available: Option<AgentAvailabilityMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_unavailable: Option<AgentAvailabilityMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_info: Option<DialogNodeOutputConnectToAgentTransferInfo>,
    /// A label identifying the topic of the conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ResponseGenericChannel>>,
}

impl Decode for RuntimeResponseGenericConnectToAgent {
    const NAME: &'static str = "connect_to_agent";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            message_to_human_agent: fields.optional("message_to_human_agent")?,
            agent_available: fields.optional_nested("agent_available")?,
            agent_unavailable: fields.optional_nested("agent_unavailable")?,
            transfer_info: fields.optional_nested("transfer_info")?,
            topic: fields.optional("topic")?,
            channels: fields.optional_list("channels")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAvailabilityMessage {
    /// The text of the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Decode for AgentAvailabilityMessage {
    const NAME: &'static str = "AgentAvailabilityMessage";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { message: fields.optional("message")? })
    }
}

/// Routing or other contextual information to be used by target service
/// desk systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogNodeOutputConnectToAgentTransferInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<HashMap<String, Map<String, Value>>>,
}

impl Decode for DialogNodeOutputConnectToAgentTransferInfo {
    const NAME: &'static str = "DialogNodeOutputConnectToAgentTransferInfo";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { target: fields.optional("target")? })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeResponseGenericSuggestion {
    pub title: String,
    /// An array of objects describing the possible matching dialog nodes from
    /// which the user can choose.
    pub suggestions: Vec<DialogSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ResponseGenericChannel>>,
}

impl Decode for RuntimeResponseGenericSuggestion {
    const NAME: &'static str = "suggestion";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            title: fields.required("title")?,
            suggestions: fields.required_list("suggestions")?,
            channels: fields.optional_list("channels")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogSuggestion {
    /// The user-facing label for the suggestion.
    pub label: String,
    pub value: DialogSuggestionValue,
    /// The dialog output that will be returned if this suggestion is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Map<String, Value>>,
}

impl Decode for DialogSuggestion {
    const NAME: &'static str = "DialogSuggestion";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            label: fields.required("label")?,
            value: fields.required_nested("value")?,
            output: fields.optional("output")?,
        })
    }
}

/// The message input sent to the assistant when the suggestion is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DialogSuggestionValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<MessageInput>,
}

impl Decode for DialogSuggestionValue {
    const NAME: &'static str = "DialogSuggestionValue";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { input: fields.optional_nested("input")? })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeResponseGenericSearch {
    /// The title or introductory text to show before the response.
    pub header: String,
    /// The results of the search, ranked by relevance.
    pub primary_results: Vec<SearchResult>,
    /// Additional results that did not make the primary cut.
    pub additional_results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ResponseGenericChannel>>,
}

impl Decode for RuntimeResponseGenericSearch {
    const NAME: &'static str = "search";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            header: fields.required("header")?,
            primary_results: fields.required_list("primary_results")?,
            additional_results: fields.required_list("additional_results")?,
            channels: fields.optional_list("channels")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// The unique identifier of the document in the Discovery service
    /// collection.
    pub id: String,
    pub result_metadata: SearchResultMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<SearchResultHighlight>,
}

impl Decode for SearchResult {
    const NAME: &'static str = "SearchResult";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.required("id")?,
            result_metadata: fields.required_nested("result_metadata")?,
            body: fields.optional("body")?,
            title: fields.optional("title")?,
            url: fields.optional("url")?,
            highlight: fields.optional_nested("highlight")?,
        })
    }
}

/// Search result rank data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResultMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Decode for SearchResultMetadata {
    const NAME: &'static str = "SearchResultMetadata";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self { confidence: fields.optional("confidence")?, score: fields.optional("score")? })
    }
}

/// Highlighted passages of a search result, keyed by document field.
///
/// `body`, `title` and `url` are typed; highlights on any other field are kept
/// as additional properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResultHighlight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Vec<String>>,
    #[serde(flatten)]
    additional: Map<String, Value>,
}

impl SearchResultHighlight {
    const KNOWN: [&'static str; 3] = ["body", "title", "url"];

    /// Highlighted passages for `key`, whether it is a named field or an
    /// additional property.
    pub fn get_property(&self, key: &str) -> Option<Vec<String>> {
        match key {
            "body" => self.body.clone(),
            "title" => self.title.clone(),
            "url" => self.url.clone(),
            _ => self
                .additional
                .get(key)
                .and_then(|value| Vec::<String>::deserialize(value).ok()),
        }
    }

    /// Sets an arbitrary highlight property. Named properties are stored in
    /// their own field.
    pub fn set_property(&mut self, key: impl Into<String>, passages: Vec<String>) {
        let key = key.into();
        match key.as_str() {
            "body" => self.body = Some(passages),
            "title" => self.title = Some(passages),
            "url" => self.url = Some(passages),
            _ => {
                self.additional.insert(key, Value::from(passages));
            }
        }
    }

    /// Additional properties that are not modelled as named fields.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.additional
    }
}

impl Decode for SearchResultHighlight {
    const NAME: &'static str = "SearchResultHighlight";

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        let additional = fields.remaining(&Self::KNOWN);
        for key in additional.keys() {
            fields.required::<Vec<String>>(key)?;
        }

        Ok(Self {
            body: fields.optional("body")?,
            title: fields.optional("title")?,
            url: fields.optional("url")?,
            additional,
        })
    }
}

macro_rules! runtime_response {
    ($($name:ident => $response_type:ident),+ $(,)?) => {
        $(
            impl RuntimeResponse for $name {
                fn response_type(&self) -> ResponseType {
                    ResponseType::$response_type
                }
            }
        )+
    };
}

runtime_response! {
    RuntimeResponseGenericText => Text,
    RuntimeResponseGenericPause => Pause,
    RuntimeResponseGenericImage => Image,
    RuntimeResponseGenericOption => Option,
    RuntimeResponseGenericConnectToAgent => ConnectToAgent,
    RuntimeResponseGenericSuggestion => Suggestion,
    RuntimeResponseGenericSearch => Search,
}
