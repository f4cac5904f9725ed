mod variants;

use std::fmt::Debug;

use derive_more::{From, TryInto};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
pub use variants::*;

use crate::{Decode, DecodeError, Fields};

/// Name of the discriminator field on every generic response item.
pub const DISCRIMINATOR: &str = "response_type";

/// The kind of a generic response item, as carried in `response_type`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseType {
    Text,
    Pause,
    Image,
    Option,
    ConnectToAgent,
    Suggestion,
    Search,
}

/// Marker implemented by every generic response item so heterogeneous items
/// can be stored and iterated together.
pub trait RuntimeResponse: Debug + Send + Sync {
    fn response_type(&self) -> ResponseType;
}

/// One item of the `output.generic` array of an assistant message response.
#[derive(Debug, Clone, PartialEq, Serialize, From, TryInto)]
#[serde(tag = "response_type", rename_all = "snake_case")]
pub enum RuntimeResponseGeneric {
    Text(RuntimeResponseGenericText),
    Pause(RuntimeResponseGenericPause),
    Image(RuntimeResponseGenericImage),
    Option(RuntimeResponseGenericOption),
    ConnectToAgent(RuntimeResponseGenericConnectToAgent),
    Suggestion(RuntimeResponseGenericSuggestion),
    Search(RuntimeResponseGenericSearch),
}

type DecodeFn = fn(&Fields<'_>) -> Result<RuntimeResponseGeneric, DecodeError>;

/// Every known discriminator value and the decoder for its variant.
static VARIANTS: [(&str, DecodeFn); 7] = [
    ("text", variant::<RuntimeResponseGenericText>),
    ("pause", variant::<RuntimeResponseGenericPause>),
    ("image", variant::<RuntimeResponseGenericImage>),
    ("option", variant::<RuntimeResponseGenericOption>),
    ("connect_to_agent", variant::<RuntimeResponseGenericConnectToAgent>),
    ("suggestion", variant::<RuntimeResponseGenericSuggestion>),
    ("search", variant::<RuntimeResponseGenericSearch>),
];

fn variant<T>(fields: &Fields<'_>) -> Result<RuntimeResponseGeneric, DecodeError>
where
    T: Decode + Into<RuntimeResponseGeneric>,
{
    T::decode(fields).map(Into::into)
}

impl RuntimeResponseGeneric {
    /// Decodes one generic response item.
    ///
    /// The discriminator is checked first, then the matching variant decodes
    /// the whole object with its own required fields.
    pub fn decode(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let tag = match object.get(DISCRIMINATOR) {
            None => {
                return Err(DecodeError::MissingDiscriminator { field: DISCRIMINATOR.to_string() });
            }
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => return Err(DecodeError::unexpected(DISCRIMINATOR, "string", other)),
        };

        let (name, decode) = VARIANTS
            .iter()
            .find(|(name, _)| *name == tag)
            .ok_or_else(|| DecodeError::UnknownVariant {
                field: DISCRIMINATOR.to_string(),
                value: tag.to_string(),
            })?;

        decode(&Fields::new(object, name))
    }

    pub fn into_boxed(self) -> Box<dyn RuntimeResponse> {
        match self {
            Self::Text(item) => Box::new(item),
            Self::Pause(item) => Box::new(item),
            Self::Image(item) => Box::new(item),
            Self::Option(item) => Box::new(item),
            Self::ConnectToAgent(item) => Box::new(item),
            Self::Suggestion(item) => Box::new(item),
            Self::Search(item) => Box::new(item),
        }
    }
}

impl RuntimeResponse for RuntimeResponseGeneric {
    fn response_type(&self) -> ResponseType {
        match self {
            Self::Text(item) => item.response_type(),
            Self::Pause(item) => item.response_type(),
            Self::Image(item) => item.response_type(),
            Self::Option(item) => item.response_type(),
            Self::ConnectToAgent(item) => item.response_type(),
            Self::Suggestion(item) => item.response_type(),
            Self::Search(item) => item.response_type(),
        }
    }
}

impl<'de> Deserialize<'de> for RuntimeResponseGeneric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Self::decode(&object).map_err(de::Error::custom)
    }
}

/// Decodes an array of generic response items in order.
///
/// Decoding stops at the first malformed element; its error is reported
/// under the element's index.
pub fn decode_generic_list(items: &[Value]) -> Result<Vec<RuntimeResponseGeneric>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_object()
                .ok_or_else(|| DecodeError::unexpected("", "object", item))
                .and_then(RuntimeResponseGeneric::decode)
                .map_err(|error| error.at(&format!("[{index}]")))
        })
        .collect()
}
