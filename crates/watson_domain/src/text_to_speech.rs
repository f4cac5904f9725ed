use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Audio formats the synthesizer can produce, sent as the `Accept` header.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
pub enum AudioFormat {
    #[default]
    #[serde(rename = "audio/ogg;codecs=opus")]
    #[strum(serialize = "audio/ogg;codecs=opus")]
    OggOpus,
    #[serde(rename = "audio/wav")]
    #[strum(serialize = "audio/wav")]
    Wav,
    #[serde(rename = "audio/mp3")]
    #[strum(serialize = "audio/mp3")]
    Mp3,
    #[serde(rename = "audio/flac")]
    #[strum(serialize = "audio/flac")]
    Flac,
    #[serde(rename = "audio/l16")]
    #[strum(serialize = "audio/l16")]
    L16,
    #[serde(rename = "audio/mulaw")]
    #[strum(serialize = "audio/mulaw")]
    Mulaw,
    #[serde(rename = "audio/basic")]
    #[strum(serialize = "audio/basic")]
    Basic,
    #[serde(rename = "audio/webm")]
    #[strum(serialize = "audio/webm")]
    Webm,
}

impl AudioFormat {
    /// File extension commonly used for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::OggOpus => "ogg",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::L16 => "l16",
            Self::Mulaw => "mulaw",
            Self::Basic => "au",
            Self::Webm => "webm",
        }
    }
}

/// Phoneme set used for pronunciations.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PronunciationFormat {
    #[default]
    Ipa,
    Ibm,
}

/// Information about an available voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// The URI of the voice.
    pub url: String,
    /// The gender of the voice: `male` or `female`.
    pub gender: String,
    /// The name of the voice, e.g. `en-US_AllisonV3Voice`.
    pub name: String,
    /// The language and region of the voice, e.g. `en-US`.
    pub language: String,
    pub description: String,
    /// Whether the voice can be customized with a custom model.
    pub customizable: bool,
    pub supported_features: SupportedFeatures,
    /// The custom model, when the voice is requested with a customization id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<CustomModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voices {
    pub voices: Vec<Voice>,
}

/// Additional service features supported by a voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFeatures {
    pub custom_pronunciation: bool,
    pub voice_transformation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    /// The pronunciation of the word in the requested format.
    pub pronunciation: String,
}

/// A custom model and, when fetched individually, its words and prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomModel {
    pub customization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// The GUID of the service credentials that own the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomModels {
    pub customizations: Vec<CustomModel>,
}

/// A word and its translation in a custom model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    /// Phonetic or sounds-like translation of the word.
    pub translation: String,
    /// Japanese only: the part of speech of the word.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Words {
    pub words: Vec<Word>,
}

/// The translation of a single word in a custom model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

/// Request body for creating a custom model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(strip_option, into)]
pub struct CreateCustomModel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateCustomModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), language: None, description: None }
    }
}

/// Request body for synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisText {
    pub text: String,
}
