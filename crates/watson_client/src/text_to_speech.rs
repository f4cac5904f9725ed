use bytes::Bytes;
use derive_setters::Setters;
use reqwest::header::{ACCEPT, HeaderValue};
use watson_domain::{
    AudioFormat, CreateCustomModel, CustomModel, CustomModels, Pronunciation, PronunciationFormat,
    SynthesisText, Translation, Voice, Voices, Words,
};
use watson_env::ServiceConfig;

use crate::request::required;
use crate::{BaseService, DetailedResponse, Result, ServiceRequest};

pub const TEXT_TO_SPEECH_SERVICE_NAME: &str = "text_to_speech";
pub const TEXT_TO_SPEECH_DEFAULT_URL: &str =
    "https://api.us-south.text-to-speech.watson.cloud.ibm.com";

/// Watson Text to Speech v1.
#[derive(Debug, Clone)]
pub struct TextToSpeechV1 {
    service: BaseService,
}

impl TextToSpeechV1 {
    pub fn new(service: BaseService) -> Self {
        Self { service }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(BaseService::from_config(config, TEXT_TO_SPEECH_DEFAULT_URL)?))
    }

    pub async fn list_voices(&self) -> Result<DetailedResponse<Voices>> {
        self.service.execute_json(ServiceRequest::get().path(["v1", "voices"])).await
    }

    pub async fn get_voice(&self, options: &GetVoiceOptions) -> Result<DetailedResponse<Voice>> {
        let request = ServiceRequest::get()
            .path(["v1", "voices"])
            .param("voice", &options.voice)?
            .query_opt("customization_id", options.customization_id.as_deref());

        self.service.execute_json(request).await
    }

    /// Synthesizes `text` and returns the audio in the requested format.
    pub async fn synthesize(&self, options: &SynthesizeOptions) -> Result<DetailedResponse<Bytes>> {
        let accept = options.accept.unwrap_or_default();
        let body = SynthesisText { text: required("text", &options.text)?.to_string() };
        let request = ServiceRequest::post()
            .path(["v1", "synthesize"])
            .query_opt("voice", options.voice.as_deref())
            .query_opt("customization_id", options.customization_id.as_deref())
            .header(ACCEPT, HeaderValue::from_static(accept.into()))
            .json(&body)?;

        self.service.execute(request).await
    }

    pub async fn get_pronunciation(
        &self,
        options: &GetPronunciationOptions,
    ) -> Result<DetailedResponse<Pronunciation>> {
        let request = ServiceRequest::get()
            .path(["v1", "pronunciation"])
            .query("text", required("text", &options.text)?)
            .query_opt("voice", options.voice.as_deref())
            .query_opt("format", options.format)
            .query_opt("customization_id", options.customization_id.as_deref());

        self.service.execute_json(request).await
    }

    pub async fn create_custom_model(
        &self,
        options: &CreateCustomModel,
    ) -> Result<DetailedResponse<CustomModel>> {
        required("name", &options.name)?;
        let request = ServiceRequest::post().path(["v1", "customizations"]).json(options)?;

        self.service.execute_json(request).await
    }

    pub async fn list_custom_models(
        &self,
        options: &ListCustomModelsOptions,
    ) -> Result<DetailedResponse<CustomModels>> {
        let request = ServiceRequest::get()
            .path(["v1", "customizations"])
            .query_opt("language", options.language.as_deref());

        self.service.execute_json(request).await
    }

    pub async fn get_custom_model(
        &self,
        options: &CustomModelOptions,
    ) -> Result<DetailedResponse<CustomModel>> {
        let request = ServiceRequest::get()
            .path(["v1", "customizations"])
            .param("customization_id", &options.customization_id)?;

        self.service.execute_json(request).await
    }

    pub async fn delete_custom_model(
        &self,
        options: &CustomModelOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ServiceRequest::delete()
            .path(["v1", "customizations"])
            .param("customization_id", &options.customization_id)?;

        self.service.execute_empty(request).await
    }

    pub async fn list_words(
        &self,
        options: &CustomModelOptions,
    ) -> Result<DetailedResponse<Words>> {
        let request = ServiceRequest::get()
            .path(["v1", "customizations"])
            .param("customization_id", &options.customization_id)?
            .path(["words"]);

        self.service.execute_json(request).await
    }

    pub async fn get_word(
        &self,
        options: &GetWordOptions,
    ) -> Result<DetailedResponse<Translation>> {
        let request = ServiceRequest::get()
            .path(["v1", "customizations"])
            .param("customization_id", &options.customization_id)?
            .path(["words"])
            .param("word", &options.word)?;

        self.service.execute_json(request).await
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct GetVoiceOptions {
    pub voice: String,
    pub customization_id: Option<String>,
}

impl GetVoiceOptions {
    pub fn new(voice: impl Into<String>) -> Self {
        Self { voice: voice.into(), customization_id: None }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct SynthesizeOptions {
    pub text: String,
    /// Defaults to `audio/ogg;codecs=opus`.
    pub accept: Option<AudioFormat>,
    pub voice: Option<String>,
    pub customization_id: Option<String>,
}

impl SynthesizeOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), accept: None, voice: None, customization_id: None }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct GetPronunciationOptions {
    pub text: String,
    pub voice: Option<String>,
    pub format: Option<PronunciationFormat>,
    pub customization_id: Option<String>,
}

impl GetPronunciationOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), voice: None, format: None, customization_id: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct ListCustomModelsOptions {
    pub language: Option<String>,
}

/// Identifies a custom model for the get, delete and list-words calls.
#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct CustomModelOptions {
    pub customization_id: String,
}

impl CustomModelOptions {
    pub fn new(customization_id: impl Into<String>) -> Self {
        Self { customization_id: customization_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct GetWordOptions {
    pub customization_id: String,
    pub word: String,
}

impl GetWordOptions {
    pub fn new(customization_id: impl Into<String>, word: impl Into<String>) -> Self {
        Self { customization_id: customization_id.into(), word: word.into() }
    }
}
