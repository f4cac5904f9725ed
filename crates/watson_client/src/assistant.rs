use derive_setters::Setters;
use watson_domain::{
    MessageContext, MessageInput, MessageRequest, MessageResponse, MessageResponseStateless,
    SessionResponse,
};
use watson_env::ServiceConfig;

use crate::request::required;
use crate::{BaseService, DetailedResponse, Error, Result, ServiceRequest};

pub const ASSISTANT_SERVICE_NAME: &str = "assistant";
pub const ASSISTANT_DEFAULT_URL: &str = "https://api.us-south.assistant.watson.cloud.ibm.com";

/// Watson Assistant v2: sessions and messages.
#[derive(Debug, Clone)]
pub struct AssistantV2 {
    service: BaseService,
    version: String,
}

impl AssistantV2 {
    /// `version` is the API version date, e.g. `2020-04-01`.
    pub fn new(service: BaseService, version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        required("version", &version)?;
        Ok(Self { service, version })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let version = config.version.clone().ok_or_else(|| Error::missing("version"))?;
        Self::new(BaseService::from_config(config, ASSISTANT_DEFAULT_URL)?, version)
    }

    pub fn service(&self) -> &BaseService {
        &self.service
    }

    pub async fn create_session(
        &self,
        options: &CreateSessionOptions,
    ) -> Result<DetailedResponse<SessionResponse>> {
        let request = ServiceRequest::post()
            .path(["v2", "assistants"])
            .param("assistant_id", &options.assistant_id)?
            .path(["sessions"])
            .query("version", &self.version);

        self.service.execute_json(request).await
    }

    pub async fn delete_session(
        &self,
        options: &DeleteSessionOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ServiceRequest::delete()
            .path(["v2", "assistants"])
            .param("assistant_id", &options.assistant_id)?
            .path(["sessions"])
            .param("session_id", &options.session_id)?
            .query("version", &self.version);

        self.service.execute_empty(request).await
    }

    /// Sends user input to a session. `output.generic` of the response is
    /// decoded item by item and any malformed item fails the whole call.
    pub async fn message(
        &self,
        options: &MessageOptions,
    ) -> Result<DetailedResponse<MessageResponse>> {
        let body = MessageRequest {
            input: options.input.clone(),
            context: options.context.clone(),
            user_id: options.user_id.clone(),
        };
        let request = ServiceRequest::post()
            .path(["v2", "assistants"])
            .param("assistant_id", &options.assistant_id)?
            .path(["sessions"])
            .param("session_id", &options.session_id)?
            .path(["message"])
            .query("version", &self.version)
            .json(&body)?;

        self.service.execute_with(request, MessageResponse::from_slice).await
    }

    /// Sends user input without a session. The caller keeps the returned
    /// context and passes it back on the next turn.
    pub async fn message_stateless(
        &self,
        options: &MessageStatelessOptions,
    ) -> Result<DetailedResponse<MessageResponseStateless>> {
        let body = MessageRequest {
            input: options.input.clone(),
            context: options.context.clone(),
            user_id: options.user_id.clone(),
        };
        let request = ServiceRequest::post()
            .path(["v2", "assistants"])
            .param("assistant_id", &options.assistant_id)?
            .path(["message"])
            .query("version", &self.version)
            .json(&body)?;

        self.service.execute_with(request, MessageResponseStateless::from_slice).await
    }

    /// Deletes all data associated with a customer id.
    pub async fn delete_user_data(
        &self,
        options: &DeleteUserDataOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ServiceRequest::delete()
            .path(["v2", "user_data"])
            .query("customer_id", required("customer_id", &options.customer_id)?)
            .query("version", &self.version);

        self.service.execute_empty(request).await
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct CreateSessionOptions {
    pub assistant_id: String,
}

impl CreateSessionOptions {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self { assistant_id: assistant_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct DeleteSessionOptions {
    pub assistant_id: String,
    pub session_id: String,
}

impl DeleteSessionOptions {
    pub fn new(assistant_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self { assistant_id: assistant_id.into(), session_id: session_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct MessageOptions {
    pub assistant_id: String,
    pub session_id: String,
    pub input: Option<MessageInput>,
    pub context: Option<MessageContext>,
    pub user_id: Option<String>,
}

impl MessageOptions {
    pub fn new(assistant_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            session_id: session_id.into(),
            input: None,
            context: None,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct MessageStatelessOptions {
    pub assistant_id: String,
    pub input: Option<MessageInput>,
    pub context: Option<MessageContext>,
    pub user_id: Option<String>,
}

impl MessageStatelessOptions {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self { assistant_id: assistant_id.into(), input: None, context: None, user_id: None }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct DeleteUserDataOptions {
    pub customer_id: String,
}

impl DeleteUserDataOptions {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self { customer_id: customer_id.into() }
    }
}
