use bytes::Bytes;
use derive_setters::Setters;
use watson_domain::{
    Classification, ClassificationCollection, Classifier, ClassifierList, ClassifyCollectionInput,
    ClassifyInput,
};
use watson_env::ServiceConfig;

use crate::request::required;
use crate::{BaseService, DetailedResponse, Error, FormPart, Result, ServiceRequest};

pub const NATURAL_LANGUAGE_CLASSIFIER_SERVICE_NAME: &str = "natural_language_classifier";
pub const NATURAL_LANGUAGE_CLASSIFIER_DEFAULT_URL: &str =
    "https://api.us-south.natural-language-classifier.watson.cloud.ibm.com";

/// Watson Natural Language Classifier v1.
#[derive(Debug, Clone)]
pub struct NaturalLanguageClassifierV1 {
    service: BaseService,
}

impl NaturalLanguageClassifierV1 {
    pub fn new(service: BaseService) -> Self {
        Self { service }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(BaseService::from_config(config, NATURAL_LANGUAGE_CLASSIFIER_DEFAULT_URL)?))
    }

    pub async fn classify(
        &self,
        options: &ClassifyOptions,
    ) -> Result<DetailedResponse<Classification>> {
        let body = ClassifyInput::new(required("text", &options.text)?);
        let request = ServiceRequest::post()
            .path(["v1", "classifiers"])
            .param("classifier_id", &options.classifier_id)?
            .path(["classify"])
            .json(&body)?;

        self.service.execute_json(request).await
    }

    pub async fn classify_collection(
        &self,
        options: &ClassifyCollectionOptions,
    ) -> Result<DetailedResponse<ClassificationCollection>> {
        if options.collection.is_empty() {
            return Err(Error::missing("collection"));
        }
        let body = ClassifyCollectionInput { collection: options.collection.clone() };
        let request = ServiceRequest::post()
            .path(["v1", "classifiers"])
            .param("classifier_id", &options.classifier_id)?
            .path(["classify_collection"])
            .json(&body)?;

        self.service.execute_json(request).await
    }

    /// Uploads training metadata (JSON) and training data (CSV) to create a
    /// new classifier.
    pub async fn create_classifier(
        &self,
        options: &CreateClassifierOptions,
    ) -> Result<DetailedResponse<Classifier>> {
        if options.training_metadata.is_empty() {
            return Err(Error::missing("training_metadata"));
        }
        if options.training_data.is_empty() {
            return Err(Error::missing("training_data"));
        }
        let parts = vec![
            FormPart::file(
                "training_metadata",
                "training_metadata.json",
                options.training_metadata.clone(),
                Some("application/json".to_string()),
            ),
            FormPart::file(
                "training_data",
                "training_data.csv",
                options.training_data.clone(),
                Some("text/csv".to_string()),
            ),
        ];
        let request = ServiceRequest::post().path(["v1", "classifiers"]).multipart(parts);

        self.service.execute_json(request).await
    }

    pub async fn list_classifiers(&self) -> Result<DetailedResponse<ClassifierList>> {
        self.service.execute_json(ServiceRequest::get().path(["v1", "classifiers"])).await
    }

    pub async fn get_classifier(
        &self,
        options: &ClassifierOptions,
    ) -> Result<DetailedResponse<Classifier>> {
        let request = ServiceRequest::get()
            .path(["v1", "classifiers"])
            .param("classifier_id", &options.classifier_id)?;

        self.service.execute_json(request).await
    }

    pub async fn delete_classifier(
        &self,
        options: &ClassifierOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ServiceRequest::delete()
            .path(["v1", "classifiers"])
            .param("classifier_id", &options.classifier_id)?;

        self.service.execute_empty(request).await
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct ClassifyOptions {
    pub classifier_id: String,
    pub text: String,
}

impl ClassifyOptions {
    pub fn new(classifier_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { classifier_id: classifier_id.into(), text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct ClassifyCollectionOptions {
    pub classifier_id: String,
    pub collection: Vec<ClassifyInput>,
}

impl ClassifyCollectionOptions {
    pub fn new(classifier_id: impl Into<String>, collection: Vec<ClassifyInput>) -> Self {
        Self { classifier_id: classifier_id.into(), collection }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct CreateClassifierOptions {
    /// JSON with the `language` and optional `name` of the classifier.
    pub training_metadata: Bytes,
    /// CSV of `text,class` rows.
    pub training_data: Bytes,
}

impl CreateClassifierOptions {
    pub fn new(training_metadata: impl Into<Bytes>, training_data: impl Into<Bytes>) -> Self {
        Self { training_metadata: training_metadata.into(), training_data: training_data.into() }
    }
}

/// Identifies a classifier for the get and delete calls.
#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct ClassifierOptions {
    pub classifier_id: String,
}

impl ClassifierOptions {
    pub fn new(classifier_id: impl Into<String>) -> Self {
        Self { classifier_id: classifier_id.into() }
    }
}
