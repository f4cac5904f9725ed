use bytes::Bytes;
use derive_setters::Setters;
use watson_domain::{
    AnalyzeFeature, AnalyzeResponse, Collection, CollectionsList, CreateCollection,
    ImageSummaryList, UpdateCollection,
};
use watson_env::ServiceConfig;

use crate::request::required;
use crate::{BaseService, DetailedResponse, Error, FormPart, Result, ServiceRequest};

pub const VISUAL_RECOGNITION_SERVICE_NAME: &str = "visual_recognition";
pub const VISUAL_RECOGNITION_DEFAULT_URL: &str =
    "https://api.us-south.visual-recognition.watson.cloud.ibm.com";

/// Watson Visual Recognition v4: object detection and collections.
#[derive(Debug, Clone)]
pub struct VisualRecognitionV4 {
    service: BaseService,
    version: String,
}

impl VisualRecognitionV4 {
    /// `version` is the API version date, e.g. `2019-02-11`.
    pub fn new(service: BaseService, version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        required("version", &version)?;
        Ok(Self { service, version })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let version = config.version.clone().ok_or_else(|| Error::missing("version"))?;
        Self::new(BaseService::from_config(config, VISUAL_RECOGNITION_DEFAULT_URL)?, version)
    }

    /// Detects objects in uploaded images and image URLs with the models of
    /// the given collections.
    pub async fn analyze(
        &self,
        options: &AnalyzeOptions,
    ) -> Result<DetailedResponse<AnalyzeResponse>> {
        let request = ServiceRequest::post()
            .path(["v4", "analyze"])
            .query("version", &self.version)
            .multipart(options.form()?);

        self.service.execute_json(request).await
    }

    pub async fn create_collection(
        &self,
        options: &CreateCollection,
    ) -> Result<DetailedResponse<Collection>> {
        let request = ServiceRequest::post()
            .path(["v4", "collections"])
            .query("version", &self.version)
            .json(options)?;

        self.service.execute_json(request).await
    }

    pub async fn list_collections(&self) -> Result<DetailedResponse<CollectionsList>> {
        let request = ServiceRequest::get()
            .path(["v4", "collections"])
            .query("version", &self.version);

        self.service.execute_json(request).await
    }

    pub async fn get_collection(
        &self,
        options: &CollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        let request = self.collection(ServiceRequest::get(), &options.collection_id)?;

        self.service.execute_json(request).await
    }

    /// Renames or re-describes a collection. Omitted fields are unchanged.
    pub async fn update_collection(
        &self,
        options: &UpdateCollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        let request = self
            .collection(ServiceRequest::post(), &options.collection_id)?
            .json(&options.update)?;

        self.service.execute_json(request).await
    }

    pub async fn delete_collection(
        &self,
        options: &CollectionOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = self.collection(ServiceRequest::delete(), &options.collection_id)?;

        self.service.execute_empty(request).await
    }

    pub async fn list_images(
        &self,
        options: &CollectionOptions,
    ) -> Result<DetailedResponse<ImageSummaryList>> {
        let request = self
            .collection(ServiceRequest::get(), &options.collection_id)?
            .path(["images"]);

        self.service.execute_json(request).await
    }

    pub async fn delete_image(&self, options: &DeleteImageOptions) -> Result<DetailedResponse<()>> {
        let request = self
            .collection(ServiceRequest::delete(), &options.collection_id)?
            .path(["images"])
            .param("image_id", &options.image_id)?;

        self.service.execute_empty(request).await
    }

    /// Starts training the object detection model of a collection.
    pub async fn train(&self, options: &CollectionOptions) -> Result<DetailedResponse<Collection>> {
        let request = self
            .collection(ServiceRequest::post(), &options.collection_id)?
            .path(["train"]);

        self.service.execute_json(request).await
    }

    fn collection(&self, request: ServiceRequest, collection_id: &str) -> Result<ServiceRequest> {
        Ok(request
            .path(["v4", "collections"])
            .param("collection_id", collection_id)?
            .query("version", &self.version))
    }
}

/// An image uploaded as part of an `analyze` request.
#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct ImageFile {
    pub filename: String,
    pub data: Bytes,
    /// Detected by the service when absent.
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self { filename: filename.into(), data: data.into(), content_type: None }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct AnalyzeOptions {
    pub collection_ids: Vec<String>,
    pub features: Vec<AnalyzeFeature>,
    pub images_file: Vec<ImageFile>,
    pub image_url: Vec<String>,
    /// Minimum score a detected object must reach, between 0.15 and 1.
    pub threshold: Option<f32>,
}

impl AnalyzeOptions {
    pub fn new(collection_ids: Vec<String>, features: Vec<AnalyzeFeature>) -> Self {
        Self {
            collection_ids,
            features,
            images_file: Vec::new(),
            image_url: Vec::new(),
            threshold: None,
        }
    }

    fn form(&self) -> Result<Vec<FormPart>> {
        if self.collection_ids.is_empty() {
            return Err(Error::missing("collection_ids"));
        }
        if self.features.is_empty() {
            return Err(Error::missing("features"));
        }
        if self.images_file.is_empty() && self.image_url.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one of `images_file` or `image_url` must be given".to_string(),
            ));
        }

        let features = self.features.iter().map(|feature| feature.as_ref()).collect::<Vec<&str>>();
        let mut parts = vec![
            FormPart::text("collection_ids", self.collection_ids.join(",")),
            FormPart::text("features", features.join(",")),
        ];
        parts.extend(self.images_file.iter().map(|image| {
            FormPart::file(
                "images_file",
                image.filename.clone(),
                image.data.clone(),
                image.content_type.clone(),
            )
        }));
        parts.extend(self.image_url.iter().map(|url| FormPart::text("image_url", url.clone())));
        if let Some(threshold) = self.threshold {
            parts.push(FormPart::text("threshold", threshold.to_string()));
        }
        Ok(parts)
    }
}

/// Identifies a collection for the get, delete, list-images and train calls.
#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct CollectionOptions {
    pub collection_id: String,
}

impl CollectionOptions {
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self { collection_id: collection_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct UpdateCollectionOptions {
    pub collection_id: String,
    pub update: UpdateCollection,
}

impl UpdateCollectionOptions {
    pub fn new(collection_id: impl Into<String>, update: UpdateCollection) -> Self {
        Self { collection_id: collection_id.into(), update }
    }
}

#[derive(Debug, Clone, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct DeleteImageOptions {
    pub collection_id: String,
    pub image_id: String,
}

impl DeleteImageOptions {
    pub fn new(collection_id: impl Into<String>, image_id: impl Into<String>) -> Self {
        Self { collection_id: collection_id.into(), image_id: image_id.into() }
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::base::tests::service;

    const VERSION: &str = "2019-02-11";

    fn version() -> Matcher {
        Matcher::UrlEncoded("version".to_string(), VERSION.to_string())
    }

    fn visual_recognition(url: &str) -> VisualRecognitionV4 {
        VisualRecognitionV4::new(service(url), VERSION).unwrap()
    }

    fn collection_body(id: &str) -> String {
        json!({
            "collection_id": id,
            "name": "dogs",
            "description": "",
            "created": "2020-01-01T00:00:00Z",
            "updated": "2020-01-01T00:00:00Z",
            "image_count": 3,
            "training_status": {"objects": {
                "ready": false,
                "in_progress": true,
                "data_changed": false,
                "latest_failed": false,
                "description": "training"
            }}
        })
        .to_string()
    }

    #[test]
    fn test_analyze_form_parts() {
        let fixture = AnalyzeOptions::new(
            vec!["c-1".to_string(), "c-2".to_string()],
            vec![AnalyzeFeature::Objects],
        )
        .images_file(vec![ImageFile::new("dog.jpg", "jpeg").content_type("image/jpeg")])
        .image_url(vec!["https://x/cat.png".to_string()])
        .threshold(0.5_f32);

        let actual = fixture.form().unwrap();
        let expected = vec![
            FormPart::text("collection_ids", "c-1,c-2"),
            FormPart::text("features", "objects"),
            FormPart::file("images_file", "dog.jpg", "jpeg", Some("image/jpeg".to_string())),
            FormPart::text("image_url", "https://x/cat.png"),
            FormPart::text("threshold", "0.5"),
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_analyze_requires_an_image() {
        let fixture = AnalyzeOptions::new(vec!["c-1".to_string()], vec![AnalyzeFeature::Objects]);

        let actual = fixture.form().unwrap_err();

        assert!(matches!(
            actual,
            Error::InvalidArgument(ref message) if message.contains("image_url")
        ));
    }

    #[test]
    fn test_analyze_requires_collection_ids() {
        let fixture = AnalyzeOptions::new(Vec::new(), vec![AnalyzeFeature::Objects])
            .image_url(vec!["https://x/cat.png".to_string()]);

        let actual = fixture.form().unwrap_err();

        assert!(matches!(
            actual,
            Error::InvalidArgument(ref message) if message.contains("collection_ids")
        ));
    }

    #[tokio::test]
    async fn test_analyze() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v4/analyze")
            .match_query(version())
            .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="collection_ids""#.to_string()),
                Matcher::Regex(r#"name="image_url""#.to_string()),
            ]))
            .with_status(200)
            .with_body(
                json!({"images": [{
                    "source": {"type": "url", "source_url": "https://x/cat.png"},
                    "dimensions": {"height": 10, "width": 10},
                    "objects": {}
                }]})
                .to_string(),
            )
            .create_async()
            .await;
        let fixture = visual_recognition(&server.url());
        let options = AnalyzeOptions::new(vec!["c-1".to_string()], vec![AnalyzeFeature::Objects])
            .image_url(vec!["https://x/cat.png".to_string()]);

        let actual = fixture.analyze(&options).await.unwrap();

        mock.assert_async().await;
        assert_eq!(actual.result.images[0].source.source_url.as_deref(), Some("https://x/cat.png"));
    }

    #[tokio::test]
    async fn test_update_collection_posts_changes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v4/collections/c-1")
            .match_query(version())
            .match_body(Matcher::Json(json!({"name": "dogs"})))
            .with_status(200)
            .with_body(collection_body("c-1"))
            .create_async()
            .await;
        let fixture = visual_recognition(&server.url());
        let options = UpdateCollectionOptions::new("c-1", UpdateCollection::default().name("dogs"));

        let actual = fixture.update_collection(&options).await.unwrap();

        mock.assert_async().await;
        assert_eq!(actual.result.name, "dogs");
        assert!(actual.result.training_status.objects.in_progress);
    }

    #[tokio::test]
    async fn test_train() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v4/collections/c-1/train")
            .match_query(version())
            .with_status(202)
            .with_body(collection_body("c-1"))
            .create_async()
            .await;
        let fixture = visual_recognition(&server.url());

        let actual = fixture.train(&CollectionOptions::new("c-1")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(actual.result.collection_id, "c-1");
    }

    #[tokio::test]
    async fn test_list_images_and_delete_image() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/v4/collections/c-1/images")
            .match_query(version())
            .with_status(200)
            .with_body(r#"{"images":[{"image_id":"img-1","updated":"2020-01-01T00:00:00Z"}]}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/v4/collections/c-1/images/img-1")
            .match_query(version())
            .with_status(200)
            .create_async()
            .await;
        let fixture = visual_recognition(&server.url());

        let actual = fixture.list_images(&CollectionOptions::new("c-1")).await.unwrap();
        fixture.delete_image(&DeleteImageOptions::new("c-1", "img-1")).await.unwrap();

        list.assert_async().await;
        delete.assert_async().await;
        assert_eq!(actual.result.images[0].image_id.as_deref(), Some("img-1"));
    }

    #[tokio::test]
    async fn test_service_error_carries_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v4/collections/missing")
            .match_query(version())
            .with_status(404)
            .with_body(
                json!({
                    "trace": "t-1",
                    "errors": [{"code": "not_found", "message": "Collection not found"}]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let fixture = visual_recognition(&server.url());

        let actual = fixture.get_collection(&CollectionOptions::new("missing")).await.unwrap_err();

        assert!(matches!(
            actual,
            Error::Service { status, ref message, .. }
                if status.as_u16() == 404 && message == "Collection not found"
        ));
    }
}
