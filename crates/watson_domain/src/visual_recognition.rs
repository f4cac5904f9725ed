use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Analysis features supported by `analyze`.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalyzeFeature {
    #[default]
    Objects,
}

/// Details about a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub collection_id: String,
    pub name: String,
    pub description: String,
    pub created: String,
    pub updated: String,
    /// Number of images in the collection.
    pub image_count: i64,
    pub training_status: TrainingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionsList {
    pub collections: Vec<Collection>,
}

/// Training status information for the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStatus {
    pub objects: ObjectTrainingStatus,
}

/// Training status for the objects in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTrainingStatus {
    /// Whether there are ready models for the collection.
    pub ready: bool,
    pub in_progress: bool,
    /// Whether there are changes since the last training.
    pub data_changed: bool,
    pub latest_failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rscnn_ready: Option<bool>,
    pub description: String,
}

/// Request body for creating a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(strip_option, into)]
pub struct CreateCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for updating a collection. Omitted fields are unchanged.
pub type UpdateCollection = CreateCollection;

/// Details about an image stored in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetails {
    pub image_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub source: ImageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_data: Option<TrainingDataObjects>,
}

/// Where an image came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// `file` or `url`.
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Name of the archive the image was extracted from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Fully resolved URL after redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

/// Training data for the objects in an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDataObjects {
    #[serde(default)]
    pub objects: Vec<TrainingDataObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDataObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSummaryList {
    pub images: Vec<ImageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Results of analyzing one or more images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<WarningInfo>>,
    /// Request identifier for troubleshooting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Analysis results for a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub source: ImageSource,
    pub dimensions: ImageDimensions,
    pub objects: DetectedObjects,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorInfo>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedObjects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<CollectionObjects>>,
}

/// Objects detected by the model of one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionObjects {
    pub collection_id: String,
    pub objects: Vec<ObjectDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetail {
    /// The label of the detected object.
    pub object: String,
    pub location: Location,
    /// Confidence score, between 0 and 1.
    pub score: f64,
}

/// Bounding box of an object, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub top: i64,
    pub left: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningInfo {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// HTTP status code.
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}
