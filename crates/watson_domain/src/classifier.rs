use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Training state of a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
pub enum ClassifierStatus {
    #[serde(rename = "Non Existent")]
    #[strum(serialize = "Non Existent")]
    NonExistent,
    Training,
    Failed,
    Available,
    Unavailable,
}

/// A classifier as returned by the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    pub classifier_id: String,
    /// Link to the classifier.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClassifierStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Additional detail about the status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierList {
    pub classifiers: Vec<Classifier>,
}

/// Response from classifying a single phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The submitted phrase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The class with the highest confidence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_class: Option<String>,
    /// Up to ten classes, ordered by descending confidence.
    #[serde(default)]
    pub classes: Vec<ClassifiedClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedClass {
    /// A decimal percentage, between 0 and 1.
    pub confidence: f64,
    pub class_name: String,
}

/// Response from classifying multiple phrases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub collection: Vec<CollectionItem>,
}

/// Classification result for one phrase of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_class: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassifiedClass>,
}

/// A phrase to classify, used as the body of `classify` and as an element of
/// `classify_collection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyInput {
    pub text: String,
}

impl ClassifyInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Request body for classifying up to 30 phrases at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyCollectionInput {
    pub collection: Vec<ClassifyInput>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_classifier_with_non_existent_status() {
        let fixture = json!({
            "classifier_id": "10D41B-nlc-1",
            "url": "https://api/v1/classifiers/10D41B-nlc-1",
            "status": "Non Existent"
        });

        let actual: Classifier = serde_json::from_value(fixture).unwrap();

        assert_eq!(actual.status, Some(ClassifierStatus::NonExistent));
        assert_eq!(actual.status.map(|s| s.to_string()), Some("Non Existent".to_string()));
    }

    #[test]
    fn test_decode_classification() {
        let fixture = json!({
            "classifier_id": "10D41B-nlc-1",
            "text": "How hot will it be today?",
            "top_class": "temperature",
            "classes": [
                {"class_name": "temperature", "confidence": 0.98},
                {"class_name": "conditions", "confidence": 0.02}
            ]
        });

        let actual: Classification = serde_json::from_value(fixture).unwrap();

        assert_eq!(actual.top_class.as_deref(), Some("temperature"));
        assert_eq!(actual.classes.len(), 2);
        assert_eq!(actual.classes[1].class_name, "conditions");
    }
}
