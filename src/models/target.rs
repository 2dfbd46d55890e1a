use serde::{Deserialize, Serialize};

pub type ContentTypeId = i64;
pub type ContentId = i64;

/// Generic reference to any reviewable content object of the host application.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub content_type_id: ContentTypeId,
    pub content_id: ContentId,
}

impl TargetRef {
    pub fn new(content_type_id: ContentTypeId, content_id: ContentId) -> Self {
        Self {
            content_type_id,
            content_id,
        }
    }
}

/// A content object resolved through the registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContentObject {
    #[serde(flatten)]
    pub target: TargetRef,
    pub title: String,       // Shown on the form and preview pages
    #[serde(default)]
    pub url: Option<String>, // Where the object lives in the host application
}
