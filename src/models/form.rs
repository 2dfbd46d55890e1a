use crate::models::score::ScoreOption;
use crate::models::target::{ContentObject, ContentId, ContentTypeId, TargetRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields posted by the review form and carried through the preview round-trip.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReviewSubmission {
    pub content_type_id: ContentTypeId,
    pub content_id: ContentId,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub edit: String, // Set by the "edit" button on the preview page
}

impl ReviewSubmission {
    pub fn target(&self) -> TargetRef {
        TargetRef::new(self.content_type_id, self.content_id)
    }

    pub fn wants_edit(&self) -> bool {
        !self.edit.is_empty()
    }
}

pub const REQUIRED_MSG: &str = "This field is required";

/// Field name to messages.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FormErrors(pub BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the form page needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormView {
    pub object: ContentObject,
    pub submission: ReviewSubmission,
    pub scores: Vec<ScoreOption>,
    pub errors: FormErrors,
    pub ask_contact: bool, // Authenticated reviewers are not asked for name/email
}

/// Everything the preview page needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PreviewView {
    pub object: ContentObject,
    pub submission: ReviewSubmission,
    pub score: f64,
    pub name: String,
    pub email: String,
}
