//! The Post entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Document;

/// Denormalized snapshot of the user who created a post
///
/// This is an opaque reference: the service does not maintain a user
/// registry and never validates these fields against one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

/// A blog post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,

    #[serde(
        rename = "creationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<UserRef>,
}

impl Document for Post {
    const TABLE: &'static str = "post";
    const NAME: &'static str = "post";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn merge(&mut self, patch: Self) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(required) = patch.required {
            self.required = Some(required);
        }
        if let Some(creation_date) = patch.creation_date {
            self.creation_date = Some(creation_date);
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.required.is_none() {
            return Err("Field 'required' must not be null".to_string());
        }
        Ok(())
    }

    fn sortable_fields() -> &'static [&'static str] {
        &["id", "title", "required", "creationDate"]
    }
}

/// Identifier-based equality: two posts are equal iff both are persisted
/// with the same id. A transient post is not equal to anything.
impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}
