//! The Comment entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Document;

/// Denormalized snapshot of the post a comment belongs to
///
/// Deliberately omits the post's `creator` so it never appears in a
/// comment's serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRef {
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
}

/// A comment on a post
///
/// `creaion_date` keeps the original field name, typo included; clients
/// depend on the `creaionDate` wire name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(
        rename = "creaionDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creaion_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<PostRef>,
}

impl Document for Comment {
    const TABLE: &'static str = "comment";
    const NAME: &'static str = "comment";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn merge(&mut self, patch: Self) {
        if let Some(text) = patch.text {
            self.text = Some(text);
        }
        if let Some(creaion_date) = patch.creaion_date {
            self.creaion_date = Some(creaion_date);
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.creaion_date.is_none() {
            return Err("Field 'creaionDate' must not be null".to_string());
        }
        Ok(())
    }

    fn sortable_fields() -> &'static [&'static str] {
        &["id", "text", "creaionDate"]
    }
}

/// Identifier-based equality, same rules as [`super::Post`]
impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}
