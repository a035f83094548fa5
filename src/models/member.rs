//! Team member model matching the editor sidebar contract.

use serde::{Deserialize, Serialize};

/// Attachment reference stored on a member's image fields.
///
/// Always carries all four keys. "No image attached" is the zeroed object
/// (`id: 0`, empty strings), never a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageMeta {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
}

impl Default for ImageMeta {
    fn default() -> Self {
        Self {
            id: 0,
            url: String::new(),
            width: String::new(),
            height: String::new(),
        }
    }
}

/// A team member profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub subtitle: String,
    pub cover_image: ImageMeta,
    pub detail_image: ImageMeta,
    pub show: bool,
    pub scroll_top: bool,
    pub scroll_offset: f64,
    pub updated_at: String,
}

impl TeamMember {
    /// The member's metadata fields as the editor panel reads them.
    pub fn meta(&self) -> serde_json::Value {
        serde_json::json!({
            "coverImage": self.cover_image,
            "detailImage": self.detail_image,
            "name": self.name,
            "subtitle": self.subtitle,
            "show": self.show,
            "scrollTop": self.scroll_top,
            "scrollOffset": self.scroll_offset,
        })
    }
}

/// Request body for creating a new team member.
///
/// Any omitted field takes its schema default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub cover_image: Option<ImageMeta>,
    #[serde(default)]
    pub detail_image: Option<ImageMeta>,
    #[serde(default)]
    pub show: Option<bool>,
    #[serde(default)]
    pub scroll_top: Option<bool>,
    #[serde(default)]
    pub scroll_offset: Option<f64>,
}

/// Request body for writing a single metadata field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldWriteRequest {
    pub value: serde_json::Value,
}
