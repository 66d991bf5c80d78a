use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::user::OwnerProfile;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: String,
    pub(crate) preview_image: String,
    pub(crate) views: i64,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

/// List row: the post plus its author's profile fields.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostListItem {
    pub(crate) post: Post,
    pub(crate) author: OwnerProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: String,
    pub(crate) preview_image: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_text("content", &self.content)?,
            image: normalize_text("image", &self.image)?,
            preview_image: normalize_text("preview_image", &self.preview_image)?,
        })
    }
}

/// Post patch: `None` means "keep the stored value".
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) preview_image: Option<String>,
}

impl PostPatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: self.title.map(|v| normalize_title(&v)).transpose()?,
            content: self
                .content
                .map(|v| normalize_text("content", &v))
                .transpose()?,
            image: self.image.map(|v| normalize_text("image", &v)).transpose()?,
            preview_image: self
                .preview_image
                .map(|v| normalize_text("preview_image", &v))
                .transpose()?,
        })
    }
}

impl Post {
    /// Pure snapshot + patch merge; fields absent from the patch keep their
    /// stored value. The repository stamps `updated_at` on write.
    pub(crate) fn merged(mut self, patch: PostPatch) -> Post {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(preview_image) = patch.preview_image {
            self.preview_image = preview_image;
        }
        self
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(value.to_string())
}
