use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::user::OwnerProfile;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) content: String,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommentListItem {
    pub(crate) comment: Comment,
    pub(crate) author: OwnerProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateCommentRequest {
    pub(crate) content: String,
}

impl CreateCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_content(&self.content)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CommentPatch {
    pub(crate) content: Option<String>,
}

impl CommentPatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: self.content.map(|v| normalize_content(&v)).transpose()?,
        })
    }
}

impl Comment {
    pub(crate) fn merged(mut self, patch: CommentPatch) -> Comment {
        if let Some(content) = patch.content {
            self.content = content;
        }
        self
    }
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Comment, CommentPatch, CreateCommentRequest};

    fn sample_comment() -> Comment {
        Comment {
            id: 1,
            post_id: 2,
            content: "first!".to_string(),
            user_id: 10,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn create_request_trims_content() {
        let req = CreateCommentRequest {
            content: "  hello  ".to_string(),
        };
        assert_eq!(req.validate().expect("must validate").content, "hello");
    }

    #[test]
    fn create_request_rejects_blank_content() {
        let req = CreateCommentRequest {
            content: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_patch_keeps_content() {
        let comment = sample_comment();
        let merged = comment.clone().merged(CommentPatch::default());
        assert_eq!(merged.content, comment.content);
    }

    #[test]
    fn patch_replaces_content() {
        let merged = sample_comment().merged(CommentPatch {
            content: Some("edited".to_string()),
        });
        assert_eq!(merged.content, "edited");
    }
}
