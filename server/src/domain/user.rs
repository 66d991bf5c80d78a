use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

/// Denormalized author fields joined onto post/comment list items.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OwnerProfile {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateUserRequest {
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) password: String,
}

impl CreateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        let first_name = normalize_name("first_name", &self.first_name)?;
        let last_name = normalize_name("last_name", &self.last_name)?;

        let password_len = self.password.chars().count();
        if password_len < 8 || password_len > 128 {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }

        Ok(Self {
            email,
            first_name,
            last_name,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }

        Ok(Self {
            email,
            password: self.password,
        })
    }
}

/// Profile patch: `None` means "keep the stored value".
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct UserPatch {
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) avatar: Option<String>,
    pub(crate) bio: Option<String>,
}

impl UserPatch {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let first_name = self
            .first_name
            .map(|v| normalize_name("first_name", &v))
            .transpose()?;
        let last_name = self
            .last_name
            .map(|v| normalize_name("last_name", &v))
            .transpose()?;

        Ok(Self {
            first_name,
            last_name,
            avatar: self.avatar,
            bio: self.bio,
        })
    }
}

impl User {
    /// Pure snapshot + patch merge; the repository writes the merged record.
    pub(crate) fn merged(mut self, patch: UserPatch) -> User {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(bio) = patch.bio {
            self.bio = Some(bio);
        }
        self
    }
}

pub(crate) fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn normalize_name(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() || value.len() > 64 {
        return Err(DomainError::Validation {
            field,
            message: "must be 1..64 chars",
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{CreateUserRequest, User, UserPatch, normalize_email};

    fn sample_user() -> User {
        User {
            id: 1,
            email: "test@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            avatar: None,
            bio: Some("bio".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn create_request_checks_password_length() {
        let short = CreateUserRequest {
            email: "test@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            password: "short".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = CreateUserRequest {
            email: " Test@Example.com ".to_string(),
            first_name: " Jane ".to_string(),
            last_name: "Doe".to_string(),
            password: "very-secure-password".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.email, "test@example.com");
        assert_eq!(validated.first_name, "Jane");
    }

    #[test]
    fn empty_patch_keeps_every_field() {
        let user = sample_user();
        let merged = user.clone().merged(UserPatch::default());
        assert_eq!(merged.first_name, user.first_name);
        assert_eq!(merged.last_name, user.last_name);
        assert_eq!(merged.avatar, user.avatar);
        assert_eq!(merged.bio, user.bio);
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let merged = sample_user().merged(UserPatch {
            first_name: Some("Janet".to_string()),
            avatar: Some("https://example.com/a.png".to_string()),
            ..UserPatch::default()
        });
        assert_eq!(merged.first_name, "Janet");
        assert_eq!(merged.last_name, "Doe");
        assert_eq!(merged.avatar.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(merged.bio.as_deref(), Some("bio"));
    }
}
