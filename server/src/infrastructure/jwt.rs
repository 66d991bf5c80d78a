use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    /// Subject: the user's email.
    pub(crate) sub: String,
    pub(crate) user_id: i64,
    pub(crate) exp: i64,
}

pub(crate) struct JwtService {
    secret: String,
    ttl_minutes: i64,
}

impl JwtService {
    const DEFAULT_TTL_MINUTES: i64 = 21_000;

    pub(crate) fn new(secret: &str, ttl_minutes: i64) -> Self {
        let ttl_minutes = if ttl_minutes > 0 {
            ttl_minutes
        } else {
            Self::DEFAULT_TTL_MINUTES
        };

        JwtService {
            secret: secret.into(),
            ttl_minutes,
        }
    }

    pub(crate) fn issue(&self, subject: &str, user_id: i64) -> Result<String, JwtError> {
        let exp = (Utc::now() + Duration::minutes(self.ttl_minutes)).timestamp();

        let claims = Claims {
            sub: subject.into(),
            user_id,
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    pub(crate) fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::JwtService;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issue_then_verify_returns_embedded_identity() {
        let jwt = JwtService::new(SECRET, 60);

        let token = jwt.issue("test@example.com", 42).expect("must issue");
        let claims = jwt.verify(&token).expect("must verify");

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "test@example.com");
    }

    #[test]
    fn expired_token_fails_verification() {
        // bypass the non-positive-TTL coercion to force a token in the past
        let jwt = JwtService {
            secret: SECRET.to_string(),
            ttl_minutes: -60,
        };

        let token = jwt.issue("test@example.com", 42).expect("must issue");
        assert!(jwt.verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_fails_verification() {
        let issuer = JwtService::new(SECRET, 60);
        let verifier = JwtService::new("another-secret-another-secret-32", 60);

        let token = issuer.issue("test@example.com", 42).expect("must issue");
        assert!(verifier.verify(&token).is_err());
        assert!(issuer.verify("not-a-token").is_err());
    }

    #[test]
    fn non_positive_ttl_falls_back_to_default() {
        let jwt = JwtService::new(SECRET, 0);
        assert_eq!(jwt.ttl_minutes, JwtService::DEFAULT_TTL_MINUTES);
    }
}
