use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{CreateUserRequest, LoginRequest};
use crate::infrastructure::jwt::JwtService;

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn create_user(&self, req: CreateUserRequest) -> Result<(), DomainError> {
        let req = req.validate()?;

        if self.repo.email_exists(&req.email).await? {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        let password_hash = self.hash_password(&req.password)?;
        self.repo
            .create_user(NewUser {
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                password_hash,
            })
            .await
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<String, DomainError> {
        let req = req.validate()?;

        let creds = match self.repo.find_by_email(&req.email).await? {
            Some(creds) => creds,
            None => {
                // keep the work roughly constant when the user is missing
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &creds.password_hash)?;

        self.jwt
            .issue(&creds.user.email, creds.user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::AuthService;
    use crate::data::ListParams;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{CreateUserRequest, LoginRequest, User};
    use crate::infrastructure::jwt::JwtService;

    #[derive(Clone, Default)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        existing_email: Arc<Mutex<bool>>,
        credentials: Arc<Mutex<Option<UserCredentials>>>,
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<(), DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input);
            Ok(())
        }

        async fn email_exists(&self, _email: &str) -> Result<bool, DomainError> {
            Ok(*self
                .existing_email
                .lock()
                .expect("existing_email mutex poisoned"))
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .credentials
                .lock()
                .expect("credentials mutex poisoned")
                .clone())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn list_users(&self, _params: ListParams) -> Result<Vec<User>, DomainError> {
            Ok(Vec::new())
        }

        async fn count_users(&self, _search: Option<&str>) -> Result<i64, DomainError> {
            Ok(0)
        }

        async fn update_profile(&self, user: &User) -> Result<User, DomainError> {
            Ok(user.clone())
        }
    }

    fn sample_user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            avatar: None,
            bio: None,
            created_at: Utc::now(),
        }
    }

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("0123456789abcdef0123456789abcdef", 60))
    }

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            email: " Test@Example.com ".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            password: "very-secure-password".to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_hashes_password_before_repo_call() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone(), test_jwt());

        service
            .create_user(create_request())
            .await
            .expect("create must succeed");

        let created = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("create_user must be called");
        assert_eq!(created.email, "test@example.com");
        assert_ne!(created.password_hash, "very-secure-password");
        service
            .verify_password("very-secure-password", &created.password_hash)
            .expect("stored hash must verify against the plaintext");
    }

    #[tokio::test]
    async fn create_user_with_existing_email_is_a_conflict() {
        let repo = FakeUserRepo::default();
        *repo
            .existing_email
            .lock()
            .expect("existing_email mutex poisoned") = true;

        let service = AuthService::new(repo.clone(), test_jwt());
        let err = service
            .create_user(create_request())
            .await
            .expect_err("duplicate email must fail");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
        assert!(
            repo.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let service = AuthService::new(FakeUserRepo::default(), test_jwt());

        let err = service
            .login(LoginRequest {
                email: "missing@example.com".to_string(),
                password: "whatever-password".to_string(),
            })
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        *repo.credentials.lock().expect("credentials mutex poisoned") = Some(UserCredentials {
            user: sample_user(1, "test@example.com"),
            password_hash: hash,
        });

        let err = service
            .login(LoginRequest {
                email: "test@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_issues_verifiable_token_for_valid_credentials() {
        let repo = FakeUserRepo::default();
        let jwt = test_jwt();
        let service = AuthService::new(repo.clone(), jwt.clone());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        *repo.credentials.lock().expect("credentials mutex poisoned") = Some(UserCredentials {
            user: sample_user(7, "test@example.com"),
            password_hash: hash,
        });

        let token = service
            .login(LoginRequest {
                email: "test@example.com".to_string(),
                password: "correct-password".to_string(),
            })
            .await
            .expect("login must succeed");

        let claims = jwt.verify(&token).expect("token must verify");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "test@example.com");
    }

    #[tokio::test]
    async fn hash_then_verify_roundtrip() {
        let service = AuthService::new(FakeUserRepo::default(), test_jwt());

        let hash = service.hash_password("plaintext").expect("must hash");
        assert!(service.verify_password("plaintext", &hash).is_ok());
        assert!(matches!(
            service.verify_password("other", &hash),
            Err(DomainError::InvalidCredentials)
        ));
    }
}
