//! Authentication service - sign-up, sign-in and JWT issuance.
//!
//! Password hashing lives in the domain `Password` value object; this
//! service only orchestrates it with the user repository.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    Config, CAUSE_EMAIL_IN_USE, CAUSE_SIGN_IN_ERROR, CAUSE_SIGN_UP_ERROR, TOKEN_TYPE_ACCESS,
    TOKEN_TYPE_REFRESH,
};
use crate::domain::{Password, SignIn, SignUp, User};
use crate::errors::{AppError, AppResult, ResultExt};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signed access and refresh tokens with their lifetimes
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub access_ttl: Duration,
    pub refresh_token: String,
    pub refresh_ttl: Duration,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn sign_up(&self, input: SignUp) -> AppResult<User>;

    /// Check credentials and return the matching user
    async fn sign_in(&self, input: SignIn) -> AppResult<User>;

    /// Sign an access/refresh token pair for `user`
    fn issue_tokens(&self, user: &User) -> AppResult<TokenPair>;

    /// Verify an access token and extract its claims
    fn verify_access_token(&self, token: &str) -> AppResult<Claims>;
}

fn sign(user: &User, token_type: &str, ttl: Duration, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        token_type: token_type.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn sign_up(&self, input: SignUp) -> AppResult<User> {
        let input = input.normalized();

        async {
            let users = self.uow.users();
            if users.find_by_email(&input.email).await?.is_some() {
                return Err(AppError::conflict("Email already in use", CAUSE_EMAIL_IN_USE));
            }

            let password_hash = Password::new(&input.password)?.into_string();
            let user = users
                .create(User::new(input.name, input.email, password_hash))
                .await?;

            tracing::info!(user_id = %user.id, "User signed up");
            Ok(user)
        }
        .await
        .or_internal(CAUSE_SIGN_UP_ERROR)
    }

    async fn sign_in(&self, input: SignIn) -> AppResult<User> {
        async {
            let email = input.email.trim();

            // Verify against a dummy hash when the user is missing so both
            // failure paths take the same time and return the same error.
            match self.uow.users().find_by_email(email).await? {
                Some(user) => {
                    let stored = Password::from_hash(user.password_hash.clone());
                    if stored.verify(&input.password) {
                        Ok(user)
                    } else {
                        Err(AppError::InvalidCredentials)
                    }
                }
                None => {
                    Password::verify_dummy(&input.password);
                    Err(AppError::InvalidCredentials)
                }
            }
        }
        .await
        .or_internal(CAUSE_SIGN_IN_ERROR)
    }

    fn issue_tokens(&self, user: &User) -> AppResult<TokenPair> {
        let access_ttl = Duration::try_hours(self.config.access_token_ttl_hours)
            .ok_or_else(|| AppError::internal("Access token lifetime out of range"))
            .or_internal(CAUSE_SIGN_IN_ERROR)?;
        let refresh_ttl = Duration::try_days(self.config.refresh_token_ttl_days)
            .ok_or_else(|| AppError::internal("Refresh token lifetime out of range"))
            .or_internal(CAUSE_SIGN_IN_ERROR)?;

        let access_token = sign(user, TOKEN_TYPE_ACCESS, access_ttl, &self.config)
            .or_internal(CAUSE_SIGN_IN_ERROR)?;
        let refresh_token = sign(user, TOKEN_TYPE_REFRESH, refresh_ttl, &self.config)
            .or_internal(CAUSE_SIGN_IN_ERROR)?;

        Ok(TokenPair {
            access_token,
            access_ttl,
            refresh_token,
            refresh_ttl,
        })
    }

    fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        MockCategoryRepository, MockProductRepository, MockUserRepository, Persistence,
    };

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    fn service(users: MockUserRepository) -> Authenticator<Persistence> {
        let uow = Persistence::from_repositories(
            Arc::new(users),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockProductRepository::new()),
        );
        let config = Config::new("postgres://localhost/test", SECRET).unwrap();
        Authenticator::new(Arc::new(uow), config)
    }

    fn stored_user(password: &str) -> User {
        let hash = Password::new(password).unwrap().into_string();
        User::new("Ana".into(), "ana@shop.test".into(), hash)
    }

    #[tokio::test]
    async fn test_sign_up_rejects_taken_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("Str0ng!pass"))));
        users.expect_create().never();

        let err = service(users)
            .sign_up(SignUp {
                name: "Ana".into(),
                email: "ana@shop.test".into(),
                password: "Str0ng!pass".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { cause: "EMAIL_IN_USE", .. }));
    }

    #[tokio::test]
    async fn test_sign_up_hashes_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|user| user.password_hash.starts_with("$argon2") && user.email == "ana@shop.test")
            .returning(|user| Ok(user));

        let user = service(users)
            .sign_up(SignUp {
                name: " Ana ".into(),
                email: " ana@shop.test ".into(),
                password: "Str0ng!pass".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.name, "Ana");
    }

    #[tokio::test]
    async fn test_sign_up_database_failure_is_tagged() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(sea_orm::DbErr::Custom("down".into()).into()));

        let err = service(users)
            .sign_up(SignUp {
                name: "Ana".into(),
                email: "ana@shop.test".into(),
                password: "Str0ng!pass".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.cause(), "SIGN_UP_ERROR");
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_indistinguishable() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|email| {
            if email == "ana@shop.test" {
                Ok(Some(stored_user("Str0ng!pass")))
            } else {
                Ok(None)
            }
        });
        let service = service(users);

        let wrong_password = service
            .sign_in(SignIn {
                email: "ana@shop.test".into(),
                password: "Wr0ng!pass".into(),
            })
            .await
            .unwrap_err();
        let unknown_email = service
            .sign_in(SignIn {
                email: "nobody@shop.test".into(),
                password: "Wr0ng!pass".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.body(), unknown_email.body());
        assert_eq!(wrong_password.body().cause, "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_issued_access_token_verifies() {
        let user = stored_user("Str0ng!pass");
        let service = service(MockUserRepository::new());

        let tokens = service.issue_tokens(&user).unwrap();
        let claims = service.verify_access_token(&tokens.access_token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(tokens.refresh_ttl, Duration::days(7));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_is_an_error() {
        let uow = Persistence::from_repositories(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockProductRepository::new()),
        );
        let mut config = Config::new("postgres://localhost/test", SECRET).unwrap();
        config.access_token_ttl_hours = i64::MAX;
        let service = Authenticator::new(Arc::new(uow), config);

        let err = service.issue_tokens(&stored_user("Str0ng!pass")).unwrap_err();
        assert_eq!(err.cause(), "SIGN_IN_ERROR");
    }

    #[tokio::test]
    async fn test_refresh_token_rejected_as_access() {
        let user = stored_user("Str0ng!pass");
        let service = service(MockUserRepository::new());

        let tokens = service.issue_tokens(&user).unwrap();
        let err = service.verify_access_token(&tokens.refresh_token).unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let service = service(MockUserRepository::new());
        let err = service.verify_access_token("not.a.jwt").unwrap_err();
        assert_eq!(err.cause(), "AUTHENTICATION_REQUIRED");
    }
}
