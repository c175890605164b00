use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        JwtService,
    },
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::request::{LoginRequest, RegisterRequest},
    },
    repositories::UserRepository,
};

pub const EMAIL_TAKEN: &str = "User with this email address already exists!";
pub const INVALID_CREDENTIALS: &str = "Password or email incorrect";

/// A user together with a freshly signed session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub user: User,
    pub token: String,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<IssuedToken> {
        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists(EMAIL_TAKEN.to_string()));
        }

        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))??;

        let user = User::new(&request.username, &request.email, &password_hash);

        // The unique email index catches a concurrent registration
        let user = self.repository.create(user).await.map_err(|e| match e {
            AppError::AlreadyExists(_) => AppError::AlreadyExists(EMAIL_TAKEN.to_string()),
            other => other,
        })?;

        log::info!("Registered user {} ({})", user.id, user.username);

        self.issue(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<IssuedToken> {
        request
            .validate()
            .map_err(|_| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let password = request.password;
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| {
                AppError::InternalError(format!("Password verification task failed: {}", e))
            })?;

        if !matches {
            log::info!("Failed login for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        self.issue(user)
    }

    pub async fn get_user(&self, id: &ObjectId) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }

    pub async fn get_all_users(&self) -> AppResult<Vec<User>> {
        self.repository.find_all().await
    }

    fn issue(&self, user: User) -> AppResult<IssuedToken> {
        let token = self.jwt_service.create_token(&user)?;
        Ok(IssuedToken { user, token })
    }
}
