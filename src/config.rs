use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_EXTRA_PUBLIC_ROUTES: &str = "/health,/health/ready,/graphiql";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub session_cookie_name: String,
    pub session_cookie_secure: bool,
    pub login_path: String,
    pub register_path: String,
    pub graphql_path: String,
    pub extra_public_routes: Vec<String>,
    pub slug_random_attempts: u32,
    pub slug_fallback_attempts: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quizly-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT").unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: parse_env("JWT_EXPIRATION_HOURS").unwrap_or(24),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "JWT".to_string()),
            session_cookie_secure: parse_env("SESSION_COOKIE_SECURE").unwrap_or(false),
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/auth/login".to_string()),
            register_path: env::var("REGISTER_PATH")
                .unwrap_or_else(|_| "/auth/register".to_string()),
            graphql_path: env::var("GRAPHQL_PATH").unwrap_or_else(|_| "/graphql".to_string()),
            extra_public_routes: split_routes(
                &env::var("EXTRA_PUBLIC_ROUTES")
                    .unwrap_or_else(|_| DEFAULT_EXTRA_PUBLIC_ROUTES.to_string()),
            ),
            slug_random_attempts: parse_env("SLUG_RANDOM_ATTEMPTS").unwrap_or(10),
            slug_fallback_attempts: parse_env("SLUG_FALLBACK_ATTEMPTS").unwrap_or(1000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configurations that still carry development secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}); it must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        if !self.session_cookie_secure {
            log::warn!("SESSION_COOKIE_SECURE is disabled in production");
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizly-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            session_cookie_name: "JWT".to_string(),
            session_cookie_secure: false,
            login_path: "/auth/login".to_string(),
            register_path: "/auth/register".to_string(),
            graphql_path: "/graphql".to_string(),
            extra_public_routes: Vec::new(),
            slug_random_attempts: 10,
            slug_fallback_attempts: 1000,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn split_routes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|route| !route.is_empty())
        .map(str::to_string)
        .collect()
}
