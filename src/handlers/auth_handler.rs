use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::cookie::{removal_cookie, session_cookie},
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest},
        response::{MessageResponse, TokenResponse},
    },
};

/// Where the gate sends unauthenticated callers.
pub async fn login_page(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: format!(
            "Authentication required. POST credentials to {} or use the login mutation at {}",
            state.config.login_path, state.config.graphql_path
        ),
    })
}

pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let issued = state.user_service.login(request.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state.config, &issued.token))
        .json(TokenResponse {
            token: issued.token,
        }))
}

pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let issued = state.user_service.register(request.into_inner()).await?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(&state.config, &issued.token))
        .json(TokenResponse {
            token: issued.token,
        }))
}

#[post("/auth/logout")]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(&state.config))
        .json(MessageResponse {
            message: "Logged out".to_string(),
        })
}
