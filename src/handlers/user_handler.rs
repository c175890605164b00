use actix_web::{get, HttpResponse};

use crate::auth::AuthenticatedUser;

/// Claims of the current session.
#[get("/api/me")]
pub async fn me(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(auth.0)
}
