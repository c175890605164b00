use actix_web::cookie::{time::Duration, Cookie, SameSite};

use crate::config::Config;

/// Session cookie carrying a signed token.
pub fn session_cookie(config: &Config, token: &str) -> Cookie<'static> {
    Cookie::build(config.session_cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(true)
        .secure(config.session_cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(config.jwt_expiration_hours))
        .finish()
}

/// Expired cookie that clears the session on the client.
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.session_cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}
