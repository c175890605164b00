pub mod auth_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod user_handler;

use actix_web::web;

use crate::config::Config;

pub use auth_handler::{login, login_page, logout, register};
pub use graphql_handler::{graphiql, graphql};
pub use health_handler::{health_check, health_check_ready};
pub use user_handler::me;

/// Register every route. Paths the gate treats specially come from `config`.
pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::resource(config.login_path.as_str())
            .route(web::get().to(login_page))
            .route(web::post().to(login)),
    )
    .service(web::resource(config.register_path.as_str()).route(web::post().to(register)))
    .service(web::resource(config.graphql_path.as_str()).route(web::post().to(graphql)))
    .service(web::resource("/graphiql").route(web::get().to(graphiql)))
    .service(logout)
    .service(me)
    .service(health_check)
    .service(health_check_ready);
}
