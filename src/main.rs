use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use quizly_server::{
    app_state::AppState,
    auth::{AuthGate, RouteTable},
    config::Config,
    graphql::create_schema,
    handlers::configure_routes,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    if config.is_production() {
        if let Err(e) = config.validate_for_production() {
            log::error!("Invalid production configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    }

    let app_state = AppState::new(config.clone()).await.map_err(|e| {
        log::error!("Failed to initialise application state: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let schema = create_schema(app_state.clone());
    let routes = Arc::new(RouteTable::from_config(&config));
    let jwt_service = Arc::clone(&app_state.jwt_service);

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting HTTP server on http://{}:{}",
        bind_address.0,
        bind_address.1
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_address.0,
        bind_address.1
    );

    let config = Arc::new(config);

    HttpServer::new(move || {
        let cors = match &config.cors_allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
                .supports_credentials()
                .max_age(3600),
            None => Cors::permissive(),
        };

        let gate = AuthGate::new(
            Arc::clone(&jwt_service),
            Arc::clone(&routes),
            &config.session_cookie_name,
        );
        let route_config = Arc::clone(&config);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(gate)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(move |cfg| configure_routes(cfg, &route_config))
    })
    .bind(bind_address)?
    .run()
    .await
}
