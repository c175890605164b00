use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::LOCATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{Claims, JwtService, RouteTable},
    errors::AppError,
    middleware::get_request_id,
};

/// Cookie-based session gate.
///
/// A valid token attaches its [`Claims`] to the request on every path. Without
/// one, public paths from the [`RouteTable`] pass through anonymously and every
/// other path is redirected to the login page.
#[derive(Clone)]
pub struct AuthGate {
    jwt_service: Arc<JwtService>,
    routes: Arc<RouteTable>,
    cookie_name: Arc<str>,
}

impl AuthGate {
    pub fn new(jwt_service: Arc<JwtService>, routes: Arc<RouteTable>, cookie_name: &str) -> Self {
        Self {
            jwt_service,
            routes,
            cookie_name: Arc::from(cookie_name),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
            gate: self.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: Rc<S>,
    gate: AuthGate,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = self.gate.clone();

        Box::pin(async move {
            let verified = req
                .cookie(&gate.cookie_name)
                .map(|cookie| gate.jwt_service.validate_token(cookie.value()));

            match verified {
                Some(Ok(claims)) => {
                    log::debug!("Session verified for user {}", claims.sub);
                    req.extensions_mut().insert(claims);
                }
                Some(Err(e)) if gate.routes.is_public(req.path()) => {
                    log::debug!("Ignoring invalid session on public path {}: {}", req.path(), e);
                }
                None if gate.routes.is_public(req.path()) => {}
                other => {
                    let request_id =
                        get_request_id(req.request()).unwrap_or_else(|| "-".to_string());
                    match other {
                        Some(Err(e)) => log::info!(
                            "[{}] Session verification failed for {}: {}",
                            request_id,
                            req.path(),
                            e
                        ),
                        _ => log::debug!(
                            "[{}] No session for {}, redirecting to login",
                            request_id,
                            req.path()
                        ),
                    }
                    let response = HttpResponse::Found()
                        .insert_header((LOCATION, gate.routes.login_path().to_string()))
                        .finish();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Extractor for handlers behind the gate.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}
