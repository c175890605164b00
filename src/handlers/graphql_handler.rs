use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{app_state::AppState, auth::Claims, graphql::Schema};

/// Executes a GraphQL request, forwarding session claims set by the gate.
pub async fn graphql(
    schema: web::Data<Schema>,
    http_request: HttpRequest,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();

    if let Some(claims) = http_request.extensions().get::<Claims>().cloned() {
        request = request.data(claims);
    }

    schema.execute(request).await.into()
}

pub async fn graphiql(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            GraphiQLSource::build()
                .endpoint(&state.config.graphql_path)
                .finish(),
        )
}
