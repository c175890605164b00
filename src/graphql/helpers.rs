use async_graphql::{Context, ResultExt};
use mongodb::bson::oid::ObjectId;

use crate::{auth::cookie::session_cookie, config::Config, models::parse_object_id};

/// Parse a GraphQL id argument, reporting failures the way resolvers expect.
pub fn parse_id(id: &str, field: &str) -> async_graphql::Result<ObjectId> {
    parse_object_id(id, field).extend()
}

/// Attach the session cookie to the GraphQL HTTP response.
pub fn set_session_cookie(ctx: &Context<'_>, config: &Config, token: &str) {
    let cookie = session_cookie(config, token);
    ctx.append_http_header("set-cookie", cookie.to_string());
}
