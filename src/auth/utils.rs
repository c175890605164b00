use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::parse_object_id,
};

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}

/// Claims when the caller sent a valid session, `None` for anonymous calls.
pub fn optional_claims_from_context(ctx: &Context<'_>) -> Option<Claims> {
    ctx.data_opt::<Claims>().cloned()
}

/// An authenticated caller may only act as themselves. Anonymous callers are
/// not checked. Ids are compared as ObjectIds, so hex case and surrounding
/// whitespace do not matter.
pub fn require_same_user(claims: Option<&Claims>, user_id: &str) -> AppResult<()> {
    let Some(claims) = claims else {
        return Ok(());
    };

    let caller = parse_object_id(&claims.sub, "token subject")
        .map_err(|_| AppError::Unauthorized("Session token has an invalid subject".to_string()))?;
    let target = parse_object_id(user_id, "userId")?;

    if caller != target {
        return Err(AppError::Forbidden(
            "You can only act on behalf of your own account".to_string(),
        ));
    }
    Ok(())
}
