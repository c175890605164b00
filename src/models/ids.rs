use mongodb::bson::oid::ObjectId;

use crate::errors::{AppError, AppResult};

/// Parse an API-supplied hex id, naming the offending field on failure.
pub fn parse_object_id(value: &str, field: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid {} format", field)))
}
