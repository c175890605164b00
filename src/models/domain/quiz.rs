use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: Option<String>,
    pub user_id: ObjectId, // owner
    pub slug: String,      // unique, see SlugAllocator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(title: &str, description: Option<&str>, user_id: ObjectId, slug: &str) -> Self {
        Quiz {
            id: ObjectId::new(),
            title: title.to_string(),
            description: description.map(str::to_string),
            user_id,
            slug: slug.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
