use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub quiz_id: ObjectId,
    pub title: String,
    pub correct_answer: String,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(quiz_id: ObjectId, title: &str, correct_answer: &str, order: i32) -> Self {
        Question {
            id: ObjectId::new(),
            quiz_id,
            title: title.to_string(),
            correct_answer: correct_answer.to_string(),
            order,
            created_at: Some(Utc::now()),
        }
    }
}
