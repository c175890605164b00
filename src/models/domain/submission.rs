use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub quiz_id: ObjectId,
    pub score: f64, // percentage, 0..=100
    pub correct_count: i32,
    pub total_count: i32,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(
        user_id: ObjectId,
        quiz_id: ObjectId,
        score: f64,
        correct_count: i32,
        total_count: i32,
    ) -> Self {
        Submission {
            id: ObjectId::new(),
            user_id,
            quiz_id,
            score,
            correct_count,
            total_count,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_round_trip_preserves_score_fields() {
        let submission = Submission::new(ObjectId::new(), ObjectId::new(), 50.0, 2, 4);

        let json = serde_json::to_string(&submission).expect("submission should serialize");
        let parsed: Submission =
            serde_json::from_str(&json).expect("submission should deserialize");

        assert_eq!(parsed.score, 50.0);
        assert_eq!(parsed.correct_count, 2);
        assert_eq!(parsed.total_count, 4);
        assert_eq!(parsed.id, submission.id);
    }
}
