use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Submission};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Submission>>;
    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Submission>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.submissions(),
        }
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(submission)
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Submission>> {
        let submissions = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(submissions)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1 })
            .options(IndexOptions::builder().name("user_quiz".to_string()).build())
            .build();

        self.collection.create_index(user_quiz_index).await?;

        log::info!("Created index on submissions.user_id");
        Ok(())
    }
}
