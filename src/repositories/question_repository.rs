use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Question>>;
    async fn find_by_quiz(&self, quiz_id: &ObjectId) -> AppResult<Vec<Question>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.questions(),
        }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        // insert_many rejects an empty batch
        if questions.is_empty() {
            return Ok(questions);
        }
        self.collection.insert_many(&questions).await?;
        Ok(questions)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(question)
    }

    async fn find_by_quiz(&self, quiz_id: &ObjectId) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "order": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "order": 1 })
            .options(IndexOptions::builder().name("quiz_order".to_string()).build())
            .build();

        self.collection.create_index(quiz_index).await?;

        log::info!("Created index on questions.quiz_id");
        Ok(())
    }
}
