use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{is_duplicate_key, AppError, AppResult},
    models::domain::Quiz,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the slug is taken.
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Quiz>>;
    async fn slug_exists(&self, slug: &str) -> AppResult<bool>;
    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)>;
    async fn delete(&self, id: &ObjectId) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.quizzes(),
        }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::AlreadyExists(format!("Quiz with slug '{}' already exists", quiz.slug))
            } else {
                e.into()
            }
        })?;
        Ok(quiz)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "slug": slug }).await?;
        Ok(quiz)
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let existing = self.collection.find_one(doc! { "slug": slug }).await?;
        Ok(existing.is_some())
    }

    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let items: Vec<Quiz> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((items, total))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("slug_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(slug_index).await?;

        log::info!("Created unique index on quizzes.slug");
        Ok(())
    }
}
