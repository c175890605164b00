use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Question, Quiz, Submission, User},
};

pub const USERS: &str = "users";
pub const QUIZZES: &str = "quizzes";
pub const QUESTIONS: &str = "questions";
pub const SUBMISSIONS: &str = "submissions";

/// Handle to the quiz database. Cheap to clone; clones share one pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    name: String,
}

impl Database {
    /// Build a pooled client and fail fast if the server does not answer.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let db = Self::from_client(Client::with_options(options)?, &config.mongo_db_name);
        db.ping().await?;

        log::info!("Connected to MongoDB database '{}'", db.name);
        Ok(db)
    }

    pub fn from_client(client: Client, name: &str) -> Self {
        Self {
            client,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn users(&self) -> Collection<User> {
        self.collection(USERS)
    }

    pub fn quizzes(&self) -> Collection<Quiz> {
        self.collection(QUIZZES)
    }

    pub fn questions(&self) -> Collection<Question> {
        self.collection(QUESTIONS)
    }

    pub fn submissions(&self) -> Collection<Submission> {
        self.collection(SUBMISSIONS)
    }

    /// Readiness check used by `/health/ready`.
    pub async fn ping(&self) -> AppResult<()> {
        self.client
            .database(&self.name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.client.database(&self.name).collection(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Parsing a plain mongodb:// URI does not open a connection.
    async fn offline_db() -> Database {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        Database::from_client(client, "quizly-test")
    }

    #[test]
    fn test_database_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Database>();
    }

    #[tokio::test]
    async fn test_typed_collections_use_fixed_names() {
        let db = offline_db().await;

        assert_eq!(db.name(), "quizly-test");
        assert_eq!(db.users().name(), "users");
        assert_eq!(db.quizzes().name(), "quizzes");
        assert_eq!(db.questions().name(), "questions");
        assert_eq!(db.submissions().name(), "submissions");
        assert_eq!(db.quizzes().namespace().db, "quizly-test");
    }
}
