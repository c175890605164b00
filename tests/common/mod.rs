#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use quizly_server::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Question, Quiz, Submission, User},
    repositories::{QuestionRepository, QuizRepository, SubmissionRepository, UserRepository},
};

pub const TEST_JWT_SECRET: &str = "integration_test_secret_key_0123456789";

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "duplicate key: email {}",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(all)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<ObjectId, Quiz>>,
}

impl InMemoryQuizRepository {
    pub async fn len(&self) -> usize {
        self.quizzes.read().await.len()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.values().any(|q| q.slug == quiz.slug) {
            return Err(AppError::AlreadyExists(format!(
                "duplicate key: slug {}",
                quiz.slug
            )));
        }
        quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.values().find(|q| q.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.values().any(|q| q.slug == slug))
    }

    async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        self.quizzes
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<ObjectId, Question>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        let mut stored = self.questions.write().await;
        for question in &questions {
            stored.insert(question.id, question.clone());
        }
        Ok(questions)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.get(id).cloned())
    }

    async fn find_by_quiz(&self, quiz_id: &ObjectId) -> AppResult<Vec<Question>> {
        let stored = self.questions.read().await;
        let mut questions: Vec<Question> = stored
            .values()
            .filter(|q| &q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order);
        Ok(questions)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Rejects every write, for exercising rollback paths.
pub struct FailingQuestionRepository;

#[async_trait]
impl QuestionRepository for FailingQuestionRepository {
    async fn create_many(&self, _questions: Vec<Question>) -> AppResult<Vec<Question>> {
        Err(AppError::DatabaseError("questions collection unavailable".to_string()))
    }

    async fn find_by_id(&self, _id: &ObjectId) -> AppResult<Option<Question>> {
        Ok(None)
    }

    async fn find_by_quiz(&self, _quiz_id: &ObjectId) -> AppResult<Vec<Question>> {
        Ok(Vec::new())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: RwLock<HashMap<ObjectId, Submission>>,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.submissions
            .write()
            .await
            .insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Submission>> {
        Ok(self.submissions.read().await.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Submission>> {
        let stored = self.submissions.read().await;
        let mut submissions: Vec<Submission> = stored
            .values()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect();
        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(submissions)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::from_env();
    config.app_env = "test".to_string();
    config.jwt_secret = TEST_JWT_SECRET.to_string().into();
    config.jwt_expiration_hours = 1;
    config.session_cookie_name = "JWT".to_string();
    config.session_cookie_secure = false;
    config.login_path = "/auth/login".to_string();
    config.register_path = "/auth/register".to_string();
    config.graphql_path = "/graphql".to_string();
    config.extra_public_routes = vec!["/health".to_string()];
    config.slug_random_attempts = 10;
    config.slug_fallback_attempts = 1000;
    config
}

pub struct TestBackend {
    pub state: AppState,
    pub quizzes: Arc<InMemoryQuizRepository>,
}

pub fn in_memory_state() -> TestBackend {
    in_memory_state_with_questions(Arc::new(InMemoryQuestionRepository::default()))
}

pub fn in_memory_state_with_questions(questions: Arc<dyn QuestionRepository>) -> TestBackend {
    let quizzes = Arc::new(InMemoryQuizRepository::default());

    let repositories = Repositories {
        users: Arc::new(InMemoryUserRepository::default()),
        quizzes: Arc::clone(&quizzes) as Arc<dyn QuizRepository>,
        questions,
        submissions: Arc::new(InMemorySubmissionRepository::default()),
    };

    TestBackend {
        state: AppState::from_repositories(test_config(), repositories),
        quizzes,
    }
}
