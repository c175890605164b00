use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuestionRepository, MongoQuizRepository, MongoSubmissionRepository,
        MongoUserRepository, QuestionRepository, QuizRepository, SubmissionRepository,
        UserRepository,
    },
    services::{
        quiz_service::QuizService, slug_service::SlugAllocator,
        submission_service::SubmissionService, user_service::UserService,
    },
};

/// Storage backends the services are built on.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserRepository::new(db)),
            quizzes: Arc::new(MongoQuizRepository::new(db)),
            questions: Arc::new(MongoQuestionRepository::new(db)),
            submissions: Arc::new(MongoSubmissionRepository::new(db)),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.quizzes.ensure_indexes().await?;
        self.questions.ensure_indexes().await?;
        self.submissions.ensure_indexes().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub submission_service: Arc<SubmissionService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    /// Present when backed by MongoDB; used for readiness checks.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let repositories = Repositories::mongo(&db);
        repositories.ensure_indexes().await?;

        let mut state = Self::from_repositories(config, repositories);
        state.db = Some(db);
        Ok(state)
    }

    pub fn from_repositories(config: Config, repositories: Repositories) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        let slug_allocator = SlugAllocator::new(
            Arc::clone(&repositories.quizzes),
            config.slug_random_attempts,
            config.slug_fallback_attempts,
        );

        let user_service = Arc::new(UserService::new(
            repositories.users,
            Arc::clone(&jwt_service),
        ));
        let quiz_service = Arc::new(QuizService::new(
            repositories.quizzes,
            Arc::clone(&repositories.questions),
            slug_allocator,
        ));
        let submission_service = Arc::new(SubmissionService::new(
            repositories.questions,
            repositories.submissions,
        ));

        Self {
            user_service,
            quiz_service,
            submission_service,
            jwt_service,
            config: Arc::new(config),
            db: None,
        }
    }
}
