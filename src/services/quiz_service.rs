use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz},
        dto::request::CreateQuizRequest,
        parse_object_id,
    },
    repositories::{QuestionRepository, QuizRepository},
    services::slug_service::SlugAllocator,
};

/// Inserts that lose a slug race re-allocate this many times in total.
const SLUG_INSERT_ATTEMPTS: u32 = 3;

pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    slug_allocator: SlugAllocator,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        question_repository: Arc<dyn QuestionRepository>,
        slug_allocator: SlugAllocator,
    ) -> Self {
        Self {
            quiz_repository,
            question_repository,
            slug_allocator,
        }
    }

    /// Store a quiz under a fresh unique slug, then its questions.
    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;
        let owner = parse_object_id(&request.user_id, "userId")?;

        let mut attempt = 0;
        let quiz = loop {
            attempt += 1;
            let slug = self.slug_allocator.allocate(&request.title).await?;
            let quiz = Quiz::new(&request.title, request.description.as_deref(), owner, &slug);

            match self.quiz_repository.create(quiz).await {
                Ok(quiz) => break quiz,
                Err(AppError::AlreadyExists(_)) if attempt < SLUG_INSERT_ATTEMPTS => {
                    log::warn!("Slug '{}' was claimed concurrently, re-allocating", slug);
                }
                Err(e) => return Err(e),
            }
        };

        let questions: Vec<Question> = request
            .questions
            .iter()
            .map(|q| Question::new(quiz.id, &q.title, &q.correct_answer, q.order))
            .collect();

        if let Err(e) = self.question_repository.create_many(questions).await {
            log::error!("Saving questions for quiz {} failed: {}", quiz.id, e);
            if let Err(cleanup) = self.quiz_repository.delete(&quiz.id).await {
                log::error!("Removing orphaned quiz {} failed: {}", quiz.id, cleanup);
            }
            return Err(e);
        }

        log::info!(
            "Created quiz {} with slug '{}' ({} questions)",
            quiz.id,
            quiz.slug,
            request.questions.len()
        );

        Ok(quiz)
    }

    pub async fn get_quiz_by_slug(&self, slug: &str) -> AppResult<Quiz> {
        self.quiz_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with slug '{}' not found", slug)))
    }

    pub async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        self.quiz_repository.list_quizzes(offset, limit).await
    }

    pub async fn list_questions(&self, quiz_id: &ObjectId) -> AppResult<Vec<Question>> {
        let mut questions = self.question_repository.find_by_quiz(quiz_id).await?;
        questions.sort_by_key(|q| q.order);
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::dto::request::QuestionInput,
        repositories::{
            question_repository::MockQuestionRepository, quiz_repository::MockQuizRepository,
        },
    };

    fn request(user_id: &str) -> CreateQuizRequest {
        CreateQuizRequest {
            title: "Math Quiz!".to_string(),
            description: Some("Basic arithmetic".to_string()),
            user_id: user_id.to_string(),
            questions: vec![
                QuestionInput {
                    title: "2 + 2".to_string(),
                    correct_answer: "4".to_string(),
                    order: 1,
                },
                QuestionInput {
                    title: "3 + 3".to_string(),
                    correct_answer: "6".to_string(),
                    order: 2,
                },
            ],
        }
    }

    fn service(quizzes: MockQuizRepository, questions: MockQuestionRepository) -> QuizService {
        let quizzes: Arc<dyn QuizRepository> = Arc::new(quizzes);
        let allocator = SlugAllocator::new(Arc::clone(&quizzes), 10, 10);
        QuizService::new(quizzes, Arc::new(questions), allocator)
    }

    #[tokio::test]
    async fn test_create_quiz_persists_quiz_and_questions() {
        let owner = ObjectId::new();

        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_slug_exists().returning(|_| Ok(false));
        quizzes
            .expect_create()
            .times(1)
            .withf(move |quiz| quiz.user_id == owner && quiz.slug.starts_with("math-quiz"))
            .returning(|quiz| Ok(quiz));

        let mut questions = MockQuestionRepository::new();
        questions
            .expect_create_many()
            .times(1)
            .withf(|qs| qs.len() == 2 && qs[0].correct_answer == "4")
            .returning(|qs| Ok(qs));

        let quiz = service(quizzes, questions)
            .create_quiz(request(&owner.to_hex()))
            .await
            .unwrap();

        assert_eq!(quiz.title, "Math Quiz!");
        assert!(quiz.slug.starts_with("math-quiz"));
    }

    #[tokio::test]
    async fn test_create_quiz_reallocates_after_slug_conflict() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_slug_exists().returning(|_| Ok(false));

        let mut seq = mockall::Sequence::new();
        quizzes
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::AlreadyExists("slug taken".to_string())));
        quizzes
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|quiz| Ok(quiz));

        let mut questions = MockQuestionRepository::new();
        questions.expect_create_many().returning(|qs| Ok(qs));

        let result = service(quizzes, questions)
            .create_quiz(request(&ObjectId::new().to_hex()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_quiz_removes_quiz_when_questions_fail() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_slug_exists().returning(|_| Ok(false));
        quizzes.expect_create().returning(|quiz| Ok(quiz));
        quizzes.expect_delete().times(1).returning(|_| Ok(()));

        let mut questions = MockQuestionRepository::new();
        questions
            .expect_create_many()
            .returning(|_| Err(AppError::DatabaseError("write failed".to_string())));

        let result = service(quizzes, questions)
            .create_quiz(request(&ObjectId::new().to_hex()))
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_create_quiz_rejects_bad_owner_id() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_create().never();

        let result = service(quizzes, MockQuestionRepository::new())
            .create_quiz(request("nope"))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_get_quiz_by_slug_not_found() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_slug().returning(|_| Ok(None));

        let result = service(quizzes, MockQuestionRepository::new())
            .get_quiz_by_slug("missing123")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_questions_sorted_by_order() {
        let quiz_id = ObjectId::new();

        let mut questions = MockQuestionRepository::new();
        questions.expect_find_by_quiz().returning(move |_| {
            Ok(vec![
                Question::new(quiz_id, "second", "b", 2),
                Question::new(quiz_id, "first", "a", 1),
            ])
        });

        let listed = service(MockQuizRepository::new(), questions)
            .list_questions(&quiz_id)
            .await
            .unwrap();

        assert_eq!(listed[0].title, "first");
        assert_eq!(listed[1].title, "second");
    }
}
