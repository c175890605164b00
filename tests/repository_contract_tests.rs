mod common;

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use quizly_server::{
    errors::AppError,
    models::domain::{Question, Quiz, User},
    repositories::{QuestionRepository, QuizRepository, UserRepository},
    services::slug_service::SlugAllocator,
};

use common::{InMemoryQuestionRepository, InMemoryQuizRepository, InMemoryUserRepository};

#[tokio::test]
async fn test_user_email_is_unique() {
    let repo = InMemoryUserRepository::default();

    repo.create(User::new("alice", "alice@example.com", "hash"))
        .await
        .unwrap();
    let duplicate = repo
        .create(User::new("alice-again", "alice@example.com", "hash"))
        .await;

    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_quiz_slug_is_unique_and_delete_reports_missing() {
    let repo = InMemoryQuizRepository::default();
    let owner = ObjectId::new();

    let quiz = repo
        .create(Quiz::new("Math", None, owner, "math1"))
        .await
        .unwrap();
    let clash = repo.create(Quiz::new("Math", None, owner, "math1")).await;
    assert!(matches!(clash, Err(AppError::AlreadyExists(_))));

    assert!(repo.slug_exists("math1").await.unwrap());
    repo.delete(&quiz.id).await.unwrap();
    assert!(!repo.slug_exists("math1").await.unwrap());

    assert!(matches!(
        repo.delete(&quiz.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_questions_listed_in_order() {
    let repo = InMemoryQuestionRepository::default();
    let quiz_id = ObjectId::new();
    let other_quiz = ObjectId::new();

    repo.create_many(vec![
        Question::new(quiz_id, "third", "c", 3),
        Question::new(quiz_id, "first", "a", 1),
        Question::new(other_quiz, "elsewhere", "x", 0),
        Question::new(quiz_id, "second", "b", 2),
    ])
    .await
    .unwrap();

    let titles: Vec<String> = repo
        .find_by_quiz(&quiz_id)
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.title)
        .collect();

    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_allocator_counts_past_taken_fallback_slugs() {
    let repo = Arc::new(InMemoryQuizRepository::default());
    let owner = ObjectId::new();

    for slug in ["math-quiz1000000", "math-quiz1000001"] {
        repo.create(Quiz::new("Math Quiz!", None, owner, slug))
            .await
            .unwrap();
    }

    // No random attempts: go straight to the counter
    let allocator = SlugAllocator::new(repo.clone() as Arc<dyn QuizRepository>, 0, 10);
    let slug = allocator.allocate("Math Quiz!").await.unwrap();

    assert_eq!(slug, "math-quiz1000002");
}

#[tokio::test]
async fn test_allocator_errors_when_fallback_exhausted() {
    let repo = Arc::new(InMemoryQuizRepository::default());
    repo.create(Quiz::new("Only", None, ObjectId::new(), "only1000000"))
        .await
        .unwrap();

    let allocator = SlugAllocator::new(repo as Arc<dyn QuizRepository>, 0, 1);
    let result = allocator.allocate("Only").await;

    assert!(matches!(result, Err(AppError::InternalError(_))));
}
