use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Submission, dto::request::SubmitQuizRequest, parse_object_id},
    repositories::{QuestionRepository, SubmissionRepository},
    services::scoring::{is_correct, Tally},
};

pub struct SubmissionService {
    question_repository: Arc<dyn QuestionRepository>,
    submission_repository: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(
        question_repository: Arc<dyn QuestionRepository>,
        submission_repository: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            question_repository,
            submission_repository,
        }
    }

    /// Grade every submitted answer against its stored question and persist
    /// the result.
    ///
    /// The score is relative to the number of answers submitted, not to the
    /// number of questions in the quiz. Repeated question ids are graded each
    /// time they appear.
    pub async fn submit(&self, request: SubmitQuizRequest) -> AppResult<Submission> {
        request.validate()?;
        let user_id = parse_object_id(&request.user_id, "userId")?;
        let quiz_id = parse_object_id(&request.quiz_id, "quizId")?;

        let mut tally = Tally::default();
        for answer in &request.answers {
            let question_id = parse_object_id(&answer.question_id, "questionId")?;
            let question = self
                .question_repository
                .find_by_id(&question_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Question with id '{}' not found", question_id))
                })?;

            tally.record(is_correct(&answer.answer, &question.correct_answer));
        }

        let score = tally
            .percentage()
            .ok_or_else(|| AppError::ValidationError("At least one answer is required".to_string()))?;

        let submission = Submission::new(
            user_id,
            quiz_id,
            score,
            tally.correct as i32,
            tally.total as i32,
        );
        let submission = self.submission_repository.create(submission).await?;

        log::info!(
            "User {} scored {:.1} on quiz {} ({}/{})",
            user_id,
            score,
            quiz_id,
            tally.correct,
            tally.total
        );

        Ok(submission)
    }

    pub async fn get_submission(&self, id: &ObjectId) -> AppResult<Submission> {
        self.submission_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission with id '{}' not found", id)))
    }

    pub async fn list_for_user(&self, user_id: &ObjectId) -> AppResult<Vec<Submission>> {
        self.submission_repository.find_by_user(user_id).await
    }
}
