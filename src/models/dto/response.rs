use async_graphql::{ComplexObject, Context, ResultExt, SimpleObject, ID};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::{
    app_state::AppState,
    models::domain::{Question, Quiz, Submission, User},
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(name = "User")]
pub struct UserDto {
    pub id: ID,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: ID(user.id.to_hex()),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(name = "Quiz", complex)]
pub struct QuizDto {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub user_id: ID,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[graphql(skip)]
    #[serde(skip)]
    pub object_id: ObjectId,
}

#[ComplexObject]
impl QuizDto {
    /// Questions in display order. Correct answers are never exposed.
    async fn questions(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<QuestionDto>> {
        let state = ctx.data::<AppState>()?;
        let questions = state
            .quiz_service
            .list_questions(&self.object_id)
            .await
            .extend()?;
        Ok(questions.into_iter().map(QuestionDto::from).collect())
    }
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: ID(quiz.id.to_hex()),
            title: quiz.title,
            description: quiz.description,
            user_id: ID(quiz.user_id.to_hex()),
            slug: quiz.slug,
            created_at: quiz.created_at,
            object_id: quiz.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(name = "Question")]
pub struct QuestionDto {
    pub id: ID,
    pub title: String,
    pub order: i32,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: ID(question.id.to_hex()),
            title: question.title,
            order: question.order,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(name = "Submission")]
pub struct SubmissionDto {
    pub id: ID,
    pub user_id: ID,
    pub quiz_id: ID,
    pub score: f64,
    pub correct_count: i32,
    pub total_count: i32,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionDto {
    fn from(submission: Submission) -> Self {
        SubmissionDto {
            id: ID(submission.id.to_hex()),
            user_id: ID(submission.user_id.to_hex()),
            quiz_id: ID(submission.quiz_id.to_hex()),
            score: submission.score,
            correct_count: submission.correct_count,
            total_count: submission.total_count,
            submitted_at: submission.submitted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
