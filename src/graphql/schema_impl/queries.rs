use async_graphql::{Context, Object, ResultExt, ID};

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    graphql::helpers::parse_id,
    models::dto::{
        request::PaginationParams,
        response::{QuizDto, SubmissionDto, UserDto},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The account behind the current session.
    async fn me(&self, ctx: &Context<'_>) -> async_graphql::Result<UserDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).extend()?;

        let id = parse_id(&claims.sub, "token subject")?;
        let user = state.user_service.get_user(&id).await.extend()?;
        Ok(user.into())
    }

    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<UserDto> {
        let state = ctx.data::<AppState>()?;

        let id = parse_id(&id, "id")?;
        let user = state.user_service.get_user(&id).await.extend()?;
        Ok(user.into())
    }

    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<UserDto>> {
        let state = ctx.data::<AppState>()?;

        let users = state.user_service.get_all_users().await.extend()?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn quiz(&self, ctx: &Context<'_>, slug: String) -> async_graphql::Result<QuizDto> {
        let state = ctx.data::<AppState>()?;

        let quiz = state.quiz_service.get_quiz_by_slug(&slug).await.extend()?;
        Ok(quiz.into())
    }

    /// Newest first.
    async fn quizzes(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<Vec<QuizDto>> {
        let state = ctx.data::<AppState>()?;
        let page = PaginationParams { offset, limit };

        let (quizzes, _total) = state
            .quiz_service
            .list_quizzes(page.offset(), page.limit())
            .await
            .extend()?;

        Ok(quizzes.into_iter().map(QuizDto::from).collect())
    }

    async fn submission(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<SubmissionDto> {
        let state = ctx.data::<AppState>()?;

        let id = parse_id(&id, "id")?;
        let submission = state
            .submission_service
            .get_submission(&id)
            .await
            .extend()?;
        Ok(submission.into())
    }

    async fn submissions(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> async_graphql::Result<Vec<SubmissionDto>> {
        let state = ctx.data::<AppState>()?;

        let user_id = parse_id(&user_id, "userId")?;
        let submissions = state
            .submission_service
            .list_for_user(&user_id)
            .await
            .extend()?;

        Ok(submissions.into_iter().map(SubmissionDto::from).collect())
    }
}
