use async_graphql::{Context, Object, ResultExt};

use crate::{
    app_state::AppState,
    auth::{optional_claims_from_context, require_same_user},
    graphql::helpers::set_session_cookie,
    models::dto::request::{
        AnswerInput, CreateQuizRequest, LoginRequest, QuestionInput, RegisterRequest,
        SubmitQuizRequest,
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create an account and start a session. Returns the session token.
    async fn register(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> async_graphql::Result<String> {
        let state = ctx.data::<AppState>()?;

        let issued = state
            .user_service
            .register(RegisterRequest {
                username,
                email,
                password,
            })
            .await
            .extend()?;

        set_session_cookie(ctx, &state.config, &issued.token);
        Ok(issued.token)
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<String> {
        let state = ctx.data::<AppState>()?;

        let issued = state
            .user_service
            .login(LoginRequest { email, password })
            .await
            .extend()?;

        set_session_cookie(ctx, &state.config, &issued.token);
        Ok(issued.token)
    }

    /// Returns the slug allocated for the new quiz.
    async fn create_quiz(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: Option<String>,
        user_id: String,
        questions: Vec<QuestionInput>,
    ) -> async_graphql::Result<String> {
        let state = ctx.data::<AppState>()?;
        let claims = optional_claims_from_context(ctx);

        require_same_user(claims.as_ref(), &user_id).extend()?;

        let quiz = state
            .quiz_service
            .create_quiz(CreateQuizRequest {
                title,
                description,
                user_id,
                questions,
            })
            .await
            .extend()?;

        Ok(quiz.slug)
    }

    /// Returns the id of the stored submission.
    async fn submit_quiz(
        &self,
        ctx: &Context<'_>,
        answers: Vec<AnswerInput>,
        quiz_id: String,
        user_id: String,
    ) -> async_graphql::Result<String> {
        let state = ctx.data::<AppState>()?;
        let claims = optional_claims_from_context(ctx);

        require_same_user(claims.as_ref(), &user_id).extend()?;

        let submission = state
            .submission_service
            .submit(SubmitQuizRequest {
                answers,
                quiz_id,
                user_id,
            })
            .await
            .extend()?;

        Ok(submission.id.to_hex())
    }
}
