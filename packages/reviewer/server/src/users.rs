use actix_web::{HttpResponse, web};
use pr_reviewer_models::api::{
    GetReviewResponse, PullRequestShortDto, SetActiveRequest, UserQuery, UserResponse,
};

use crate::error::{ApiError, required_param};
use crate::state::AppState;

#[allow(clippy::future_not_send)]
pub async fn set_is_active(
    body: web::Json<SetActiveRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let SetActiveRequest { user_id, is_active } = body.into_inner();

    let user = state
        .services
        .users
        .set_user_active(&state.context(), &user_id, is_active)
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse { user: user.into() }))
}

#[allow(clippy::future_not_send)]
pub async fn get_review(
    query: web::Query<UserQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = required_param(query.into_inner().user_id, "user_id")?;

    let pull_requests = state
        .services
        .pull_requests
        .get_reviews_for_user(&state.context(), &user_id)
        .await?;

    Ok(HttpResponse::Ok().json(GetReviewResponse {
        user_id,
        pull_requests: pull_requests
            .into_iter()
            .map(PullRequestShortDto::from)
            .collect(),
    }))
}
