use actix_web::{HttpResponse, web};
use pr_reviewer_models::api::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestResponse, ReassignRequest,
    ReassignResponse,
};

use crate::error::ApiError;
use crate::state::AppState;

#[allow(clippy::future_not_send)]
pub async fn create(
    body: web::Json<CreatePullRequestRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let CreatePullRequestRequest {
        pull_request_id,
        pull_request_name,
        author_id,
    } = body.into_inner();

    let pr = state
        .services
        .pull_requests
        .create_pr(
            &state.context(),
            &pull_request_id,
            &pull_request_name,
            &author_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(PullRequestResponse { pr: pr.into() }))
}

#[allow(clippy::future_not_send)]
pub async fn merge(
    body: web::Json<MergePullRequestRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let pr = state
        .services
        .pull_requests
        .merge_pr(&state.context(), &body.pull_request_id)
        .await?;

    Ok(HttpResponse::Ok().json(PullRequestResponse { pr: pr.into() }))
}

#[allow(clippy::future_not_send)]
pub async fn reassign(
    body: web::Json<ReassignRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let (pr, replaced_by) = state
        .services
        .pull_requests
        .reassign_reviewer(&state.context(), &body.pull_request_id, &body.old_user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ReassignResponse {
        pr: pr.into(),
        replaced_by,
    }))
}
