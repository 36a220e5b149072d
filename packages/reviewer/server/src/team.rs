use actix_web::{HttpResponse, web};
use pr_reviewer_models::api::{TeamDto, TeamQuery, TeamResponse};

use crate::error::{ApiError, required_param};
use crate::state::AppState;

#[allow(clippy::future_not_send)]
pub async fn add(
    body: web::Json<TeamDto>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let team = state
        .services
        .teams
        .create_team(&state.context(), body.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(TeamResponse { team: team.into() }))
}

#[allow(clippy::future_not_send)]
pub async fn get(
    query: web::Query<TeamQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let team_name = required_param(query.into_inner().team_name, "team_name")?;

    let team = state
        .services
        .teams
        .get_team(&state.context(), &team_name)
        .await?;

    Ok(HttpResponse::Ok().json(TeamDto::from(team)))
}
