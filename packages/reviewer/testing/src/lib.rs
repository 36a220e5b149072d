#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use pr_reviewer_models::ErrorCode;
use pr_reviewer_models::api::{
    CreatePullRequestRequest, ErrorResponse, GetReviewResponse, MergePullRequestRequest,
    PullRequestDto, PullRequestResponse, ReassignRequest, ReassignResponse, SetActiveRequest,
    TeamDto, TeamMemberDto, TeamResponse, UserDto, UserResponse,
};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {} {}", .error.error.code, .error.error.message)]
    Api { status: u16, error: ErrorResponse },

    #[error("unexpected response ({status}): {body}")]
    Decode { status: u16, body: String },
}

impl ClientError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|status| status.as_u16()),
            Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
        }
    }

    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { error, .. } => Some(error.error.code),
            Self::Transport(_) | Self::Decode { .. } => None,
        }
    }
}

/// Builds the JSON body of a `/team/add` request.
pub struct TeamBuilder {
    name: String,
    members: Vec<TeamMemberDto>,
}

impl TeamBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn member(self, user_id: &str, username: &str) -> Self {
        self.with_member(user_id, username, true)
    }

    #[must_use]
    pub fn inactive_member(self, user_id: &str, username: &str) -> Self {
        self.with_member(user_id, username, false)
    }

    #[must_use]
    pub fn with_member(mut self, user_id: &str, username: &str, is_active: bool) -> Self {
        self.members.push(TeamMemberDto {
            user_id: user_id.to_string(),
            username: username.to_string(),
            is_active,
        });
        self
    }

    #[must_use]
    pub fn build(self) -> TeamDto {
        TeamDto {
            team_name: self.name,
            members: self.members,
        }
    }
}

/// Typed client for the reviewer HTTP API.
pub struct ReviewerApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReviewerApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    ///
    /// Returns an error if the server cannot be reached
    pub async fn health(&self) -> Result<bool, ClientError> {
        let response = self
            .client
            .get(format!("{}/healthz", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the team
    pub async fn add_team(&self, team: &TeamDto) -> Result<TeamDto, ClientError> {
        let response: TeamResponse = self.post("/team/add", team).await?;
        Ok(response.team)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the team does not exist
    pub async fn get_team(&self, team_name: &str) -> Result<TeamDto, ClientError> {
        self.get("/team/get", &[("team_name", team_name)]).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the user does not exist
    pub async fn set_is_active(&self, user_id: &str, is_active: bool) -> Result<UserDto, ClientError> {
        let response: UserResponse = self
            .post(
                "/users/setIsActive",
                &SetActiveRequest {
                    user_id: user_id.to_string(),
                    is_active,
                },
            )
            .await?;
        Ok(response.user)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the user does not exist
    pub async fn get_review(&self, user_id: &str) -> Result<GetReviewResponse, ClientError> {
        self.get("/users/getReview", &[("user_id", user_id)]).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the pull request
    pub async fn create_pr(
        &self,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequestDto, ClientError> {
        let response: PullRequestResponse = self
            .post(
                "/pullRequest/create",
                &CreatePullRequestRequest {
                    pull_request_id: pull_request_id.to_string(),
                    pull_request_name: pull_request_name.to_string(),
                    author_id: author_id.to_string(),
                },
            )
            .await?;
        Ok(response.pr)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the pull request does not exist
    pub async fn merge_pr(&self, pull_request_id: &str) -> Result<PullRequestDto, ClientError> {
        let response: PullRequestResponse = self
            .post(
                "/pullRequest/merge",
                &MergePullRequestRequest {
                    pull_request_id: pull_request_id.to_string(),
                },
            )
            .await?;
        Ok(response.pr)
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the reviewer cannot be replaced
    pub async fn reassign(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<ReassignResponse, ClientError> {
        self.post(
            "/pullRequest/reassign",
            &ReassignRequest {
                pull_request_id: pull_request_id.to_string(),
                old_user_id: old_user_id.to_string(),
            },
        )
        .await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;

        decode(response).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status().as_u16();
    let body = response.text().await?;

    if (200..300).contains(&status) {
        return serde_json::from_str(&body).map_err(|_| ClientError::Decode { status, body });
    }

    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => Err(ClientError::Api { status, error }),
        Err(_) => Err(ClientError::Decode { status, body }),
    }
}
