//! JSON request and response bodies of the HTTP API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{ErrorCode, PullRequest, PullRequestStatus, Team, TeamMember, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberDto {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDto {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub team: TeamDto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamQuery {
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserDto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
    pub need_more_reviewers: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "mergedAt", default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShortDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestResponse {
    pub pr: PullRequestDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignResponse {
    pub pr: PullRequestDto,
    pub replaced_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReviewResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }
}

/// Formats a timestamp as RFC 3339 with whole seconds, e.g. `2024-01-15T10:30:00Z`.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<TeamMember> for TeamMemberDto {
    fn from(value: TeamMember) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            is_active: value.is_active,
        }
    }
}

impl From<TeamMemberDto> for TeamMember {
    fn from(value: TeamMemberDto) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            is_active: value.is_active,
        }
    }
}

impl From<Team> for TeamDto {
    fn from(value: Team) -> Self {
        Self {
            team_name: value.name,
            members: value.members.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<TeamDto> for Team {
    fn from(value: TeamDto) -> Self {
        Self {
            name: value.team_name,
            members: value.members.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            user_id: value.id,
            username: value.username,
            team_name: value.team_name,
            is_active: value.is_active,
        }
    }
}

impl From<PullRequest> for PullRequestDto {
    fn from(value: PullRequest) -> Self {
        Self {
            created_at: Some(format_timestamp(&value.created_at)),
            merged_at: value.merged_at.as_ref().map(format_timestamp),
            pull_request_id: value.id,
            pull_request_name: value.name,
            author_id: value.author_id,
            status: value.status,
            assigned_reviewers: value.assigned_reviewers,
            need_more_reviewers: value.need_more_reviewers,
        }
    }
}

impl From<PullRequest> for PullRequestShortDto {
    fn from(value: PullRequest) -> Self {
        Self {
            pull_request_id: value.id,
            pull_request_name: value.name,
            author_id: value.author_id,
            status: value.status,
        }
    }
}
