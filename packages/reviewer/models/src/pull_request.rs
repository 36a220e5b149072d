use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_REVIEWER_COUNT;

/// Lifecycle state of a pull request. `Merged` is terminal.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    #[default]
    Open,
    Merged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
    pub need_more_reviewers: bool,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Creates an open pull request with the given reviewers.
    #[must_use]
    pub fn open(
        id: impl Into<String>,
        name: impl Into<String>,
        author_id: impl Into<String>,
        assigned_reviewers: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let need_more_reviewers = assigned_reviewers.len() < DEFAULT_REVIEWER_COUNT;

        Self {
            id: id.into(),
            name: name.into(),
            author_id: author_id.into(),
            status: PullRequestStatus::Open,
            assigned_reviewers,
            need_more_reviewers,
            created_at,
            merged_at: None,
        }
    }

    #[must_use]
    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|id| id == user_id)
    }

    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    /// Replaces the first occurrence of `old_reviewer` in place.
    ///
    /// Returns `false` if `old_reviewer` is not assigned.
    pub fn replace_reviewer(&mut self, old_reviewer: &str, new_reviewer: &str) -> bool {
        let Some(slot) = self
            .assigned_reviewers
            .iter_mut()
            .find(|id| id.as_str() == old_reviewer)
        else {
            return false;
        };

        new_reviewer.clone_into(slot);
        self.refresh_need_more_reviewers();
        true
    }

    /// Moves the pull request to `Merged`, stamping `merged_at`.
    ///
    /// Does nothing and returns `false` if it was already merged.
    pub fn merge(&mut self, merged_at: DateTime<Utc>) -> bool {
        if self.is_merged() {
            return false;
        }

        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(merged_at);
        true
    }

    fn refresh_need_more_reviewers(&mut self) {
        self.need_more_reviewers = self.assigned_reviewers.len() < DEFAULT_REVIEWER_COUNT;
    }
}
