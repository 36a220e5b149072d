#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Storage for teams, users and pull requests.
//!
//! Each repository owns its data behind its own lock. Values are cloned on the
//! way in and on the way out, so callers never hold a reference into shared
//! state and can only change it through a repository method.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use pr_reviewer_models::{PullRequest, Team, TeamMember, User};

pub use memory::{InMemoryPullRequestRepository, InMemoryTeamRepository, InMemoryUserRepository};

/// Errors that can occur when reading or writing a repository.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// An entity with the same key is already stored.
    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: &'static str, key: String },

    /// No entity is stored under the key.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// The team exists but has no member with the given user id.
    #[error("member {user_id} not found in team {team_name}")]
    MemberNotFound { team_name: String, user_id: String },
}

impl RepositoryError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MemberNotFound { .. })
    }

    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// What a user record looked like before an upsert overwrote it.
///
/// `previous` is `None` when the upsert created the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub user_id: String,
    pub previous: Option<User>,
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// # Errors
    ///
    /// * If a team with the same name already exists
    async fn create(&self, team: &Team) -> Result<(), RepositoryError>;

    /// # Errors
    ///
    /// * If the team does not exist
    async fn get(&self, name: &str) -> Result<Team, RepositoryError>;

    /// Replaces the stored team wholesale.
    ///
    /// # Errors
    ///
    /// * If the team does not exist
    async fn update(&self, team: &Team) -> Result<(), RepositoryError>;

    /// # Errors
    ///
    /// * If the team does not exist
    /// * If the team has no member with `user_id`
    async fn update_member_active(
        &self,
        team_name: &str,
        user_id: &str,
        is_active: bool,
    ) -> Result<(), RepositoryError>;

    /// Removes a team, returning what was stored.
    ///
    /// # Errors
    ///
    /// * If the team does not exist
    async fn delete(&self, name: &str) -> Result<Team, RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// # Errors
    ///
    /// * If a user with the same id already exists
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// # Errors
    ///
    /// * If the user does not exist
    async fn get(&self, user_id: &str) -> Result<User, RepositoryError>;

    /// Replaces the stored user wholesale.
    ///
    /// # Errors
    ///
    /// * If the user does not exist
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    /// Creates or overwrites one user per member, all under a single write.
    ///
    /// Returns a snapshot per member so the caller can undo the upsert with
    /// [`UserRepository::restore`].
    ///
    /// # Errors
    ///
    /// Implementations may fail before writing anything; a failed upsert leaves
    /// the store unchanged.
    async fn upsert_team_members(
        &self,
        team_name: &str,
        members: &[TeamMember],
    ) -> Result<Vec<UserSnapshot>, RepositoryError>;

    /// Puts back the records captured by [`UserRepository::upsert_team_members`].
    ///
    /// # Errors
    ///
    /// Implementations may fail before writing anything.
    async fn restore(&self, snapshots: Vec<UserSnapshot>) -> Result<(), RepositoryError>;

    /// Sets the active flag and returns the updated user.
    ///
    /// # Errors
    ///
    /// * If the user does not exist
    async fn set_active(&self, user_id: &str, is_active: bool) -> Result<User, RepositoryError>;

    /// Lists the users registered with `team_name`, ordered by id.
    ///
    /// # Errors
    ///
    /// Implementations backed by fallible storage may fail.
    async fn list_by_team(
        &self,
        team_name: &str,
        only_active: bool,
    ) -> Result<Vec<User>, RepositoryError>;
}

#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// # Errors
    ///
    /// * If a pull request with the same id already exists
    async fn create(&self, pr: &PullRequest) -> Result<(), RepositoryError>;

    /// # Errors
    ///
    /// * If the pull request does not exist
    async fn get(&self, pr_id: &str) -> Result<PullRequest, RepositoryError>;

    /// Replaces the stored pull request wholesale.
    ///
    /// # Errors
    ///
    /// * If the pull request does not exist
    async fn update(&self, pr: &PullRequest) -> Result<(), RepositoryError>;

    /// Lists pull requests that have `reviewer_id` assigned, ordered by id.
    ///
    /// # Errors
    ///
    /// Implementations backed by fallible storage may fail.
    async fn list_by_reviewer(&self, reviewer_id: &str)
    -> Result<Vec<PullRequest>, RepositoryError>;
}

/// The three repositories the service works against.
#[derive(Clone)]
pub struct Repositories {
    pub teams: Arc<dyn TeamRepository>,
    pub users: Arc<dyn UserRepository>,
    pub pull_requests: Arc<dyn PullRequestRepository>,
}

impl Repositories {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            teams: Arc::new(InMemoryTeamRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            pull_requests: Arc::new(InMemoryPullRequestRepository::new()),
        }
    }
}

impl Default for Repositories {
    fn default() -> Self {
        Self::in_memory()
    }
}
