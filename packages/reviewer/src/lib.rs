#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Reviewer assignment service.
//!
//! Teams are created together with their members, pull requests are opened
//! with up to two randomly picked active teammates of the author, and a
//! reviewer can later be swapped for another active member of their own
//! team. Merging is idempotent and freezes the reviewer list.

use std::sync::Arc;

use pr_reviewer_store::Repositories;
use tokio::sync::Mutex;

pub mod context;
pub mod error;
pub mod pull_request;
pub mod selector;
pub mod team;
pub mod user;

pub use context::RequestContext;
pub use error::{ErrorKind, ServiceError};
pub use pull_request::PullRequestService;
pub use selector::ReviewerSelector;
pub use team::TeamService;
pub use user::UserService;

/// The three services wired against one set of repositories.
pub struct Services {
    pub teams: TeamService,
    pub users: UserService,
    pub pull_requests: PullRequestService,
}

impl Services {
    #[must_use]
    pub fn new(repositories: Repositories, selector: ReviewerSelector) -> Self {
        let coordination = Arc::new(Mutex::new(()));
        let Repositories {
            teams,
            users,
            pull_requests,
        } = repositories;

        Self {
            teams: TeamService::new(teams.clone(), users.clone(), coordination.clone()),
            users: UserService::new(users.clone(), teams.clone(), coordination),
            pull_requests: PullRequestService::new(pull_requests, users, teams, Arc::new(selector)),
        }
    }

    /// Services backed by fresh in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory(), ReviewerSelector::new())
    }
}
