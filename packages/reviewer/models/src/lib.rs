#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Domain and wire models for the PR reviewer service.
//!
//! The domain types (`Team`, `User`, `PullRequest`) are what the storage and
//! service layers pass around. The [`api`] module holds the JSON shapes used on
//! the HTTP boundary along with conversions from the domain types.

pub mod api;
pub mod error;
pub mod pull_request;
pub mod team;
pub mod user;

pub use error::ErrorCode;
pub use pull_request::{PullRequest, PullRequestStatus};
pub use team::{Team, TeamMember};
pub use user::User;

/// Number of reviewers a pull request should end up with.
pub const DEFAULT_REVIEWER_COUNT: usize = 2;
