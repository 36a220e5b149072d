use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use pr_reviewer_models::{DEFAULT_REVIEWER_COUNT, PullRequest, User};
use pr_reviewer_store::{PullRequestRepository, RepositoryError, TeamRepository, UserRepository};
use tokio::sync::Mutex;

use crate::{RequestContext, ReviewerSelector, ServiceError};

/// Pull request lifecycle: creation with reviewer assignment, merge, and
/// reviewer reassignment.
///
/// Read-modify-write sequences on pull requests (merge, reassign) are
/// serialized so two concurrent merges cannot stamp different `merged_at`
/// values.
pub struct PullRequestService {
    pull_requests: Arc<dyn PullRequestRepository>,
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
    selector: Arc<ReviewerSelector>,
    write_gate: Mutex<()>,
}

impl PullRequestService {
    #[must_use]
    pub fn new(
        pull_requests: Arc<dyn PullRequestRepository>,
        users: Arc<dyn UserRepository>,
        teams: Arc<dyn TeamRepository>,
        selector: Arc<ReviewerSelector>,
    ) -> Self {
        Self {
            pull_requests,
            users,
            teams,
            selector,
            write_gate: Mutex::new(()),
        }
    }

    /// Opens a pull request and assigns up to two active reviewers from the
    /// author's team, never the author.
    ///
    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If a pull request with `pr_id` already exists
    /// * If the author or the author's team does not exist
    pub async fn create_pr(
        &self,
        ctx: &RequestContext,
        pr_id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest, ServiceError> {
        ctx.ensure_active()?;

        match self.pull_requests.get(pr_id).await {
            Ok(_) => return Err(ServiceError::PrExists(pr_id.to_string())),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let author = self
            .users
            .get(author_id)
            .await
            .map_err(|e| not_found(e, "author not found"))?;

        self.teams
            .get(&author.team_name)
            .await
            .map_err(|e| not_found(e, "team not found"))?;

        let team_members = self.users.list_by_team(&author.team_name, true).await?;
        let reviewers =
            self.selector
                .select_reviewers(&team_members, Some(author_id), DEFAULT_REVIEWER_COUNT);

        let pr = PullRequest::open(pr_id, name, author_id, reviewers, Utc::now());

        self.pull_requests.create(&pr).await.map_err(|e| {
            if e.is_already_exists() {
                ServiceError::PrExists(pr_id.to_string())
            } else {
                e.into()
            }
        })?;

        log::info!(
            "Created PR {pr_id} by {author_id} with reviewers {:?}",
            pr.assigned_reviewers
        );

        Ok(pr)
    }

    /// Marks a pull request as merged. Merging an already merged pull request
    /// returns it unchanged.
    ///
    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If the pull request does not exist
    pub async fn merge_pr(
        &self,
        ctx: &RequestContext,
        pr_id: &str,
    ) -> Result<PullRequest, ServiceError> {
        ctx.ensure_active()?;

        let _guard = self.write_gate.lock().await;

        let mut pr = self.get_pr(pr_id).await?;

        if !pr.merge(Utc::now()) {
            log::debug!("PR {pr_id} is already merged");
            return Ok(pr);
        }

        self.pull_requests.update(&pr).await?;
        log::info!("Merged PR {pr_id}");

        Ok(pr)
    }

    /// Replaces `old_reviewer_id` with a random active member of the old
    /// reviewer's team. The author and the replaced reviewer are never
    /// picked; a reviewer already assigned to the pull request may be.
    ///
    /// Returns the updated pull request and the id of the new reviewer.
    ///
    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If the pull request or the old reviewer does not exist
    /// * If the pull request is merged
    /// * If `old_reviewer_id` is not assigned to the pull request
    /// * If there is no eligible replacement
    pub async fn reassign_reviewer(
        &self,
        ctx: &RequestContext,
        pr_id: &str,
        old_reviewer_id: &str,
    ) -> Result<(PullRequest, String), ServiceError> {
        ctx.ensure_active()?;

        let _guard = self.write_gate.lock().await;

        let mut pr = self.get_pr(pr_id).await?;

        if pr.is_merged() {
            log::warn!("Refusing to reassign reviewer on merged PR {pr_id}");
            return Err(ServiceError::PrMerged(pr_id.to_string()));
        }

        if !pr.has_reviewer(old_reviewer_id) {
            return Err(ServiceError::NotAssigned {
                pr_id: pr_id.to_string(),
                reviewer_id: old_reviewer_id.to_string(),
            });
        }

        let old_reviewer = self
            .users
            .get(old_reviewer_id)
            .await
            .map_err(|e| not_found(e, "reviewer not found"))?;

        let team_members = self
            .users
            .list_by_team(&old_reviewer.team_name, true)
            .await?;

        let excluded: HashSet<&str> = [old_reviewer_id, pr.author_id.as_str()].into();
        let candidates: Vec<User> = team_members
            .into_iter()
            .filter(|member| member.is_active && !excluded.contains(member.id.as_str()))
            .collect();

        if candidates.is_empty() {
            log::warn!(
                "No replacement for {old_reviewer_id} on PR {pr_id} in team {}",
                old_reviewer.team_name
            );
            return Err(ServiceError::NoCandidate(old_reviewer.team_name));
        }

        let Some(new_reviewer_id) = self
            .selector
            .select_reviewers(&candidates, None, 1)
            .into_iter()
            .next()
        else {
            return Err(ServiceError::NoCandidate(old_reviewer.team_name));
        };

        pr.replace_reviewer(old_reviewer_id, &new_reviewer_id);
        self.pull_requests.update(&pr).await?;

        log::info!("Reassigned PR {pr_id}: {old_reviewer_id} -> {new_reviewer_id}");

        Ok((pr, new_reviewer_id))
    }

    /// Lists the pull requests that have `user_id` assigned as a reviewer.
    ///
    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If the user does not exist
    pub async fn get_reviews_for_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<Vec<PullRequest>, ServiceError> {
        ctx.ensure_active()?;

        self.users
            .get(user_id)
            .await
            .map_err(|e| not_found(e, "user not found"))?;

        Ok(self.pull_requests.list_by_reviewer(user_id).await?)
    }

    async fn get_pr(&self, pr_id: &str) -> Result<PullRequest, ServiceError> {
        self.pull_requests
            .get(pr_id)
            .await
            .map_err(|e| not_found(e, "PR not found"))
    }
}

fn not_found(e: RepositoryError, message: &str) -> ServiceError {
    if e.is_not_found() {
        ServiceError::not_found(message)
    } else {
        e.into()
    }
}
