//! In-memory repositories. All state is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use pr_reviewer_models::{PullRequest, Team, TeamMember, User};
use tokio::sync::RwLock;

use crate::{
    PullRequestRepository, RepositoryError, TeamRepository, UserRepository, UserSnapshot,
};

const TEAM: &str = "team";
const USER: &str = "user";
const PULL_REQUEST: &str = "pull request";

fn not_found(entity: &'static str, key: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity,
        key: key.to_string(),
    }
}

fn already_exists(entity: &'static str, key: &str) -> RepositoryError {
    RepositoryError::AlreadyExists {
        entity,
        key: key.to_string(),
    }
}

fn sorted_by_key<T>(values: impl Iterator<Item = (String, T)>) -> Vec<T> {
    let mut values: Vec<(String, T)> = values.collect();
    values.sort_by(|(a, _), (b, _)| a.cmp(b));
    values.into_iter().map(|(_, value)| value).collect()
}

/// Teams keyed by name.
#[derive(Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<HashMap<String, Team>>,
}

impl InMemoryTeamRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, team: &Team) -> Result<(), RepositoryError> {
        let mut teams = self.teams.write().await;

        if teams.contains_key(&team.name) {
            return Err(already_exists(TEAM, &team.name));
        }

        teams.insert(team.name.clone(), team.clone());
        log::debug!("Stored team {} ({} members)", team.name, team.members.len());
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Team, RepositoryError> {
        self.teams
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(TEAM, name))
    }

    async fn update(&self, team: &Team) -> Result<(), RepositoryError> {
        let mut teams = self.teams.write().await;
        let stored = teams
            .get_mut(&team.name)
            .ok_or_else(|| not_found(TEAM, &team.name))?;

        stored.clone_from(team);
        Ok(())
    }

    async fn update_member_active(
        &self,
        team_name: &str,
        user_id: &str,
        is_active: bool,
    ) -> Result<(), RepositoryError> {
        let mut teams = self.teams.write().await;
        let team = teams
            .get_mut(team_name)
            .ok_or_else(|| not_found(TEAM, team_name))?;

        let member = team
            .member_mut(user_id)
            .ok_or_else(|| RepositoryError::MemberNotFound {
                team_name: team_name.to_string(),
                user_id: user_id.to_string(),
            })?;

        member.is_active = is_active;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<Team, RepositoryError> {
        self.teams
            .write()
            .await
            .remove(name)
            .ok_or_else(|| not_found(TEAM, name))
    }
}

/// Users keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(already_exists(USER, &user.id));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<User, RepositoryError> {
        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| not_found(USER, user_id))
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| not_found(USER, &user.id))?;

        stored.clone_from(user);
        Ok(())
    }

    async fn upsert_team_members(
        &self,
        team_name: &str,
        members: &[TeamMember],
    ) -> Result<Vec<UserSnapshot>, RepositoryError> {
        let mut users = self.users.write().await;
        let mut snapshots = Vec::with_capacity(members.len());

        for member in members {
            let previous = users.insert(
                member.user_id.clone(),
                User::from_member(team_name, member),
            );

            // Only the first snapshot of a repeated id holds the pre-upsert record.
            if !snapshots
                .iter()
                .any(|s: &UserSnapshot| s.user_id == member.user_id)
            {
                snapshots.push(UserSnapshot {
                    user_id: member.user_id.clone(),
                    previous,
                });
            }
        }

        log::debug!(
            "Upserted {} user(s) for team {team_name}",
            snapshots.len()
        );

        Ok(snapshots)
    }

    async fn restore(&self, snapshots: Vec<UserSnapshot>) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;

        for snapshot in snapshots {
            match snapshot.previous {
                Some(previous) => {
                    users.insert(snapshot.user_id, previous);
                }
                None => {
                    users.remove(&snapshot.user_id);
                }
            }
        }

        Ok(())
    }

    async fn set_active(&self, user_id: &str, is_active: bool) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| not_found(USER, user_id))?;

        user.is_active = is_active;
        Ok(user.clone())
    }

    async fn list_by_team(
        &self,
        team_name: &str,
        only_active: bool,
    ) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.read().await;

        Ok(sorted_by_key(
            users
                .values()
                .filter(|user| user.team_name == team_name)
                .filter(|user| !only_active || user.is_active)
                .map(|user| (user.id.clone(), user.clone())),
        ))
    }
}

/// Pull requests keyed by id.
#[derive(Default)]
pub struct InMemoryPullRequestRepository {
    pull_requests: RwLock<HashMap<String, PullRequest>>,
}

impl InMemoryPullRequestRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryPullRequestRepository {
    async fn create(&self, pr: &PullRequest) -> Result<(), RepositoryError> {
        let mut pull_requests = self.pull_requests.write().await;

        if pull_requests.contains_key(&pr.id) {
            return Err(already_exists(PULL_REQUEST, &pr.id));
        }

        pull_requests.insert(pr.id.clone(), pr.clone());
        Ok(())
    }

    async fn get(&self, pr_id: &str) -> Result<PullRequest, RepositoryError> {
        self.pull_requests
            .read()
            .await
            .get(pr_id)
            .cloned()
            .ok_or_else(|| not_found(PULL_REQUEST, pr_id))
    }

    async fn update(&self, pr: &PullRequest) -> Result<(), RepositoryError> {
        let mut pull_requests = self.pull_requests.write().await;
        let stored = pull_requests
            .get_mut(&pr.id)
            .ok_or_else(|| not_found(PULL_REQUEST, &pr.id))?;

        stored.clone_from(pr);
        Ok(())
    }

    async fn list_by_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<PullRequest>, RepositoryError> {
        let pull_requests = self.pull_requests.read().await;

        Ok(sorted_by_key(
            pull_requests
                .values()
                .filter(|pr| pr.has_reviewer(reviewer_id))
                .map(|pr| (pr.id.clone(), pr.clone())),
        ))
    }
}
