use std::sync::Arc;

use pr_reviewer_models::Team;
use pr_reviewer_store::{TeamRepository, UserRepository, UserSnapshot};
use tokio::sync::Mutex;

use crate::{RequestContext, ServiceError};

pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserRepository>,
    coordination: Arc<Mutex<()>>,
}

impl TeamService {
    /// `coordination` must be the same lock the [`crate::UserService`] holds, so
    /// writes spanning the team and user stores never interleave.
    #[must_use]
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserRepository>,
        coordination: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            teams,
            users,
            coordination,
        }
    }

    /// Creates a team and upserts each of its members as a user.
    ///
    /// Either both stores end up updated or neither does: if the member
    /// upsert fails after the team was stored, the team is removed again and
    /// overwritten users are restored before the error is returned.
    ///
    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If a team with the same name already exists
    /// * If the user store rejects the members
    pub async fn create_team(
        &self,
        ctx: &RequestContext,
        mut team: Team,
    ) -> Result<Team, ServiceError> {
        ctx.ensure_active()?;
        team.dedup_members();

        let _guard = self.coordination.lock().await;

        self.teams.create(&team).await.map_err(|e| {
            if e.is_already_exists() {
                log::warn!("Team {} already exists", team.name);
                ServiceError::TeamExists(team.name.clone())
            } else {
                e.into()
            }
        })?;

        let snapshots = match self
            .users
            .upsert_team_members(&team.name, &team.members)
            .await
        {
            Ok(snapshots) => snapshots,
            Err(e) => {
                log::error!("Failed to upsert members of team {}: {e}", team.name);
                self.rollback(&team.name, Vec::new()).await;
                return Err(e.into());
            }
        };

        match self.teams.get(&team.name).await {
            Ok(created) => {
                log::info!(
                    "Created team {} with {} member(s)",
                    created.name,
                    created.members.len()
                );
                Ok(created)
            }
            Err(e) => {
                log::error!("Team {} vanished right after creation: {e}", team.name);
                self.rollback(&team.name, snapshots).await;
                Err(e.into())
            }
        }
    }

    async fn rollback(&self, team_name: &str, snapshots: Vec<UserSnapshot>) {
        if let Err(e) = self.users.restore(snapshots).await {
            log::error!("Failed to restore users while rolling back team {team_name}: {e}");
        }
        if let Err(e) = self.teams.delete(team_name).await {
            log::error!("Failed to remove team {team_name} during rollback: {e}");
        }
    }

    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If the team does not exist
    pub async fn get_team(&self, ctx: &RequestContext, name: &str) -> Result<Team, ServiceError> {
        ctx.ensure_active()?;

        self.teams.get(name).await.map_err(|e| {
            if e.is_not_found() {
                ServiceError::not_found("team not found")
            } else {
                e.into()
            }
        })
    }
}
