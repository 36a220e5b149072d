use std::sync::Arc;

use pr_reviewer_models::User;
use pr_reviewer_store::{TeamRepository, UserRepository};
use tokio::sync::Mutex;

use crate::{RequestContext, ServiceError};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
    coordination: Arc<Mutex<()>>,
}

impl UserService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        teams: Arc<dyn TeamRepository>,
        coordination: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            users,
            teams,
            coordination,
        }
    }

    /// Sets a user's active flag and mirrors it into their team's member list.
    ///
    /// A missing team or member on the second write is reported as
    /// [`ServiceError::Desync`]. The user record keeps the new flag in that
    /// case; nothing tries to repair the team side.
    ///
    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If the user does not exist
    /// * If the user's team or team member entry is missing
    pub async fn set_user_active(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        is_active: bool,
    ) -> Result<User, ServiceError> {
        ctx.ensure_active()?;

        let _guard = self.coordination.lock().await;

        let user = self.users.get(user_id).await.map_err(user_not_found)?;
        let updated = self
            .users
            .set_active(user_id, is_active)
            .await
            .map_err(user_not_found)?;

        if let Err(source) = self
            .teams
            .update_member_active(&user.team_name, user_id, is_active)
            .await
        {
            log::error!(
                "User {user_id} and team {} are out of sync: {source}",
                user.team_name
            );
            return Err(ServiceError::Desync {
                user_id: user_id.to_string(),
                source,
            });
        }

        log::info!("Set user {user_id} active={is_active}");

        Ok(updated)
    }

    /// # Errors
    ///
    /// * If the context is no longer active
    /// * If the user does not exist
    pub async fn get_user(&self, ctx: &RequestContext, user_id: &str) -> Result<User, ServiceError> {
        ctx.ensure_active()?;

        self.users.get(user_id).await.map_err(user_not_found)
    }
}

fn user_not_found(e: pr_reviewer_store::RepositoryError) -> ServiceError {
    if e.is_not_found() {
        ServiceError::not_found("user not found")
    } else {
        e.into()
    }
}

#[cfg(test)]
mod tests {
    use pr_reviewer_models::{Team, TeamMember};
    use pr_reviewer_store::{InMemoryTeamRepository, InMemoryUserRepository, RepositoryError};

    use super::*;
    use crate::TeamService;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        teams: Arc<InMemoryTeamRepository>,
        team_service: TeamService,
        user_service: UserService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let teams = Arc::new(InMemoryTeamRepository::new());
        let coordination = Arc::new(Mutex::new(()));

        Fixture {
            team_service: TeamService::new(teams.clone(), users.clone(), coordination.clone()),
            user_service: UserService::new(users.clone(), teams.clone(), coordination),
            users,
            teams,
        }
    }

    async fn assert_in_sync(fixture: &Fixture, user_id: &str) {
        let user = fixture.users.get(user_id).await.unwrap();
        let team = fixture.teams.get(&user.team_name).await.unwrap();

        assert_eq!(user.is_active, team.member(user_id).unwrap().is_active);
    }

    #[test_log::test(tokio::test)]
    async fn test_set_user_active_updates_both_records() {
        let fixture = fixture();
        let ctx = RequestContext::background();
        fixture
            .team_service
            .create_team(
                &ctx,
                Team::new(
                    "backend",
                    vec![
                        TeamMember::new("u1", "Alice", true),
                        TeamMember::new("u2", "Bob", true),
                    ],
                ),
            )
            .await
            .unwrap();

        let bob = fixture
            .user_service
            .set_user_active(&ctx, "u2", false)
            .await
            .unwrap();

        assert!(!bob.is_active);
        assert_eq!(bob.team_name, "backend");
        assert_in_sync(&fixture, "u2").await;
        assert_in_sync(&fixture, "u1").await;

        fixture
            .user_service
            .set_user_active(&ctx, "u2", true)
            .await
            .unwrap();
        assert_in_sync(&fixture, "u2").await;
    }

    #[test_log::test(tokio::test)]
    async fn test_set_user_active_unknown_user() {
        let fixture = fixture();

        let err = fixture
            .user_service
            .set_user_active(&RequestContext::background(), "ghost", true)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_team_member_surfaces_desync() {
        let fixture = fixture();
        fixture
            .users
            .upsert_team_members("backend", &[TeamMember::new("u1", "Alice", true)])
            .await
            .unwrap();
        fixture
            .teams
            .create(&Team::new("backend", vec![]))
            .await
            .unwrap();

        let err = fixture
            .user_service
            .set_user_active(&RequestContext::background(), "u1", false)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Desync {
                source: RepositoryError::MemberNotFound { .. },
                ..
            }
        ));
        assert_eq!(err.code(), pr_reviewer_models::ErrorCode::NotFound);
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_team_surfaces_desync() {
        let fixture = fixture();
        fixture
            .users
            .upsert_team_members("backend", &[TeamMember::new("u1", "Alice", true)])
            .await
            .unwrap();

        let err = fixture
            .user_service
            .set_user_active(&RequestContext::background(), "u1", false)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Desync {
                source: RepositoryError::NotFound { .. },
                ..
            }
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_get_user() {
        let fixture = fixture();
        let ctx = RequestContext::background();
        fixture
            .team_service
            .create_team(
                &ctx,
                Team::new("backend", vec![TeamMember::new("u1", "Alice", true)]),
            )
            .await
            .unwrap();

        let alice = fixture.user_service.get_user(&ctx, "u1").await.unwrap();
        assert_eq!(alice.username, "Alice");

        assert!(matches!(
            fixture.user_service.get_user(&ctx, "u2").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
