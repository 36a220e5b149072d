use serde::{Deserialize, Serialize};

use crate::team::TeamMember;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Name of the team this user was last registered with.
    pub team_name: String,
    pub is_active: bool,
}

impl User {
    #[must_use]
    pub fn from_member(team_name: &str, member: &TeamMember) -> Self {
        Self {
            id: member.user_id.clone(),
            username: member.username.clone(),
            team_name: team_name.to_string(),
            is_active: member.is_active,
        }
    }
}
