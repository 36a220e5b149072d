use serde::{Deserialize, Serialize};

/// A member entry inside a team.
///
/// `is_active` mirrors [`crate::User::is_active`] for the same user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, is_active: bool) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<TeamMember>,
}

impl Team {
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<TeamMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    #[must_use]
    pub fn member(&self, user_id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn member_mut(&mut self, user_id: &str) -> Option<&mut TeamMember> {
        self.members.iter_mut().find(|m| m.user_id == user_id)
    }

    /// Collapses repeated user ids so each member appears once.
    ///
    /// The last entry for an id wins and takes the position of the first one,
    /// which matches what an upsert of the same list into the user store leaves
    /// behind.
    pub fn dedup_members(&mut self) {
        let mut deduped: Vec<TeamMember> = Vec::with_capacity(self.members.len());

        for member in self.members.drain(..) {
            if let Some(existing) = deduped.iter_mut().find(|m| m.user_id == member.user_id) {
                *existing = member;
            } else {
                deduped.push(member);
            }
        }

        self.members = deduped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_members_keeps_last_entry_in_first_position() {
        let mut team = Team::new(
            "backend",
            vec![
                TeamMember::new("u1", "Alice", true),
                TeamMember::new("u2", "Bob", true),
                TeamMember::new("u1", "Alice B.", false),
            ],
        );

        team.dedup_members();

        assert_eq!(team.members.len(), 2);
        assert_eq!(team.members[0], TeamMember::new("u1", "Alice B.", false));
        assert_eq!(team.members[1].user_id, "u2");
    }

    #[test]
    fn test_member_lookup() {
        let mut team = Team::new("backend", vec![TeamMember::new("u1", "Alice", true)]);

        assert!(team.member("u1").is_some());
        assert!(team.member("u2").is_none());

        team.member_mut("u1").unwrap().is_active = false;
        assert!(!team.member("u1").unwrap().is_active);
    }
}
