use serde::{Deserialize, Serialize};

use crate::domain::types::{Age, MemberId, TeamId, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub username: Option<String>,
    pub age: Age,
    /// Team the member belongs to, if any.
    pub team_id: Option<TeamId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMember {
    pub username: Option<String>,
    pub age: Age,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    #[must_use]
    pub fn new(username: Option<String>, age: Age, team_id: Option<TeamId>) -> Self {
        Self {
            username: username
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            age,
            team_id,
        }
    }

    /// Builds a payload from raw values, validating the age and team id.
    pub fn try_new(
        username: Option<&str>,
        age: i32,
        team_id: Option<i32>,
    ) -> Result<Self, TypeConstraintError> {
        let team_id = team_id.map(TeamId::new).transpose()?;
        Ok(Self::new(
            username.map(str::to_string),
            Age::new(age)?,
            team_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_drops_blank_username() {
        let member = NewMember::try_new(Some("   "), 10, None).unwrap();
        assert_eq!(member.username, None);

        let member = NewMember::try_new(Some(" memberA "), 10, Some(1)).unwrap();
        assert_eq!(member.username.as_deref(), Some("memberA"));
        assert_eq!(member.team_id.map(TeamId::get), Some(1));
    }

    #[test]
    fn new_member_rejects_invalid_team() {
        assert_eq!(
            NewMember::try_new(Some("memberA"), 10, Some(0)).unwrap_err(),
            TypeConstraintError::NonPositiveId
        );
    }
}
