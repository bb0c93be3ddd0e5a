use serde::{Deserialize, Serialize};

use crate::domain::types::{TeamId, TeamName, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: TeamName,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    pub name: TeamName,
}

impl NewTeam {
    #[must_use]
    pub fn new(name: TeamName) -> Self {
        Self { name }
    }

    /// Validates a raw team name before building the payload.
    pub fn try_new(name: impl Into<String>) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(TeamName::new(name)?))
    }
}
