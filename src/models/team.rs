//! Diesel models representing teams.

use diesel::prelude::*;

use crate::domain::team::{NewTeam as DomainNewTeam, Team as DomainTeam};
use crate::domain::types::{TeamId, TeamName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::team::Team`].
pub struct Team {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::teams)]
/// Insertable form of [`Team`].
pub struct NewTeam<'a> {
    pub name: &'a str,
}

impl TryFrom<Team> for DomainTeam {
    type Error = TypeConstraintError;

    fn try_from(team: Team) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TeamId::try_from(team.id)?,
            name: TeamName::new(team.name)?,
        })
    }
}

impl<'a> From<&'a DomainNewTeam> for NewTeam<'a> {
    fn from(team: &'a DomainNewTeam) -> Self {
        Self {
            name: team.name.as_str(),
        }
    }
}
