//! Row shape produced by the `members LEFT JOIN teams` projection.

use diesel::prelude::*;

use crate::domain::search::MemberTeam as DomainMemberTeam;
use crate::domain::types::{Age, MemberId, TeamId, TypeConstraintError};

/// Columns in select order: member id, username, age, team id, team name.
///
/// Team columns are nullable because members without a team survive the left join.
#[derive(Debug, Clone, Queryable)]
pub struct MemberTeam {
    pub member_id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
}

impl TryFrom<MemberTeam> for DomainMemberTeam {
    type Error = TypeConstraintError;

    fn try_from(row: MemberTeam) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: MemberId::try_from(row.member_id)?,
            username: row.username,
            age: Age::try_from(row.age)?,
            team_id: row.team_id.map(TeamId::try_from).transpose()?,
            team_name: row.team_name,
        })
    }
}
