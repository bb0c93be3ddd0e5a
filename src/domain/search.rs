//! Search criteria and the read-only projection returned by member searches.

use serde::{Deserialize, Serialize};

use crate::domain::types::{Age, MemberId, TeamId};

/// Optional filters applied to a member search.
///
/// Every field is independent. Blank strings and missing bounds do not
/// restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    /// Inclusive lower age bound.
    pub age_goe: Option<i32>,
    /// Inclusive upper age bound.
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Collects the predicates implied by the present filters.
    pub fn predicates(&self) -> MemberPredicates {
        MemberPredicates::from_condition(self)
    }
}

/// A single restriction derived from a [`MemberSearchCondition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPredicate {
    UsernameEq(String),
    TeamNameEq(String),
    AgeGoe(i32),
    AgeLoe(i32),
}

/// Conjunction of predicates. An empty set matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPredicates(Vec<MemberPredicate>);

impl MemberPredicates {
    pub fn from_condition(condition: &MemberSearchCondition) -> Self {
        let mut predicates = Self::default();

        if let Some(username) = non_blank(condition.username.as_deref()) {
            predicates.push(MemberPredicate::UsernameEq(username.to_string()));
        }
        if let Some(team_name) = non_blank(condition.team_name.as_deref()) {
            predicates.push(MemberPredicate::TeamNameEq(team_name.to_string()));
        }
        if let Some(age) = condition.age_goe {
            predicates.push(MemberPredicate::AgeGoe(age));
        }
        if let Some(age) = condition.age_loe {
            predicates.push(MemberPredicate::AgeLoe(age));
        }

        predicates
    }

    pub fn push(&mut self, predicate: MemberPredicate) {
        self.0.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberPredicate> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a MemberPredicates {
    type Item = &'a MemberPredicate;
    type IntoIter = std::slice::Iter<'a, MemberPredicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Returns the value unchanged when it has at least one non-whitespace character.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Denormalized member row joined with its (optional) team.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MemberTeam {
    pub member_id: MemberId,
    pub username: Option<String>,
    pub age: Age,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}
