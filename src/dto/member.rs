//! Request and response shapes of the `/v1/members` and `/v2/members` endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::search::{MemberSearchCondition, MemberTeam};
use crate::pagination::Page;

/// Query parameters accepted by the member search endpoints.
///
/// Empty values (`?ageGoe=`) deserialize as `None`.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchParams {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    /// Zero-based page number.
    #[validate(range(min = 0, message = "page must not be negative"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "size must be at least 1"))]
    pub size: Option<i64>,
}

impl MemberSearchParams {
    pub fn condition(&self) -> MemberSearchCondition {
        MemberSearchCondition {
            username: self.username.clone(),
            team_name: self.team_name.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
}

impl From<MemberTeam> for MemberTeamDto {
    fn from(row: MemberTeam) -> Self {
        Self {
            member_id: row.member_id.get(),
            username: row.username,
            age: row.age.get(),
            team_id: row.team_id.map(|id| id.get()),
            team_name: row.team_name,
        }
    }
}

/// Page envelope returned by the search endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub size: usize,
    pub number: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<S, T> From<Page<S>> for PageResponse<T>
where
    T: From<S>,
{
    fn from(page: Page<S>) -> Self {
        let total_elements = page.total_elements();
        let total_pages = page.total_pages();
        let size = page.size();
        let number = page.number();
        let first = page.is_first();
        let last = page.is_last();
        let content: Vec<T> = page.into_content().into_iter().map(T::from).collect();

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size,
            number,
            first,
            last,
        }
    }
}
