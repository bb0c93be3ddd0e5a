use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        member::{Member, NewMember},
        search::{MemberSearchCondition, MemberTeam},
        team::{NewTeam, Team},
        types::{MemberId, TeamId},
    },
    pagination::{Page, PageRequest},
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod member;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod search;
pub mod team;

/// Diesel-backed repository shared by every handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Read side of the member search.
///
/// All three modes apply the same conjunction of filters to
/// `members LEFT JOIN teams`; they differ in ordering, paging and how the
/// total is obtained.
pub trait MemberSearchReader {
    /// Every matching row, in no particular order.
    fn search_members(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberTeam>>;

    /// One sorted page whose total is counted over the joined query in the
    /// same read transaction.
    fn search_members_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>>;

    /// Sorted page content without any count.
    fn list_members_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Vec<MemberTeam>>;

    /// Number of members matching the filters, counted without joining `teams`.
    fn count_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize>;

    /// One sorted page whose total is only counted when the content cannot
    /// determine it. Stores that can should read both inside one snapshot.
    fn search_members_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>> {
        let content = self.list_members_page(condition, page)?;
        Page::with_deferred_total(content, page, || self.count_members(condition))
    }
}

pub trait TeamReader {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
    fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
}

pub trait MemberReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
}

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
}
