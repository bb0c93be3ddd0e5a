//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::member::{Member, NewMember};
use crate::domain::search::{MemberSearchCondition, MemberTeam};
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{MemberId, TeamId};
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{MemberReader, MemberSearchReader, MemberWriter, TeamReader, TeamWriter};

mock! {
    pub Repository {}

    impl MemberSearchReader for Repository {
        fn search_members(
            &self,
            condition: &MemberSearchCondition,
        ) -> RepositoryResult<Vec<MemberTeam>>;
        fn search_members_page(
            &self,
            condition: &MemberSearchCondition,
            page: PageRequest,
        ) -> RepositoryResult<Page<MemberTeam>>;
        fn list_members_page(
            &self,
            condition: &MemberSearchCondition,
            page: PageRequest,
        ) -> RepositoryResult<Vec<MemberTeam>>;
        fn count_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize>;
    }

    impl TeamReader for Repository {
        fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
        fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
    }

    impl TeamWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    }

    impl MemberReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    }
}
