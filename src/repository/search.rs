//! Dynamic member search over `members LEFT JOIN teams`.
//!
//! Filters arrive as a [`MemberSearchCondition`]. Each present filter becomes
//! one [`MemberPredicate`], and each predicate is translated into a boxed
//! Diesel expression for the relation it is evaluated against. Boxed queries
//! AND successive `filter` calls together, so an empty predicate list leaves
//! the query without a WHERE clause.

use diesel::dsl::{IntoBoxed, LeftJoin, LeftJoinQuerySource};
use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable};
use diesel::sqlite::Sqlite;
use log::debug;

use crate::domain::search::{MemberPredicate, MemberPredicates, MemberSearchCondition, MemberTeam};
use crate::models::member_team::MemberTeam as DbMemberTeam;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MemberSearchReader};
use crate::schema::{members, teams};

type MemberTeamSource = LeftJoinQuerySource<members::table, teams::table>;
type MemberTeamQuery = IntoBoxed<'static, LeftJoin<members::table, teams::table>, Sqlite>;
type MemberQuery = IntoBoxed<'static, members::table, Sqlite>;

type JoinedPredicate =
    Box<dyn BoxableExpression<MemberTeamSource, Sqlite, SqlType = Nullable<Bool>>>;
type MemberPredicateExpr =
    Box<dyn BoxableExpression<members::table, Sqlite, SqlType = Nullable<Bool>>>;

/// Builds the queries for one search condition.
pub struct MemberSearchQuery {
    predicates: MemberPredicates,
}

impl MemberSearchQuery {
    pub fn new(condition: &MemberSearchCondition) -> Self {
        Self {
            predicates: condition.predicates(),
        }
    }

    pub fn predicates(&self) -> &MemberPredicates {
        &self.predicates
    }

    /// Filtered `members LEFT JOIN teams`, without projection or ordering.
    fn joined(&self) -> MemberTeamQuery {
        let mut query = members::table.left_join(teams::table).into_boxed();
        for predicate in &self.predicates {
            query = query.filter(joined_predicate(predicate));
        }
        query
    }

    /// Filtered `members` alone. The team-name filter becomes a subquery.
    fn unjoined(&self) -> MemberQuery {
        let mut query = members::table.into_boxed();
        for predicate in &self.predicates {
            query = query.filter(member_predicate(predicate));
        }
        query
    }

    fn load_all(&self, conn: &mut SqliteConnection) -> RepositoryResult<Vec<MemberTeam>> {
        let rows = self
            .joined()
            .select(member_team_columns())
            .load::<DbMemberTeam>(conn)?;

        into_domain(rows)
    }

    fn load_page(
        &self,
        conn: &mut SqliteConnection,
        page: PageRequest,
    ) -> RepositoryResult<Vec<MemberTeam>> {
        let query = self
            .joined()
            .select(member_team_columns())
            .order((members::username.desc(), members::id.asc()))
            .offset(to_sql_int(page.offset()))
            .limit(to_sql_int(page.limit()));

        let sql = diesel::debug_query::<Sqlite, _>(&query);
        debug!("member page query: {sql}");

        into_domain(query.load::<DbMemberTeam>(conn)?)
    }

    fn count_joined(&self, conn: &mut SqliteConnection) -> RepositoryResult<usize> {
        let total = self.joined().count().get_result::<i64>(conn)?;
        Ok(total as usize)
    }

    fn count_unjoined(&self, conn: &mut SqliteConnection) -> RepositoryResult<usize> {
        let total = self.unjoined().count().get_result::<i64>(conn)?;
        Ok(total as usize)
    }
}

fn joined_predicate(predicate: &MemberPredicate) -> JoinedPredicate {
    match predicate {
        MemberPredicate::UsernameEq(username) => {
            Box::new(members::username.eq(username.clone()).nullable())
        }
        MemberPredicate::TeamNameEq(name) => Box::new(teams::name.nullable().eq(name.clone())),
        MemberPredicate::AgeGoe(age) => Box::new(members::age.ge(*age).nullable()),
        MemberPredicate::AgeLoe(age) => Box::new(members::age.le(*age).nullable()),
    }
}

fn member_predicate(predicate: &MemberPredicate) -> MemberPredicateExpr {
    match predicate {
        MemberPredicate::UsernameEq(username) => {
            Box::new(members::username.eq(username.clone()).nullable())
        }
        MemberPredicate::TeamNameEq(name) => Box::new(
            members::team_id
                .eq_any(
                    teams::table
                        .filter(teams::name.eq(name.clone()))
                        .select(teams::id.nullable()),
                )
                .nullable(),
        ),
        MemberPredicate::AgeGoe(age) => Box::new(members::age.ge(*age).nullable()),
        MemberPredicate::AgeLoe(age) => Box::new(members::age.le(*age).nullable()),
    }
}

#[allow(clippy::type_complexity)]
fn member_team_columns() -> (
    members::id,
    members::username,
    members::age,
    diesel::dsl::Nullable<teams::id>,
    diesel::dsl::Nullable<teams::name>,
) {
    (
        members::id,
        members::username,
        members::age,
        teams::id.nullable(),
        teams::name.nullable(),
    )
}

fn to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn into_domain(rows: Vec<DbMemberTeam>) -> RepositoryResult<Vec<MemberTeam>> {
    rows.into_iter()
        .map(|row| MemberTeam::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl MemberSearchReader for DieselRepository {
    fn search_members(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberTeam>> {
        let mut conn = self.conn()?;
        MemberSearchQuery::new(condition).load_all(&mut conn)
    }

    fn search_members_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>> {
        let search = MemberSearchQuery::new(condition);
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let content = search.load_page(conn, page)?;
            let total = search.count_joined(conn)?;
            Ok(Page::new(content, page, total))
        })
    }

    fn list_members_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Vec<MemberTeam>> {
        let mut conn = self.conn()?;
        MemberSearchQuery::new(condition).load_page(&mut conn, page)
    }

    fn count_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        MemberSearchQuery::new(condition).count_unjoined(&mut conn)
    }

    /// Content and the deferred count share one read transaction.
    fn search_members_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>> {
        let search = MemberSearchQuery::new(condition);
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let content = search.load_page(conn, page)?;
            Page::with_deferred_total(content, page, || search.count_unjoined(conn))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_condition_has_no_where_clause() {
        let search = MemberSearchQuery::new(&MemberSearchCondition::new());
        let sql = diesel::debug_query::<Sqlite, _>(&search.joined()).to_string();

        assert!(search.predicates().is_empty());
        assert!(sql.contains("LEFT OUTER JOIN"), "{sql}");
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn filters_are_bound_not_inlined() {
        let condition = MemberSearchCondition::new()
            .username("x' OR '1'='1")
            .age_goe(20);
        let query = MemberSearchQuery::new(&condition).joined();
        let debug = diesel::debug_query::<Sqlite, _>(&query).to_string();
        let (sql, binds) = debug.split_once("-- binds").expect("binds are listed");

        assert!(sql.contains("WHERE"), "{sql}");
        assert!(sql.contains("AND"), "{sql}");
        assert!(!sql.contains("'1'='1"), "{sql}");
        assert!(binds.contains("'1'='1"), "{binds}");
    }

    #[test]
    fn unjoined_count_uses_team_subquery() {
        let condition = MemberSearchCondition::new().team_name("teamA");
        let query = MemberSearchQuery::new(&condition).unjoined().count();
        let sql = diesel::debug_query::<Sqlite, _>(&query).to_string();

        assert!(!sql.contains("JOIN"), "{sql}");
        assert!(sql.contains("IN (SELECT"), "{sql}");
    }
}
