use member_search::domain::member::NewMember;
use member_search::domain::search::{MemberSearchCondition, MemberTeam};
use member_search::domain::team::NewTeam;
use member_search::domain::types::{MemberId, TeamId};
use member_search::pagination::PageRequest;
use member_search::repository::errors::RepositoryError;
use member_search::repository::{
    MemberReader, MemberSearchReader, MemberWriter, TeamReader, TeamWriter,
};

mod common;

fn usernames(rows: &[MemberTeam]) -> Vec<&str> {
    rows.iter()
        .map(|row| row.username.as_deref().unwrap_or("<none>"))
        .collect()
}

#[test]
fn test_team_and_member_repository_crud() {
    let test_db = common::TestDb::new("test_team_and_member_repository_crud.db");
    let repo = test_db.repo();

    let team = repo
        .create_team(&NewTeam::try_new("teamA").unwrap())
        .unwrap();
    assert_eq!(team.name.as_str(), "teamA");

    let found = repo.get_team_by_id(team.id).unwrap().unwrap();
    assert_eq!(found, team);
    assert!(repo.get_team_by_id(TeamId::new(999).unwrap()).unwrap().is_none());
    assert_eq!(repo.list_teams().unwrap(), vec![team.clone()]);

    let member = repo
        .create_member(&NewMember::try_new(Some("memberA"), 10, Some(team.id.get())).unwrap())
        .unwrap();
    assert_eq!(member.username.as_deref(), Some("memberA"));
    assert_eq!(member.team_id, Some(team.id));

    let loaded = repo.get_member_by_id(member.id).unwrap().unwrap();
    assert_eq!(loaded, member);
    assert!(
        repo.get_member_by_id(MemberId::new(999).unwrap())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_member_with_unknown_team_violates_foreign_key() {
    let test_db = common::TestDb::new("test_member_with_unknown_team.db");
    let repo = test_db.repo();

    let result = repo.create_member(&NewMember::try_new(Some("ghost"), 1, Some(42)).unwrap());

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation(_) | RepositoryError::DatabaseError(_))
    ));
    assert!(
        repo.search_members(&MemberSearchCondition::new())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_search_filters_on_sample_dataset() {
    let test_db = common::TestDb::new("test_search_filters_on_sample_dataset.db");
    let repo = test_db.repo();
    common::seed_members(&repo);

    let older = repo
        .search_members(&MemberSearchCondition::new().age_goe(20))
        .unwrap();
    assert_eq!(older.len(), 3);

    let between = repo
        .search_members(&MemberSearchCondition::new().age_goe(20).age_loe(30))
        .unwrap();
    let mut names = usernames(&between);
    names.sort();
    assert_eq!(names, vec!["memberB", "memberC"]);

    let team_a = repo
        .search_members(&MemberSearchCondition::new().team_name("teamA"))
        .unwrap();
    assert_eq!(team_a.len(), 2);
    assert!(
        team_a
            .iter()
            .all(|row| row.team_name.as_deref() == Some("teamA"))
    );

    let by_name = repo
        .search_members(&MemberSearchCondition::new().username("memberC"))
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].age.get(), 30);
    assert_eq!(by_name[0].team_name.as_deref(), Some("teamB"));
}

#[test]
fn test_empty_condition_returns_everything_including_members_without_team() {
    let test_db = common::TestDb::new("test_empty_condition_returns_everything.db");
    let repo = test_db.repo();
    common::seed_members(&repo);
    repo.create_member(&NewMember::try_new(Some("loner"), 50, None).unwrap())
        .unwrap();

    let blank = MemberSearchCondition {
        username: Some("  ".to_string()),
        team_name: Some(String::new()),
        age_goe: None,
        age_loe: None,
    };

    let all = repo.search_members(&MemberSearchCondition::new()).unwrap();
    let with_blanks = repo.search_members(&blank).unwrap();

    assert_eq!(all.len(), 5);
    assert_eq!(with_blanks.len(), all.len());

    let loner = all
        .iter()
        .find(|row| row.username.as_deref() == Some("loner"))
        .unwrap();
    assert_eq!(loner.team_id, None);
    assert_eq!(loner.team_name, None);
}

#[test]
fn test_adding_filters_never_grows_the_result() {
    let test_db = common::TestDb::new("test_adding_filters_never_grows_the_result.db");
    let repo = test_db.repo();
    common::seed_members(&repo);

    let chains: Vec<Vec<MemberSearchCondition>> = vec![
        vec![
            MemberSearchCondition::new(),
            MemberSearchCondition::new().age_goe(20),
            MemberSearchCondition::new().age_goe(20).age_loe(30),
            MemberSearchCondition::new()
                .age_goe(20)
                .age_loe(30)
                .team_name("teamB"),
            MemberSearchCondition::new()
                .age_goe(20)
                .age_loe(30)
                .team_name("teamB")
                .username("memberC"),
        ],
        vec![
            MemberSearchCondition::new(),
            MemberSearchCondition::new().team_name("teamA"),
            MemberSearchCondition::new().team_name("teamA").username("memberD"),
        ],
    ];

    for chain in chains {
        let sizes: Vec<usize> = chain
            .iter()
            .map(|condition| repo.search_members(condition).unwrap().len())
            .collect();
        assert!(
            sizes.windows(2).all(|pair| pair[1] <= pair[0]),
            "sizes grew: {sizes:?}"
        );
    }
}

#[test]
fn test_simple_page_sorts_by_username_desc_and_counts_all() {
    let test_db = common::TestDb::new("test_simple_page_sorts.db");
    let repo = test_db.repo();
    common::seed_members(&repo);
    let condition = MemberSearchCondition::new();

    let first = repo
        .search_members_page(&condition, PageRequest::of(0, 3))
        .unwrap();
    assert_eq!(first.total_elements(), 4);
    assert_eq!(first.total_pages(), 2);
    assert_eq!(usernames(first.content()), vec!["memberD", "memberC", "memberB"]);

    let second = repo
        .search_members_page(&condition, PageRequest::of(1, 3))
        .unwrap();
    assert_eq!(second.total_elements(), 4);
    assert_eq!(usernames(second.content()), vec!["memberA"]);
    assert!(second.is_last());
}

#[test]
fn test_optimized_page_matches_simple_page() {
    let test_db = common::TestDb::new("test_optimized_page_matches_simple_page.db");
    let repo = test_db.repo();
    common::seed_members(&repo);

    let conditions = [
        MemberSearchCondition::new(),
        MemberSearchCondition::new().age_goe(20),
        MemberSearchCondition::new().team_name("teamB"),
        MemberSearchCondition::new().team_name("teamA").age_loe(10),
    ];

    for condition in &conditions {
        for page in 0..3 {
            for size in 1..5 {
                let request = PageRequest::of(page, size);
                let simple = repo.search_members_page(condition, request).unwrap();
                let optimized = repo
                    .search_members_page_optimized(condition, request)
                    .unwrap();

                assert_eq!(simple.content(), optimized.content(), "{condition:?} {request:?}");
                assert_eq!(
                    simple.total_elements(),
                    optimized.total_elements(),
                    "{condition:?} {request:?}"
                );
            }
        }
    }
}

#[test]
fn test_unjoined_count_matches_joined_search() {
    let test_db = common::TestDb::new("test_unjoined_count_matches_joined_search.db");
    let repo = test_db.repo();
    common::seed_members(&repo);
    repo.create_member(&NewMember::try_new(None, 25, None).unwrap())
        .unwrap();

    for condition in [
        MemberSearchCondition::new(),
        MemberSearchCondition::new().team_name("teamA"),
        MemberSearchCondition::new().age_goe(20).age_loe(30),
        MemberSearchCondition::new().username("memberD").team_name("teamB"),
    ] {
        assert_eq!(
            repo.count_members(&condition).unwrap(),
            repo.search_members(&condition).unwrap().len(),
            "{condition:?}"
        );
    }
}

#[test]
fn test_unknown_team_yields_empty_page() {
    let test_db = common::TestDb::new("test_unknown_team_yields_empty_page.db");
    let repo = test_db.repo();
    common::seed_members(&repo);
    let condition = MemberSearchCondition::new().team_name("teamZ");

    let simple = repo
        .search_members_page(&condition, PageRequest::of(0, 3))
        .unwrap();
    let optimized = repo
        .search_members_page_optimized(&condition, PageRequest::of(0, 3))
        .unwrap();

    for page in [simple, optimized] {
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 0);
    }
}

#[test]
fn test_offset_past_end_keeps_true_total() {
    let test_db = common::TestDb::new("test_offset_past_end_keeps_true_total.db");
    let repo = test_db.repo();
    common::seed_members(&repo);
    let condition = MemberSearchCondition::new();

    let simple = repo
        .search_members_page(&condition, PageRequest::of(10, 3))
        .unwrap();
    let optimized = repo
        .search_members_page_optimized(&condition, PageRequest::of(10, 3))
        .unwrap();

    for page in [simple, optimized] {
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 4);
    }
}

#[test]
fn test_members_without_username_sort_last() {
    let test_db = common::TestDb::new("test_members_without_username_sort_last.db");
    let repo = test_db.repo();
    common::seed_members(&repo);
    repo.create_member(&NewMember::try_new(None, 100, None).unwrap())
        .unwrap();

    let page = repo
        .search_members_page(&MemberSearchCondition::new(), PageRequest::of(0, 10))
        .unwrap();

    assert_eq!(page.total_elements(), 5);
    assert_eq!(
        usernames(page.content()),
        vec!["memberD", "memberC", "memberB", "memberA", "<none>"]
    );
}

#[test]
fn test_store_rejects_negative_age_and_searches_keep_working() {
    use diesel::prelude::*;

    let test_db = common::TestDb::new("test_store_rejects_negative_age.db");
    let repo = test_db.repo();
    common::seed_members(&repo);

    const NEGATIVE_AGE: &str = "INSERT INTO members (username, age) VALUES ('neg', -1)";
    const BLANK_TEAM: &str = "INSERT INTO teams (name) VALUES ('   ')";

    let mut conn = test_db.pool().get().unwrap();
    assert!(diesel::sql_query(NEGATIVE_AGE).execute(&mut conn).is_err());
    assert!(diesel::sql_query(BLANK_TEAM).execute(&mut conn).is_err());

    let condition = MemberSearchCondition::new();
    assert_eq!(repo.search_members(&condition).unwrap().len(), 4);
    assert_eq!(
        repo.search_members_page(&condition, PageRequest::of(0, 10))
            .unwrap()
            .total_elements(),
        4
    );
    assert_eq!(
        repo.search_members_page_optimized(&condition, PageRequest::of(0, 10))
            .unwrap()
            .total_elements(),
        4
    );
}

#[test]
fn test_optimized_full_page_counts_without_join() {
    let test_db = common::TestDb::new("test_optimized_full_page_counts.db");
    let repo = test_db.repo();
    common::seed_members(&repo);
    repo.create_member(&NewMember::try_new(Some("loner"), 20, None).unwrap())
        .unwrap();

    let condition = MemberSearchCondition::new().age_goe(20);
    let page = repo
        .search_members_page_optimized(&condition, PageRequest::of(0, 2))
        .unwrap();

    assert_eq!(usernames(page.content()), vec!["memberD", "memberC"]);
    assert_eq!(page.total_elements(), 4);
    assert_eq!(page.total_pages(), 2);

    let team_page = repo
        .search_members_page_optimized(
            &MemberSearchCondition::new().team_name("teamB"),
            PageRequest::of(0, 2),
        )
        .unwrap();
    assert_eq!(team_page.total_elements(), 2);
}
