#![allow(dead_code)]

use std::path::PathBuf;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use member_search::db::{DbPool, establish_connection_pool};
use member_search::domain::member::NewMember;
use member_search::domain::team::{NewTeam, Team};
use member_search::repository::{DieselRepository, MemberWriter, TeamWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    path: PathBuf,
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("temp path is not utf-8").to_string();

        let pool = establish_connection_pool(&url).expect("failed to create pool");
        let mut conn = pool.get().expect("failed to get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");

        Self {
            path,
            pool,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// teamA: memberA (10), memberB (20); teamB: memberC (30), memberD (40).
pub fn seed_members(repo: &DieselRepository) -> (Team, Team) {
    let team_a = repo
        .create_team(&NewTeam::try_new("teamA").unwrap())
        .expect("create teamA");
    let team_b = repo
        .create_team(&NewTeam::try_new("teamB").unwrap())
        .expect("create teamB");

    for (username, age, team) in [
        ("memberA", 10, &team_a),
        ("memberB", 20, &team_a),
        ("memberC", 30, &team_b),
        ("memberD", 40, &team_b),
    ] {
        let new_member = NewMember::try_new(Some(username), age, Some(team.id.get())).unwrap();
        repo.create_member(&new_member).expect("create member");
    }

    (team_a, team_b)
}
