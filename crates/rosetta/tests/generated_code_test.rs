//! Generated models and repositories, compiled and run against SQLite.
//!
//! `generated/` holds the renderer output for `fixture_tables()`. The first
//! test keeps the two in sync; the others call the generated accessors as
//! ordinary Rust.

#[allow(dead_code)]
#[path = "generated/mod.rs"]
mod generated;

use rusqlite::Connection;
use tempfile::TempDir;

use rosetta::codegen::{render_models, render_repositories};
use rosetta::{EnrichedColumn, PrimitiveType, TableSpec};

use generated::_models::{ConnectionRow, OptionRow, Users};
use generated::_repos::{ConnectionRowRepository, OptionRowRepository, UsersRepository};

const INJECTION: &str = "'; DROP TABLE users; --";

fn fixture_tables() -> Vec<TableSpec> {
    vec![
        TableSpec::new(
            "users",
            vec![
                EnrichedColumn::new("id", PrimitiveType::Int).with_nullable(false),
                EnrichedColumn::new("usr_email", PrimitiveType::Str)
                    .with_semantic_name("email_address"),
                EnrichedColumn::new("status", PrimitiveType::Str)
                    .with_description("Account state."),
            ],
        ),
        TableSpec::new(
            "option",
            vec![EnrichedColumn::new("name", PrimitiveType::Str)],
        ),
        TableSpec::new(
            "connection",
            vec![
                EnrichedColumn::new("host", PrimitiveType::Str).with_nullable(false),
                EnrichedColumn::new("port", PrimitiveType::Int),
            ],
        ),
    ]
}

fn seeded_db() -> (TempDir, Connection) {
    let dir = TempDir::new().unwrap();
    let conn = Connection::open(dir.path().join("app.db")).unwrap();
    conn.execute_batch(
        r#"CREATE TABLE users (id INTEGER PRIMARY KEY, usr_email TEXT, status TEXT);
           INSERT INTO users (usr_email, status) VALUES
               ('a@example.com', 'active'),
               ('b@example.com', 'closed');
           CREATE TABLE "option" (name TEXT);
           INSERT INTO "option" (name) VALUES ('gift_wrap'), (NULL);
           CREATE TABLE "connection" (host TEXT NOT NULL, port INTEGER);
           INSERT INTO "connection" (host, port) VALUES ('db.internal', 5432);"#,
    )
    .unwrap();
    (dir, conn)
}

fn user_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn test_fixture_matches_renderer_output() {
    let tables = fixture_tables();
    assert_eq!(
        render_models(&tables).unwrap(),
        include_str!("generated/_models.rs")
    );
    assert_eq!(
        render_repositories(&tables).unwrap(),
        include_str!("generated/_repos.rs")
    );
}

#[test]
fn test_filter_accessor_treats_injection_as_a_value() {
    let (_dir, conn) = seeded_db();
    let before = user_count(&conn);
    let repo = UsersRepository::new(&conn);

    assert!(repo.fetch_by_email_address(INJECTION).unwrap().is_empty());
    assert!(repo.fetch_by_status(INJECTION).unwrap().is_empty());

    assert_eq!(user_count(&conn), before);
    assert_eq!(repo.fetch_all().unwrap().len(), 2);
}

#[test]
fn test_accessors_map_renamed_columns() {
    let (_dir, conn) = seeded_db();
    let repo = UsersRepository::new(&conn);

    let found = repo.fetch_by_email_address("b@example.com").unwrap();
    assert_eq!(
        found,
        vec![Users {
            id: 2,
            email_address: Some("b@example.com".to_string()),
            status: Some("closed".to_string()),
        }]
    );
    assert_eq!(repo.fetch_by_id(1).unwrap()[0].status.as_deref(), Some("active"));
}

#[test]
fn test_models_serialize_under_column_names() {
    let user = Users {
        id: 1,
        email_address: Some("a@example.com".to_string()),
        status: None,
    };
    let json = serde_json::to_value(&user).unwrap();

    assert_eq!(json["usr_email"], "a@example.com");
    assert!(json.get("email_address").is_none());
    assert_eq!(Users::TABLE, "users");
    assert_eq!(Users::COLUMNS, &["id", "usr_email", "status"]);

    let back: Users = serde_json::from_value(json).unwrap();
    assert_eq!(back, user);
}

#[test]
fn test_tables_named_like_std_and_imported_types() {
    let (_dir, conn) = seeded_db();

    let options = OptionRowRepository::new(&conn).fetch_all().unwrap();
    assert_eq!(
        options,
        vec![
            OptionRow {
                name: Some("gift_wrap".to_string())
            },
            OptionRow { name: None },
        ]
    );

    let repo = ConnectionRowRepository::new(&conn);
    assert_eq!(
        repo.fetch_by_port(5432).unwrap(),
        vec![ConnectionRow {
            host: "db.internal".to_string(),
            port: Some(5432),
        }]
    );
    assert!(repo.fetch_by_host(INJECTION).unwrap().is_empty());
}
