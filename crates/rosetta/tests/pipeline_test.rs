//! End-to-end tests for the generation pipeline.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use tempfile::TempDir;

use rosetta::codegen::{AUDIT_LOG_FILE, FUNCTIONS_FILE, MODELS_FILE, REPOS_FILE};
use rosetta::config::{load_rosetta_map, write_default_rosetta_map, PrivacyConfig};
use rosetta::discovery::discover_tables;
use rosetta::llm::MockProvider;
use rosetta::schema::SampleRow;
use rosetta::{
    ColumnMetadata, MockSource, Pipeline, PipelineOptions, RosettaError, Scalar, Settings,
    SqliteSource,
};

const STATUS_RESPONSE: &str = r#"```json
{"columns": [
  {"name": "status", "semantic_name": "account_status", "description": "Current state of the account."},
  {"name": "email", "semantic_name": "contact_email", "description": "Where receipts are sent."}
]}
```"#;

fn users_mock() -> MockSource {
    let mut row = SampleRow::new();
    row.insert("email".to_string(), Scalar::from("a@example.com"));
    row.insert("status".to_string(), Scalar::from("active"));

    MockSource::new()
        .with_table(
            "users",
            vec![
                ColumnMetadata::new("email", "varchar"),
                ColumnMetadata::new("status", "varchar"),
            ],
        )
        .with_rows("users", vec![row])
        .with_distinct_values(
            "users",
            "status",
            vec![Scalar::from("active"), Scalar::from("closed")],
        )
}

fn privacy_on() -> PipelineOptions {
    PipelineOptions::from(&PrivacyConfig {
        sample_rows: true,
        scrub_pii: true,
    })
}

fn create_shop_db(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("shop.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE customers (
             id INTEGER PRIMARY KEY,
             email TEXT NOT NULL,
             tier TEXT,
             created_at TEXT
         );
         CREATE TABLE orders (
             id INTEGER PRIMARY KEY,
             customer_id INTEGER NOT NULL,
             total REAL,
             state VARCHAR(16)
         );
         CREATE TABLE tmp_import (a TEXT, b TEXT, c TEXT);",
    )
    .unwrap();
    for (i, tier) in ["gold", "silver", "gold"].iter().enumerate() {
        conn.execute(
            "INSERT INTO customers (email, tier, created_at) VALUES (?1, ?2, '2024-01-01')",
            params![format!("user{}@example.com", i), tier],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO orders (customer_id, total, state) VALUES (1, 9.5, 'paid'), (2, 3.0, 'open')",
        [],
    )
    .unwrap();
    path
}

// =============================================================================
// Mock source
// =============================================================================

#[test]
fn test_end_to_end_scrubs_pii_and_describes_enums() {
    let pipeline =
        Pipeline::new(users_mock(), MockProvider::with_response(STATUS_RESPONSE)).with_options(privacy_on());

    let report = pipeline.generate(&["users".to_string()]).unwrap();
    let artifacts = &report.artifacts;

    let status_row = artifacts
        .audit_log
        .lines()
        .find(|line| line.contains("| status |"))
        .expect("status row in audit log");
    assert!(status_row.contains("account_status (Inferred)"));
    assert!(status_row.contains("Allowed values: active, closed"));

    for output in [
        &artifacts.models,
        &artifacts.repos,
        &artifacts.audit_log,
        &artifacts.functions,
    ] {
        assert!(!output.contains("a@example.com"));
    }
}

#[test]
fn test_prompt_never_carries_pii() {
    let provider = std::sync::Arc::new(MockProvider::with_response(STATUS_RESPONSE));
    let pipeline = Pipeline::from_parts(std::sync::Arc::new(users_mock()), provider.clone())
        .with_options(privacy_on());

    pipeline.generate(&["users".to_string()]).unwrap();

    assert_eq!(provider.call_count(), 1);
    let prompt = &provider.prompts()[0];
    assert!(!prompt.contains("a@example.com"));
    assert!(prompt.contains("\"status\""));
}

#[test]
fn test_garbage_oracle_output_falls_back_to_original_names() {
    let pipeline = Pipeline::new(users_mock(), MockProvider::with_response("I cannot help with that."))
        .with_options(privacy_on());

    let report = pipeline.generate(&["users".to_string()]).unwrap();
    let status = report.tables[0].get_column("status").unwrap();

    assert_eq!(status.semantic_name, "status");
    assert_eq!(
        status.description.as_deref(),
        Some("Allowed values: active, closed")
    );
}

#[test]
fn test_unreachable_oracle_fails_the_batch() {
    let pipeline = Pipeline::new(users_mock(), MockProvider::failing("connection refused"));
    let err = pipeline.generate(&["users".to_string()]).unwrap_err();
    assert!(matches!(err, RosettaError::NoTablesProcessed(ref f) if f.len() == 1));
}

// =============================================================================
// SQLite source
// =============================================================================

#[test]
fn test_sqlite_generation_writes_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let db = create_shop_db(dir.path());
    let source = SqliteSource::open(&db).unwrap();

    let tables = discover_tables(&source).unwrap();
    assert_eq!(tables, vec!["main.customers", "main.orders"]);

    let pipeline = Pipeline::new(source, MockProvider::new()).with_options(privacy_on());
    let report = pipeline.generate(&tables).unwrap();
    assert!(report.failures.is_empty());

    let out = dir.path().join("generated");
    let written = report.artifacts.write_to(&out, false).unwrap();
    assert_eq!(written.len(), 4);

    let models = fs::read_to_string(out.join(MODELS_FILE)).unwrap();
    assert!(models.contains("pub struct MainCustomers {"));
    assert!(models.contains("pub struct MainOrders {"));

    let repos = fs::read_to_string(out.join(REPOS_FILE)).unwrap();
    assert!(repos.contains("pub struct MainOrdersRepository<'c> {"));

    let functions: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join(FUNCTIONS_FILE)).unwrap()).unwrap();
    assert_eq!(functions.as_array().unwrap().len(), 2);
    assert_eq!(functions[0]["name"], "get_customers");

    let audit = fs::read_to_string(out.join(AUDIT_LOG_FILE)).unwrap();
    assert!(audit.contains("Allowed values: gold, silver"));
    assert!(!audit.contains("@example.com"));
}

#[test]
fn test_sqlite_unknown_table_is_skipped() {
    let dir = TempDir::new().unwrap();
    let db = create_shop_db(dir.path());
    let pipeline = Pipeline::new(SqliteSource::open(&db).unwrap(), MockProvider::new());

    let report = pipeline
        .generate(&["missing".to_string(), "orders".to_string()])
        .unwrap();

    assert_eq!(report.tables.len(), 1);
    assert_eq!(report.failures[0].table, "missing");
    assert!(report.artifacts.audit_log.contains("- missing:"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_init_then_load_with_database_url() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("rosetta_map.yaml");
    write_default_rosetta_map(&config_path, "shop").unwrap();

    let err = load_rosetta_map(&config_path, &Settings::default()).unwrap_err();
    assert!(err.to_string().contains("DATABASE_URL"));

    let settings = Settings::default().with_database_url("sqlite://shop.db");
    let map = load_rosetta_map(&config_path, &settings).unwrap();
    assert_eq!(map.project_name, "shop");
    assert_eq!(map.database.connection_string, "sqlite://shop.db");
    assert!(map.privacy.scrub_pii);
}

#[test]
fn test_sqlite_source_refuses_other_drivers() {
    let err = SqliteSource::from_url("postgresql://user:pw@localhost/app").unwrap_err();
    assert!(matches!(err, RosettaError::Config(_)));
}

#[test]
fn test_connect_routes_postgres_urls_to_postgres() {
    // nothing listens on port 1, so the Postgres driver reports the failure
    let err = rosetta::source::connect(
        "postgresql://rosetta@127.0.0.1:1/app",
        std::time::Duration::from_millis(10),
    )
    .err()
    .unwrap();
    assert!(!matches!(err, RosettaError::Config(_)));
    assert!(err.to_string().starts_with("Data source error"));
}
