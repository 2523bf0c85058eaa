//! CLI parsing and end-to-end run tests.
//!
//! Databases are seeded into temporary files; JSON output goes to a
//! temporary directory.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use clap::Parser;
use hashlookup::{Cli, run};
use hashlookup_core::{LookupError, LookupMode, Row, hasher::digest};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Seeds `people.db` with a `Users` table covering all three modes.
async fn seed_database(dir: &Path) -> PathBuf {
    let path = dir.join("people.db");
    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true),
    )
    .await
    .expect("Failed to create database");

    sqlx::query(
        "CREATE TABLE Users (id INTEGER, name TEXT, phone_sha256 TEXT, full_address TEXT, row_hashes TEXT)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO Users VALUES (1, 'Ann', ?, '12 Main Street', ?), (2, 'Bob', ?, '7 Elm Road', '[]')")
        .bind(digest("+79999999999"))
        .bind(format!(r#"["{}"]"#, digest("ann@example.com")))
        .bind(digest("+71111111111"))
        .execute(&pool)
        .await
        .unwrap();

    pool.close().await;
    path
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("hashlookup").chain(args.iter().copied()))
        .expect("arguments should parse")
}

async fn run_to_string(cli: &Cli) -> Result<String, LookupError> {
    let mut out = Vec::new();
    run(cli, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

// =============================================================================
// Argument Parsing
// =============================================================================

#[test]
fn test_parse_positional_arguments() {
    let cli = parse(&["people.db", "Users", "phone", "+7 999 123-45-67"]);

    assert_eq!(cli.database, "people.db");
    assert_eq!(cli.table, "Users");
    assert_eq!(cli.mode, LookupMode::Phone);
    assert_eq!(cli.query, "+7 999 123-45-67");
    assert!(!cli.json);
    assert_eq!(cli.global.verbose, 0);
}

#[test]
fn test_parse_json_flag_before_query() {
    let cli = parse(&["people.db", "Users", "hash", "--json", "ann@example.com"]);
    assert!(cli.json);
    assert_eq!(cli.query, "ann@example.com");
}

#[test]
fn test_parse_hyphen_leading_query() {
    let cli = parse(&["people.db", "Users", "hash", "-42"]);
    assert_eq!(cli.query, "-42");
}

#[test]
fn test_parse_verbosity_flags() {
    let cli = parse(&["-vv", "people.db", "Users", "address", "main"]);
    assert_eq!(cli.global.verbose, 2);

    let cli = parse(&["people.db", "Users", "address", "main", "--quiet"]);
    assert!(cli.global.quiet);
}

#[test]
fn test_parse_rejects_unknown_mode() {
    let err = Cli::try_parse_from(["hashlookup", "people.db", "Users", "email", "x"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

    assert!(Cli::try_parse_from(["hashlookup", "people.db", "Users", "Phone", "1"]).is_err());
}

#[test]
fn test_parse_requires_all_positionals() {
    let err = Cli::try_parse_from(["hashlookup", "people.db", "Users", "phone"]).unwrap_err();
    assert_eq!(
        err.kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn test_output_dir_defaults_and_env_override() {
    temp_env::with_var_unset("HASHLOOKUP_OUTPUT_DIR", || {
        let cli = parse(&["people.db", "Users", "hash", "x"]);
        assert_eq!(cli.lookup_config().output_dir, PathBuf::from("static"));
    });

    temp_env::with_var("HASHLOOKUP_OUTPUT_DIR", Some("/tmp/results"), || {
        let cli = parse(&["people.db", "Users", "hash", "x"]);
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/results"));

        let cli = parse(&["people.db", "Users", "hash", "x", "--output-dir", "out"]);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    });
}

// =============================================================================
// End-to-End Runs
// =============================================================================

#[tokio::test]
async fn test_run_phone_prints_matching_row() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let cli = parse(&[db.to_str().unwrap(), "Users", "phone", "79999999999"]);

    let text = run_to_string(&cli).await.unwrap();

    assert_eq!(text.matches("---- Row ----").count(), 1);
    assert!(text.contains("name: Ann\n"));
    assert!(text.contains("id: 1\n"));
    assert!(!text.contains("Bob"));
}

#[tokio::test]
async fn test_run_address_tags_matched_column() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let cli = parse(&[db.to_str().unwrap(), "users", "address", "main"]);

    let text = run_to_string(&cli).await.unwrap();

    assert_eq!(text.matches("---- Row ----").count(), 1);
    assert!(text.contains("matched_col: full_address\n"));
}

#[tokio::test]
async fn test_run_zero_matches_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let cli = parse(&[db.to_str().unwrap(), "Users", "hash", "nobody@example.com"]);

    assert_eq!(run_to_string(&cli).await.unwrap(), "");
}

#[tokio::test]
async fn test_run_json_writes_file() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let out_dir = dir.path().join("results");
    let cli = parse(&[
        db.to_str().unwrap(),
        "Users",
        "hash",
        "--json",
        "ann@example.com",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);

    let text = run_to_string(&cli).await.unwrap();

    let expected = out_dir.join("ann_example_com.json");
    assert_eq!(text, format!("Wrote {}\n", expected.display()));

    let json = std::fs::read_to_string(&expected).unwrap();
    let rows: Vec<Row> = serde_json::from_str(&json).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), Some("Ann"));
}

#[tokio::test]
async fn test_run_json_with_no_matches_writes_empty_array() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let out_dir = dir.path().join("results");
    let cli = parse(&[
        db.to_str().unwrap(),
        "Users",
        "address",
        "--json",
        "nowhere",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);

    run_to_string(&cli).await.unwrap();

    let json = std::fs::read_to_string(out_dir.join("nowhere.json")).unwrap();
    assert_eq!(json, "[]");
}

#[tokio::test]
async fn test_run_missing_table_fails() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let cli = parse(&[db.to_str().unwrap(), "Customers", "address", "main"]);

    let err = run_to_string(&cli).await.unwrap_err();
    assert!(matches!(err, LookupError::Schema { .. }));
}

#[tokio::test]
async fn test_run_missing_database_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("absent.db");
    let cli = parse(&[db.to_str().unwrap(), "Users", "hash", "x"]);

    let err = run_to_string(&cli).await.unwrap_err();
    assert!(matches!(err, LookupError::DatabaseOpen { .. }));
    assert!(!db.exists());
}

#[tokio::test]
async fn test_run_digitless_phone_succeeds_without_matches() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let cli = parse(&[db.to_str().unwrap(), "Users", "phone", "n/a"]);

    assert_eq!(run_to_string(&cli).await.unwrap(), "");
}

#[tokio::test]
async fn test_run_unwritable_output_dir_fails() {
    let dir = TempDir::new().unwrap();
    let db = seed_database(dir.path()).await;
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let cli = parse(&[
        db.to_str().unwrap(),
        "Users",
        "hash",
        "--json",
        "x",
        "--output-dir",
        blocker.to_str().unwrap(),
    ]);

    let err = run_to_string(&cli).await.unwrap_err();
    assert!(matches!(err, LookupError::Output { .. }));
}
