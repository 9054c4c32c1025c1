// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner behavior tests against local CSV fixtures.
//!
//! Local paths exercise the same bind/query/scan machinery as signed URLs
//! without touching the network; the httpfs path is only engaged for
//! http(s) sources.

use std::fs;
use std::path::PathBuf;

use duckdb::arrow::array::{Array, StringArray};
use tempfile::TempDir;

use crate::error::SkimmerError;
use crate::scanner::RemoteTabularScanner;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn recipes_fixture(dir: &TempDir) -> String {
    write_fixture(dir, "recipes.csv", "Name,Qty\nLemonade,1\nTea,2\n")
        .to_string_lossy()
        .to_string()
}

#[test]
fn select_star_returns_source_rows_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    let batches = scanner
        .query(&relation, "SELECT * FROM csv_data")
        .expect("query");
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 2);
    assert_eq!(batches[0].num_columns(), 2);

    let names = batches[0]
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("Name column is text");
    assert_eq!(names.value(0), "Lemonade");
    assert_eq!(names.value(1), "Tea");
}

#[test]
fn columns_are_reported_in_schema_order() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    assert_eq!(scanner.columns(&relation).expect("columns"), ["Name", "Qty"]);
}

#[test]
fn scan_finds_needle_in_text_column() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    let report = scanner
        .find_columns_containing(&relation, "Lemonade")
        .expect("scan");
    assert_eq!(report, ["Name"]);
}

#[test]
fn scan_casts_non_text_columns_to_text() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    // Qty is inferred as an integer column; the scan still matches it.
    let report = scanner
        .find_columns_containing(&relation, "2")
        .expect("scan");
    assert_eq!(report, ["Qty"]);
}

#[test]
fn scan_without_matches_is_empty() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    let report = scanner
        .find_columns_containing(&relation, "Espresso")
        .expect("scan");
    assert!(report.is_empty());
}

#[test]
fn multi_column_matches_keep_schema_order() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_fixture(
        &dir,
        "orders.csv",
        "Item,Code,Note\nwidget-7,7,seven of them\nbolt,11,none\n",
    )
    .to_string_lossy()
    .to_string();

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    let report = scanner
        .find_columns_containing(&relation, "7")
        .expect("scan");
    assert_eq!(report, ["Item", "Code"]);
}

#[test]
fn like_wildcards_in_needle_pass_through() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    // '%' stays an engine wildcard: 'Lem%ade' matches Lemonade even though
    // no cell contains that literal text.
    let report = scanner
        .find_columns_containing(&relation, "Lem%ade")
        .expect("scan");
    assert_eq!(report, ["Name"]);
}

#[test]
fn scan_handles_quoted_column_names() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_fixture(
        &dir,
        "menu.csv",
        "Item Name,Unit Price\nLemonade,3\nTea,2\n",
    )
    .to_string_lossy()
    .to_string();

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    let report = scanner
        .find_columns_containing(&relation, "Tea")
        .expect("scan");
    assert_eq!(report, ["Item Name"]);
}

#[test]
fn repeated_queries_are_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    let sql = "SELECT * FROM csv_data WHERE Name = 'Lemonade'";
    let first = scanner.query(&relation, sql).expect("first run");
    let second = scanner.query(&relation, sql).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn duplicate_relation_names_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let _relation = scanner.bind(&source).expect("first bind");

    let err = scanner.bind(&source).expect_err("second bind");
    assert!(matches!(err, SkimmerError::InvalidRequest { .. }));
}

#[test]
fn scan_errors_exclude_columns_instead_of_aborting() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    // Pull the source out from under the view: the catalog still answers
    // the metadata query, but every per-column count errors. Errored
    // columns are treated as "no match", not as a failure of the report.
    fs::remove_file(&source).expect("remove fixture");

    let report = scanner
        .find_columns_containing(&relation, "Lemonade")
        .expect("report survives per-column errors");
    assert!(report.is_empty());
}

#[test]
fn failed_bind_leaves_the_name_free() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir
        .path()
        .join("not-yet.csv")
        .to_string_lossy()
        .to_string();

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    scanner.bind(&missing).expect_err("bind must fail");

    // The failed bind must not occupy the default relation name.
    let source = recipes_fixture(&dir);
    let relation = scanner.bind(&source).expect("bind after failure");
    assert_eq!(scanner.columns(&relation).expect("columns"), ["Name", "Qty"]);
}

#[test]
fn unbind_frees_the_name_for_rebinding() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");
    scanner.unbind(relation).expect("unbind");

    let relation = scanner.bind(&source).expect("rebind");
    let report = scanner
        .find_columns_containing(&relation, "Tea")
        .expect("scan");
    assert_eq!(report, ["Name"]);
}

#[test]
fn two_relations_with_distinct_names_coexist() {
    let dir = TempDir::new().expect("temp dir");
    let recipes = recipes_fixture(&dir);
    let menu = write_fixture(&dir, "menu.csv", "Drink,Stock\nCocoa,5\n")
        .to_string_lossy()
        .to_string();

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let first = scanner.bind_as(&recipes, "recipes").expect("bind recipes");
    let second = scanner.bind_as(&menu, "menu").expect("bind menu");

    assert_eq!(scanner.columns(&first).expect("columns"), ["Name", "Qty"]);
    assert_eq!(scanner.columns(&second).expect("columns"), ["Drink", "Stock"]);
}

#[test]
fn malformed_sql_is_a_query_error() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let relation = scanner.bind(&source).expect("bind");

    let err = scanner
        .query(&relation, "SELEKT * FROM csv_data")
        .expect_err("bad sql");
    assert!(matches!(err, SkimmerError::Query(_)));

    let err = scanner
        .query(&relation, "SELECT no_such_column FROM csv_data")
        .expect_err("unknown column");
    assert!(matches!(err, SkimmerError::Query(_)));
}

#[test]
fn missing_source_never_binds_an_empty_relation() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir
        .path()
        .join("not-there.csv")
        .to_string_lossy()
        .to_string();

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let err = scanner.bind(&missing).expect_err("bind must fail");
    assert!(matches!(
        err,
        SkimmerError::SourceUnreachable { .. } | SkimmerError::Format { .. }
    ));
}

#[test]
fn unparseable_content_never_binds_an_empty_relation() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("garbage.csv");
    fs::write(&path, [0xFFu8, 0xFE, 0x00, 0x01, 0xFF, 0xFF]).expect("write fixture");

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let err = scanner
        .bind(&path.to_string_lossy())
        .expect_err("bind must fail");
    assert!(matches!(
        err,
        SkimmerError::Format { .. } | SkimmerError::SourceUnreachable { .. }
    ));
}

#[test]
fn empty_relation_name_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let source = recipes_fixture(&dir);

    let scanner = RemoteTabularScanner::new().expect("open scanner");
    let err = scanner.bind_as(&source, "").expect_err("empty name");
    assert!(matches!(err, SkimmerError::InvalidRequest { .. }));
}
