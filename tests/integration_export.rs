mod common;

use common::{create_test_assignment, create_test_user, generate_unique_email};
use eduplatform_config::ExportConfig;
use eduplatform_export::{ExportFormat, ExportManager};
use eduplatform_models::{ProfileUpdate, Role};
use eduplatform_store::DataStore;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn populated_store() -> DataStore {
    let mut store = DataStore::new();
    let teacher = create_test_user(&mut store, &generate_unique_email(), "pw", Role::Teacher);
    for _ in 0..3 {
        create_test_user(&mut store, &generate_unique_email(), "pw", Role::Student);
    }
    create_test_user(&mut store, &generate_unique_email(), "pw", Role::Parent);
    create_test_user(&mut store, &generate_unique_email(), "pw", Role::Admin);
    create_test_assignment(&mut store, teacher.id, "Fractions");
    create_test_assignment(&mut store, teacher.id, "Decimals");
    store
}

fn manager_in(dir: &TempDir) -> ExportManager {
    ExportManager::new(ExportConfig::default().rooted_at(dir.path()))
}

fn csv_rows(path: &Path) -> (Vec<String>, usize) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader.records().map(|r| r.unwrap()).count();
    (headers, rows)
}

#[test]
fn test_csv_round_trip_matches_store_counts() {
    let dir = TempDir::new().unwrap();
    let store = populated_store();
    let mut exports = manager_in(&dir);

    assert!(exports.export_to_csv(&store));

    let csv_dir = &exports.config().csv_dir;
    let (headers, users) = csv_rows(&csv_dir.join("users.csv"));
    assert_eq!(headers[0], "ID");
    assert_eq!(users, store.user_count());
    assert_eq!(csv_rows(&csv_dir.join("students.csv")).1, store.role_count(Role::Student));
    assert_eq!(csv_rows(&csv_dir.join("teachers.csv")).1, store.role_count(Role::Teacher));
    assert_eq!(csv_rows(&csv_dir.join("assignments.csv")).1, store.assignment_count());
}

#[test]
fn test_csv_omits_password_hashes() {
    let dir = TempDir::new().unwrap();
    let store = populated_store();
    let mut exports = manager_in(&dir);
    assert!(exports.export_to_csv(&store));

    let users = fs::read_to_string(exports.config().csv_dir.join("users.csv")).unwrap();
    assert!(!users.contains("$2"));
}

#[test]
fn test_xlsx_export_writes_workbook() {
    let dir = TempDir::new().unwrap();
    let store = populated_store();
    let mut exports = manager_in(&dir);

    assert!(exports.export_to_xlsx(&store));

    let bytes = fs::read(&exports.config().xlsx_path).unwrap();
    // xlsx files are zip archives
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_sql_export_escapes_quotes() {
    let dir = TempDir::new().unwrap();
    let mut store = populated_store();
    let admin = store.admins().next().unwrap().id();
    store
        .update_profile(
            admin,
            ProfileUpdate {
                full_name: Some("Conan O'Brien".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let mut exports = manager_in(&dir);

    assert!(exports.export_to_sql(&store));

    let script = fs::read_to_string(&exports.config().sql_path).unwrap();
    assert!(script.contains("N'Conan O''Brien'"));
    assert!(!script.contains("N'Conan O'Brien'"));
    assert_eq!(script.matches("INSERT INTO Users VALUES").count(), store.user_count());
    assert_eq!(script.matches("INSERT INTO Assignments VALUES").count(), 2);
}

#[test]
fn test_export_all_succeeds_when_every_format_does() {
    let dir = TempDir::new().unwrap();
    let store = populated_store();
    let mut exports = manager_in(&dir);

    assert!(exports.export_all(&store));

    let formats: Vec<ExportFormat> = exports.log().iter().map(|e| e.format).collect();
    assert_eq!(formats, ExportFormat::ALL.to_vec());
    assert!(exports.log().iter().all(|e| e.success));
}

#[test]
fn test_failing_sql_destination_does_not_block_other_formats() {
    let dir = TempDir::new().unwrap();
    let store = populated_store();
    let mut config = ExportConfig::default().rooted_at(dir.path());
    config.sql_path = dir.path().join("missing").join("schema.sql");
    let mut exports = ExportManager::new(config);

    assert!(!exports.export_all(&store));

    assert!(exports.config().xlsx_path.is_file());
    assert!(exports.config().csv_dir.join("users.csv").is_file());
    assert!(!exports.config().sql_path.exists());

    let outcomes: Vec<(ExportFormat, bool)> =
        exports.log().iter().map(|e| (e.format, e.success)).collect();
    assert_eq!(
        outcomes,
        vec![
            (ExportFormat::Xlsx, true),
            (ExportFormat::Csv, true),
            (ExportFormat::Sql, false),
        ]
    );
}
