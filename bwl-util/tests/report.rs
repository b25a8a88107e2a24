use std::fs;
use tempfile::tempdir;

use bwl_util::report::{write_error_csv, write_summary_csv};
use bwl_util_core::contract::{BlueprintId, FailureRecord, SummaryRecord};

fn record(id: &str, name: &str, space: &str, age_days: i64) -> SummaryRecord {
    SummaryRecord {
        id: BlueprintId::from(id),
        name: name.to_owned(),
        space: space.to_owned(),
        last_modified: "2024-01-15T08:30:00.000000+0000".to_owned(),
        age_days,
    }
}

#[test]
fn summary_csv_has_header_and_one_row_per_record() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("data_file.csv");

    let records = vec![
        record("a1", "Order to Cash", "Finance", 31),
        record("b2", "Onboarding", "HR", 5),
    ];
    write_summary_csv(&path, &records).expect("write succeeds");

    let contents = fs::read_to_string(&path).expect("file readable");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID,Name,Space,LMD,Age in Days");
    assert_eq!(
        lines[1],
        "a1,Order to Cash,Finance,2024-01-15T08:30:00.000000+0000,31"
    );
}

#[test]
fn summary_values_with_commas_are_quoted() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("data_file.csv");

    let records = vec![record("a1", "Orders, Claims & Returns", "Finance", 12)];
    write_summary_csv(&path, &records).expect("write succeeds");

    let contents = fs::read_to_string(&path).expect("file readable");
    assert!(contents.contains("\"Orders, Claims & Returns\""));
}

#[test]
fn empty_summary_produces_an_empty_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("data_file.csv");

    write_summary_csv(&path, &[]).expect("write succeeds");

    let contents = fs::read_to_string(&path).expect("file readable");
    assert!(contents.is_empty());
}

#[test]
fn error_csv_lists_failed_identifiers() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("error_file.csv");

    let failures = vec![
        FailureRecord {
            id: BlueprintId::from("bad-1"),
        },
        FailureRecord {
            id: BlueprintId::from("bad-2"),
        },
    ];
    write_error_csv(&path, &failures).expect("write succeeds");

    let contents = fs::read_to_string(&path).expect("file readable");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["ID", "bad-1", "bad-2"]);
}
