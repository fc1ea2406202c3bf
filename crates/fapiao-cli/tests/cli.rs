//! End-to-end checks of the fapiao binary on temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;

fn fapiao() -> Command {
    Command::cargo_bin("fapiao").unwrap()
}

#[test]
fn fails_on_directory_without_documents() {
    let dir = tempfile::tempdir().unwrap();

    fapiao()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .pdf documents"));
}

#[test]
fn pdf_extension_matching_is_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("UPPER.PDF"), b"not a pdf").unwrap();

    fapiao()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .pdf documents"));
}

#[test]
fn unreadable_document_becomes_failure_tagged_rename() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();

    fapiao().arg(dir.path()).assert().success();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    // Failure-tagged rename, exports present, no export rows beyond the
    // header for a batch with zero canonical records.
    assert!(names
        .iter()
        .any(|n| n.starts_with("解析失败_broken_00") && n.ends_with(".pdf")));
    let csv = names.iter().find(|n| n.ends_with(".csv")).unwrap();
    let content = std::fs::read_to_string(dir.path().join(csv)).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn rejects_missing_directory() {
    fapiao().arg("/no/such/dir").assert().failure();
}
