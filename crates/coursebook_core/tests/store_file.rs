use coursebook_core::{
    Course, DocumentError, JsonTrainingRepository, RecordError, RepoError, TrainingRepository,
};
use std::error::Error;
use std::fs;

#[test]
fn malformed_store_fails_with_deserialization() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonTrainingRepository::open(&path).unwrap_err();
    assert!(matches!(err, RepoError::Deserialization { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn wrong_shape_fails_with_deserialization() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, r#"{"courses": "SD100"}"#).unwrap();

    let err = JsonTrainingRepository::open(&path).unwrap_err();
    assert!(matches!(err, RepoError::Deserialization { .. }));
    assert!(err.to_string().contains("courses"));
}

#[test]
fn record_missing_identifier_fails_with_deserialization() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, r#"{"sessions": [{"course_code": "SD100"}]}"#).unwrap();

    let err = JsonTrainingRepository::open(&path).unwrap_err();
    assert!(err.to_string().contains("session_id"));
}

#[test]
fn deserialization_error_keeps_record_error_as_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, r#"{"courses": [{"title": "No code"}]}"#).unwrap();

    let err = JsonTrainingRepository::open(&path).unwrap_err();
    let document_err = err
        .source()
        .and_then(|source| source.downcast_ref::<DocumentError>())
        .unwrap();
    assert_eq!(
        document_err,
        &DocumentError::Record(RecordError::MissingField {
            kind: "course",
            field: "code",
        })
    );
    let record_err = document_err
        .source()
        .and_then(|source| source.downcast_ref::<RecordError>())
        .unwrap();
    assert!(matches!(record_err, RecordError::MissingField { .. }));
}

#[test]
fn unreadable_store_fails_with_io() {
    let dir = tempfile::tempdir().unwrap();

    // A directory exists at the path but cannot be read as a file.
    let err = JsonTrainingRepository::open(dir.path()).unwrap_err();
    assert!(matches!(err, RepoError::Io { .. }));
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("db.json");

    let mut repo = JsonTrainingRepository::open(&path).unwrap();
    repo.add_course(&Course::new("SD100", "Sales", "Beginner", 3, ""))
        .unwrap();

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["courses"][0]["code"], "SD100");
    assert_eq!(stored["participants"], serde_json::json!([]));
    assert_eq!(stored["sessions"], serde_json::json!([]));
}

#[test]
fn failed_write_leaves_snapshot_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("blocker");
    let path = parent.join("db.json");

    let mut repo = JsonTrainingRepository::open(&path).unwrap();
    fs::write(&parent, "file, not a directory").unwrap();

    let err = repo
        .add_course(&Course::new("SD100", "Sales", "Beginner", 3, ""))
        .unwrap_err();
    assert!(matches!(err, RepoError::Io { .. }));
    assert!(repo.list_courses().unwrap().is_empty());
}

#[test]
fn partial_document_loads_with_empty_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(
        &path,
        r#"{"participants": [{"employee_id": "e001", "name": "Ada"}]}"#,
    )
    .unwrap();

    let repo = JsonTrainingRepository::open(&path).unwrap();
    assert!(repo.list_courses().unwrap().is_empty());
    let participants = repo.list_participants().unwrap();
    assert_eq!(participants[0].employee_id, "E001");
    assert_eq!(participants[0].department, "");
}
