use nulock_core::lockfile::{
    InstallationType, LOCK_FILE_NAME, LockFile, LockFileDependency, LockFileFormat,
    LockFileTarget,
};
use nulock_core::types::{Framework, PackageVersion};
use serde_json::Value;
use tempfile::TempDir;

fn sample() -> LockFile {
    let net6 = Framework::parse("net6.0").unwrap();
    LockFile::new(1).with_targets(vec![
        LockFileTarget::new(net6.clone(), None).with_dependencies(vec![
            LockFileDependency::new(
                "Pkg.A",
                Some(PackageVersion::parse("1.2.3").unwrap()),
                Some("abc==".to_string()),
                InstallationType::Direct,
            ),
            LockFileDependency::new("Pkg.B", None, None, InstallationType::Transitive),
        ]),
        LockFileTarget::new(net6, Some("win-x64".to_string())),
    ])
}

#[test]
fn test_dependency_keys_in_order() {
    let text = LockFileFormat::serialize(&sample()).unwrap();

    let type_at = text.find("\"type\"").unwrap();
    let version_at = text.find("\"version\": \"1.2.3\"").unwrap();
    let hash_at = text.find("\"sha512\"").unwrap();
    assert!(type_at < version_at && version_at < hash_at);

    let value: Value = serde_json::from_str(&text).unwrap();
    let entry = &value["dependencies"]["net6.0"]["Pkg.A"];
    assert_eq!(entry["type"], "Direct");
    assert_eq!(entry["version"], "1.2.3");
    assert_eq!(entry["sha512"], "abc==");
}

#[test]
fn test_null_fields_omitted() {
    let value: Value =
        serde_json::from_str(&LockFileFormat::serialize(&sample()).unwrap()).unwrap();
    let entry = value["dependencies"]["net6.0"]["Pkg.B"].as_object().unwrap();
    assert_eq!(entry.keys().collect::<Vec<_>>(), vec!["type"]);
}

#[test]
fn test_targets_written_in_model_order() {
    let text = LockFileFormat::serialize(&sample()).unwrap();
    let ridless = text.find("\"net6.0\"").unwrap();
    let rid = text.find("\"net6.0/win-x64\"").unwrap();
    assert!(ridless < rid);
    assert!(text.contains("\"net6.0/win-x64\": {}"));
}

#[test]
fn test_top_level_keys() {
    let text = LockFileFormat::serialize(&LockFile::new(2)).unwrap();
    assert!(text.starts_with("{\n  \"version\": 2,\n  \"dependencies\""));
}

#[test]
fn test_write_then_rewrite_smaller() {
    let tmp = TempDir::new().expect("tempdir should succeed");
    let path = tmp.path().join("obj").join(LOCK_FILE_NAME);

    LockFileFormat::write(&path, &sample()).expect("first write should succeed");
    LockFileFormat::write(&path, &LockFile::new(1)).expect("second write should succeed");

    let content = std::fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&content).expect("file should hold one document");
    assert_eq!(value["dependencies"].as_object().unwrap().len(), 0);
}

#[test]
fn test_write_into_file_as_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let result = LockFileFormat::write(&blocker.join(LOCK_FILE_NAME), &sample());
    assert!(matches!(result, Err(nulock_core::LockFileError::Io(_))));
}
