use std::fs;

use examseat_io_fs::{SeatingStorage, SpecStorageOptions};

#[test]
fn cleanup_removes_files_and_skips_subdirectories() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let storage = SeatingStorage::new(SpecStorageOptions::new(
        tmp.path().join("uploads"),
        tmp.path().join("outputs"),
    ))
    .expect("storage");

    let path_src = tmp.path().join("input.xlsx");
    fs::write(&path_src, b"workbook").expect("write src");
    let path_upload = storage.save_upload(&path_src).expect("upload");
    fs::write(storage.path_output("plan_updated.xlsx"), b"x").expect("write out");
    fs::create_dir(storage.options().dir_output.join("keep")).expect("mkdir");

    let report = storage.cleanup().expect("cleanup");
    assert_eq!(report.cnt_scanned, 3);
    assert_eq!(report.cnt_removed, 2);
    assert_eq!(report.cnt_skipped, 1);
    assert!(report.errors.is_empty());

    assert!(!path_upload.exists());
    assert!(storage.options().dir_output.join("keep").is_dir());
    assert!(path_src.exists());
}

#[test]
fn cleanup_honors_include_patterns() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut options = SpecStorageOptions::new(tmp.path().join("uploads"), tmp.path().join("outputs"));
    options.patterns_include_files = Some(vec!["*.xlsx".to_string()]);
    let storage = SeatingStorage::new(options).expect("storage");

    fs::write(storage.path_output("signature_list.xlsx"), b"x").expect("write");
    fs::write(storage.path_output("notes.txt"), b"x").expect("write");

    let report = storage.cleanup().expect("cleanup");
    assert_eq!(report.cnt_removed, 1);
    assert_eq!(report.cnt_skipped, 1);
    assert!(storage.path_output("notes.txt").exists());
}

#[test]
fn cleanup_on_empty_directories_is_a_noop() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let storage = SeatingStorage::new(SpecStorageOptions::new(
        tmp.path().join("u"),
        tmp.path().join("o"),
    ))
    .expect("storage");

    let report = storage.cleanup().expect("cleanup");
    assert_eq!(report.cnt_scanned, 0);
    assert_eq!(report.to_string(), "[RESET] scanned=0 removed=0 skipped=0 errors=0");
}
