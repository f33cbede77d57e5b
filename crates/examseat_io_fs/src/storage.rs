//! Upload/output directory management for the seating workflow.

use std::fs;
use std::path::{Path, PathBuf};

use crate::report::{ReportCleanup, ReportCleanupBuilder};
use crate::spec::{SpecStorageOptions, StorageError, StorageResult};
use crate::util::{
    compile_patterns, is_same_file, is_xlsx_file_name, should_include_by_patterns,
    validate_plain_file_name,
};

/// Owner of the upload and output directories.
///
/// Construction creates both directories. Every path handed out by this type
/// is a direct child of one of them.
#[derive(Debug, Clone)]
pub struct SeatingStorage {
    options: SpecStorageOptions,
}

impl SeatingStorage {
    /// Create storage, making sure both directories exist.
    pub fn new(options: SpecStorageOptions) -> StorageResult<Self> {
        for path_dir in [&options.dir_upload, &options.dir_output] {
            fs::create_dir_all(path_dir).map_err(|source| StorageError::Io {
                path: path_dir.clone(),
                source,
            })?;
        }
        // Fail early on bad patterns instead of at the first reset.
        compile_patterns(options.patterns_include_files.as_deref())?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &SpecStorageOptions {
        &self.options
    }

    /// Path for a generated workbook inside the output directory.
    pub fn path_output(&self, name_file: &str) -> PathBuf {
        self.options.dir_output.join(name_file)
    }

    /// Copy an existing workbook into the upload directory.
    ///
    /// Returns the stored path. An existing upload with the same name is
    /// overwritten; a source that already is that upload is left untouched.
    pub fn save_upload(&self, path_src: impl AsRef<Path>) -> StorageResult<PathBuf> {
        let path_src = path_src.as_ref();
        let name_file = path_src
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let path_dst = self.derive_upload_path(&name_file)?;

        if is_same_file(path_src, &path_dst) {
            tracing::debug!(path = %path_dst.display(), "upload already stored");
            return Ok(path_dst);
        }
        fs::copy(path_src, &path_dst).map_err(|source| StorageError::Io {
            path: path_src.to_path_buf(),
            source,
        })?;
        tracing::info!(
            src = %path_src.display(),
            dst = %path_dst.display(),
            "saved upload"
        );
        Ok(path_dst)
    }

    /// Store raw workbook bytes under `name_file` in the upload directory.
    pub fn save_upload_bytes(&self, name_file: &str, bytes: &[u8]) -> StorageResult<PathBuf> {
        let path_dst = self.derive_upload_path(name_file)?;
        fs::write(&path_dst, bytes).map_err(|source| StorageError::Io {
            path: path_dst.clone(),
            source,
        })?;
        tracing::info!(dst = %path_dst.display(), n_bytes = bytes.len(), "saved upload");
        Ok(path_dst)
    }

    /// Resolve a generated file by bare name.
    pub fn resolve_download(&self, name_file: &str) -> StorageResult<PathBuf> {
        validate_plain_file_name(name_file)?;
        let path_file = self.path_output(name_file);
        if !path_file.is_file() {
            return Err(StorageError::NotFound(path_file));
        }
        Ok(path_file)
    }

    /// Remove regular files directly inside both directories.
    ///
    /// Subdirectories are skipped. Per-file failures are collected in the
    /// report and do not stop the run.
    pub fn cleanup(&self) -> StorageResult<ReportCleanup> {
        let l_glob = compile_patterns(self.options.patterns_include_files.as_deref())?;
        let mut builder = ReportCleanupBuilder::default();

        for path_dir in [&self.options.dir_upload, &self.options.dir_output] {
            let iter_entries = match fs::read_dir(path_dir) {
                Ok(iter_entries) => iter_entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    builder.add_error(path_dir.clone(), e.to_string());
                    continue;
                }
            };

            for res_entry in iter_entries {
                builder.add_scanned();
                let entry = match res_entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        builder.add_error(path_dir.clone(), e.to_string());
                        continue;
                    }
                };
                let path_file = entry.path();
                let if_is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
                let name_file = entry.file_name().to_string_lossy().into_owned();
                if !if_is_file || !should_include_by_patterns(&name_file, l_glob.as_deref()) {
                    builder.add_skipped();
                    continue;
                }

                match fs::remove_file(&path_file) {
                    Ok(()) => builder.add_removed(),
                    Err(e) => {
                        tracing::warn!(path = %path_file.display(), error = %e, "cleanup failed");
                        builder.add_error(path_file, e.to_string());
                    }
                }
            }
        }

        let report = builder.build();
        tracing::info!("{}", report.format("[RESET]"));
        Ok(report)
    }

    fn derive_upload_path(&self, name_file: &str) -> StorageResult<PathBuf> {
        validate_plain_file_name(name_file)?;
        if !is_xlsx_file_name(name_file) {
            return Err(StorageError::UnsupportedExtension(name_file.to_string()));
        }
        Ok(self.options.dir_upload.join(name_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_storage(path_root: &Path) -> SeatingStorage {
        SeatingStorage::new(SpecStorageOptions::new(
            path_root.join("uploads"),
            path_root.join("outputs"),
        ))
        .expect("storage")
    }

    #[test]
    fn new_creates_both_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = create_storage(tmp.path());
        assert!(storage.options().dir_upload.is_dir());
        assert!(storage.options().dir_output.is_dir());
    }

    #[test]
    fn save_upload_bytes_rejects_non_xlsx() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = create_storage(tmp.path());

        let err = storage.save_upload_bytes("rooms.csv", b"x").unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedExtension(_)));
        let err = storage.save_upload_bytes("", b"x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileName(_)));

        let path = storage.save_upload_bytes("rooms.xlsx", b"x").expect("save");
        assert_eq!(path, tmp.path().join("uploads").join("rooms.xlsx"));
    }

    #[test]
    fn save_upload_keeps_stored_file_when_resaved() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = create_storage(tmp.path());
        let bytes = b"PK\x03\x04 workbook body";

        let path_stored = storage.save_upload_bytes("input.xlsx", bytes).expect("save");
        let path_again = storage.save_upload(&path_stored).expect("resave");
        assert_eq!(path_again, path_stored);
        assert_eq!(fs::read(&path_stored).expect("read"), bytes.to_vec());

        let path_dotted = tmp.path().join("uploads").join(".").join("input.xlsx");
        storage.save_upload(&path_dotted).expect("resave dotted");
        assert_eq!(fs::read(&path_stored).expect("read"), bytes.to_vec());
    }

    #[test]
    fn resolve_download_rejects_traversal_and_missing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = create_storage(tmp.path());

        assert!(matches!(
            storage.resolve_download("../uploads/rooms.xlsx"),
            Err(StorageError::InvalidFileName(_))
        ));
        assert!(matches!(
            storage.resolve_download("plan_updated.xlsx"),
            Err(StorageError::NotFound(_))
        ));

        fs::write(storage.path_output("plan_updated.xlsx"), b"x").expect("write");
        let path = storage.resolve_download("plan_updated.xlsx").expect("resolve");
        assert!(path.is_file());
    }

    #[test]
    fn new_rejects_bad_pattern() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut options =
            SpecStorageOptions::new(tmp.path().join("uploads"), tmp.path().join("outputs"));
        options.patterns_include_files = Some(vec!["[".to_string()]);
        assert!(matches!(
            SeatingStorage::new(options),
            Err(StorageError::InvalidPattern(_))
        ));
    }
}
