use std::path::{Component, Path};

use globset::{Glob, GlobMatcher};

use crate::spec::{StorageError, StorageResult};

/// Accepted upload extension (case-insensitive).
pub(crate) const C_EXT_XLSX: &str = "xlsx";

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

pub(crate) fn compile_patterns(patterns: Option<&[String]>) -> StorageResult<Option<Vec<GlobMatcher>>> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut l_glob = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let matcher = Glob::new(pattern)
            .map_err(|e| StorageError::InvalidPattern(format!("{pattern:?}: {e}")))?
            .compile_matcher();
        l_glob.push(matcher);
    }
    Ok(Some(l_glob))
}

pub(crate) fn should_include_by_patterns(value: &str, patterns: Option<&[GlobMatcher]>) -> bool {
    match patterns {
        None => true,
        Some(l_glob) => l_glob.iter().any(|p| p.is_match(value)),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileNameValidation

/// Reject empty names and anything that is not a single plain path component.
pub(crate) fn validate_plain_file_name(name: &str) -> StorageResult<()> {
    if name.trim().is_empty() {
        return Err(StorageError::InvalidFileName(name.to_string()));
    }
    let mut l_components = Path::new(name).components();
    match (l_components.next(), l_components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(StorageError::InvalidFileName(name.to_string())),
    }
}

pub(crate) fn is_xlsx_file_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(C_EXT_XLSX))
}

/// True when both paths resolve to the same existing file.
pub(crate) fn is_same_file(src: &Path, dst: &Path) -> bool {
    match (src.canonicalize(), dst.canonicalize()) {
        (Ok(src_resolved), Ok(dst_resolved)) => src_resolved == dst_resolved,
        _ => false,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
