//! Whole-collection JSON snapshot persistence.
//!
//! Every collection (users, records, logs) lives in one JSON document.
//! The lifecycle is load-all at startup, rewrite-all on every mutation.
//! Writes go through a temp file in the same directory followed by a
//! rename, so readers never see a half-written file.
//!
//! Loading distinguishes two failure shapes:
//! - Missing file: treated as an empty collection (`Default`).
//! - Present but unparseable file: a `CorruptStore` error. This is never
//!   silently swallowed — losing a vault to a truncated write should be
//!   loud, not an invisible reset to empty.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DataVaultError, Result};

/// Load a collection from a JSON snapshot file.
///
/// Returns `T::default()` when the file does not exist.
pub fn load_collection<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let data = fs::read(path)?;

    serde_json::from_slice(&data).map_err(|e| DataVaultError::CorruptStore {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Serialize a collection and write it to disk **atomically**.
///
/// 1. Create the parent directory if needed.
/// 2. Serialize to JSON.
/// 3. Write to a temp file in the same directory.
/// 4. Rename the temp file over the target path.
pub fn save_collection<T>(path: &Path, collection: &T) -> Result<()>
where
    T: Serialize,
{
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let bytes = serde_json::to_vec_pretty(collection)
        .map_err(|e| DataVaultError::SerializationError(e.to_string()))?;

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &bytes)?;

    // Owner-only permissions before the file becomes visible under its
    // real name.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        let _ = fs::set_permissions(&tmp_path, perms);
    }

    fs::rename(&tmp_path, path)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    type Names = BTreeMap<String, u32>;

    #[test]
    fn missing_file_loads_empty_default() {
        let dir = TempDir::new().unwrap();
        let loaded: Names = load_collection(&dir.path().join("users.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");

        let mut names = Names::new();
        names.insert("alice".into(), 1);
        names.insert("bob".into(), 2);

        save_collection(&path, &names).unwrap();
        let loaded: Names = load_collection(&path).unwrap();
        assert_eq!(loaded, names);
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("logs.json");

        save_collection(&path, &Names::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_a_distinct_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, b"{ definitely not json").unwrap();

        let result: Result<Names> = load_collection(&path);
        match result {
            Err(DataVaultError::CorruptStore { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected CorruptStore, got {other:?}"),
        }
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");

        save_collection(&path, &Names::new()).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        save_collection(&path, &Names::new()).unwrap();

        let perms = std::fs::metadata(&path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
