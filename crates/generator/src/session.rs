//! Per-run session directory.
//!
//! Every run writes into `{output_dir}/{mod_key}_{YYYYmmdd_HHMMSS}` so that
//! repeated runs never overwrite each other's images.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

/// File name of the run summary written next to the images.
pub const SUMMARY_FILE: &str = "generation_summary.json";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Session directory name for a run started at `started_at`.
pub fn session_dir_name(mod_key: &str, started_at: DateTime<Local>) -> String {
    format!("{mod_key}_{}", started_at.format(TIMESTAMP_FORMAT))
}

/// Create a fresh session directory under `output_dir`.
pub async fn create_session_dir(output_dir: &Path, mod_key: &str) -> std::io::Result<PathBuf> {
    let dir = output_dir.join(session_dir_name(mod_key, Local::now()));
    tokio::fs::create_dir_all(&dir).await?;
    tracing::info!(session_dir = %dir.display(), "Created session directory");
    Ok(dir)
}

/// Write `summary` as pretty JSON into the session directory.
pub async fn write_summary<T: Serialize>(session_dir: &Path, summary: &T) -> std::io::Result<PathBuf> {
    let path = session_dir.join(SUMMARY_FILE);
    let body = serde_json::to_vec_pretty(summary)?;
    tokio::fs::write(&path, body).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn dir_name_has_mod_key_and_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(session_dir_name("custom", at), "custom_20240309_070501");
    }

    #[tokio::test]
    async fn creates_dir_and_writes_summary() {
        let root = tempfile::tempdir().unwrap();
        let dir = create_session_dir(root.path(), "scw").await.unwrap();
        assert!(dir.is_dir());
        assert!(dir.file_name().unwrap().to_string_lossy().starts_with("scw_"));

        let path = write_summary(&dir, &serde_json::json!({"ok": true})).await.unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"ok\": true"));
    }
}
