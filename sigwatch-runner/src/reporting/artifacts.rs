//! Artifact writer for run outputs.
//!
//! Fixed file names, one run overwrites the previous. Writes are atomic:
//! content goes to a `.tmp` sibling first and is renamed into place, so a
//! half-written file is never readable as the final artifact.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Dashboard page, written on every run.
pub const DASHBOARD_FILE: &str = "dashboard.html";
/// Machine-readable snapshot, written only on success.
pub const SNAPSHOT_FILE: &str = "data.json";
/// Static chart image, best-effort.
pub const CHART_IMAGE_FILE: &str = "analysis.png";

/// Errors from artifact writing.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write artifact '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode snapshot artifact: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Paths of the artifacts a run produced.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub dashboard: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub chart_image: Option<PathBuf>,
}

/// Writes run artifacts into a fixed output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).map_err(|source| ArtifactError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write_dashboard(&self, html: &str) -> Result<PathBuf, ArtifactError> {
        self.write_atomic(DASHBOARD_FILE, html.as_bytes())
    }

    pub fn write_snapshot(&self, json: &str) -> Result<PathBuf, ArtifactError> {
        self.write_atomic(SNAPSHOT_FILE, json.as_bytes())
    }

    pub fn write_chart_image(&self, bytes: &[u8]) -> Result<PathBuf, ArtifactError> {
        self.write_atomic(CHART_IMAGE_FILE, bytes)
    }

    /// Remove a stale snapshot left by a previous successful run.
    ///
    /// A degraded run must not leave last run's `data.json` looking current
    /// next to this run's error page.
    pub fn remove_stale_snapshot(&self) -> Result<(), ArtifactError> {
        let path = self.output_dir.join(SNAPSHOT_FILE);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ArtifactError::Write { path, source }),
        }
    }

    /// Write-to-tmp-then-rename. Rename within one directory is atomic on
    /// the platforms we care about.
    fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, ArtifactError> {
        let path = self.output_dir.join(name);
        let tmp_path = self.output_dir.join(format!("{name}.tmp"));

        fs::write(&tmp_path, bytes).map_err(|source| ArtifactError::Write {
            path: tmp_path.clone(),
            source,
        })?;

        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            ArtifactError::Write { path: path.clone(), source }
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_land_at_fixed_names() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path()).unwrap();

        let dashboard = writer.write_dashboard("<html></html>").unwrap();
        let snapshot = writer.write_snapshot("{}").unwrap();

        assert_eq!(dashboard, dir.path().join(DASHBOARD_FILE));
        assert_eq!(snapshot, dir.path().join(SNAPSHOT_FILE));
        assert_eq!(fs::read_to_string(&dashboard).unwrap(), "<html></html>");
    }

    #[test]
    fn no_tmp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path()).unwrap();
        writer.write_dashboard("x").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{names:?}");
    }

    #[test]
    fn second_run_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path()).unwrap();

        writer.write_snapshot("first").unwrap();
        let path = writer.write_snapshot("second").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn stale_snapshot_removal_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path()).unwrap();

        writer.write_snapshot("{}").unwrap();
        writer.remove_stale_snapshot().unwrap();
        assert!(!dir.path().join(SNAPSHOT_FILE).exists());

        // Nothing to remove: still fine.
        writer.remove_stale_snapshot().unwrap();
    }

    #[test]
    fn nested_output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer = ArtifactWriter::new(&nested).unwrap();
        writer.write_dashboard("x").unwrap();
        assert!(nested.join(DASHBOARD_FILE).exists());
    }
}
