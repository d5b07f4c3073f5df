use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::render::RenderedReport;

pub const JSON_FILE_NAME: &str = "language_ranking.json";
pub const MARKDOWN_FILE_NAME: &str = "language_ranking.md";

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(JSON_FILE_NAME)
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.output_dir.join(MARKDOWN_FILE_NAME)
    }

    pub fn write(&self, rendered: &RenderedReport) -> Result<()> {
        let targets = [
            (self.json_path(), rendered.json.as_str()),
            (self.markdown_path(), rendered.markdown.as_str()),
        ];

        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(targets.len());
        for (path, contents) in &targets {
            let tmp = staging_path(path);
            if let Err(e) = fs::write(&tmp, contents) {
                let _ = fs::remove_file(&tmp);
                discard(&staged);
                return Err(Error::persistence(path, e));
            }
            staged.push((tmp, path.clone()));
        }

        for (i, (tmp, path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(tmp, path) {
                discard(&staged[i..]);
                return Err(Error::persistence(path, e));
            }
            tracing::info!("Output written to: {}", path.display());
        }

        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rendered() -> RenderedReport {
        RenderedReport {
            json: "{\"languages\": []}\n".to_string(),
            markdown: "## 🔥 Programming Language Rankings\n".to_string(),
        }
    }

    #[test]
    fn test_writes_both_documents() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        writer.write(&rendered()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(JSON_FILE_NAME)).unwrap(),
            rendered().json
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(MARKDOWN_FILE_NAME)).unwrap(),
            rendered().markdown
        );
        assert!(!dir.path().join("language_ranking.json.tmp").exists());
    }

    #[test]
    fn test_overwrites_previous_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(JSON_FILE_NAME), "stale").unwrap();

        ReportWriter::new(dir.path()).write(&rendered()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(JSON_FILE_NAME)).unwrap(),
            rendered().json
        );
    }

    #[test]
    fn test_missing_directory_writes_nothing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = ReportWriter::new(&missing).write(&rendered()).unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
        assert!(!missing.exists());
    }

    #[test]
    fn test_failed_second_document_leaves_first_untouched() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(JSON_FILE_NAME), "previous").unwrap();
        // A directory squatting on the markdown staging path makes that write fail.
        fs::create_dir(dir.path().join("language_ranking.md.tmp")).unwrap();

        let err = ReportWriter::new(dir.path()).write(&rendered()).unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join(JSON_FILE_NAME)).unwrap(),
            "previous"
        );
        assert!(!dir.path().join("language_ranking.json.tmp").exists());
        assert!(!dir.path().join(MARKDOWN_FILE_NAME).exists());
    }
}
