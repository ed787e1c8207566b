//! Append-only results file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::worker::VanityMatch;

use super::{MatchSink, OutputError};

/// Appends one record per match:
///
/// ```text
/// ADDRESS: 5aAeb6...
/// PRIVATE KEY: ...
/// ---
/// ```
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Opens `path` for appending, creating it owner-readable only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref().to_path_buf();

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(&path).map_err(|source| OutputError::Open {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, file })
    }
}

fn record(found: &VanityMatch) -> String {
    format!(
        "ADDRESS: {}\nPRIVATE KEY: {}\n---\n",
        found.address, found.entropy
    )
}

impl MatchSink for FileSink {
    fn on_match(&mut self, _index: u64, found: &VanityMatch) -> Result<(), OutputError> {
        self.file
            .write_all(record(found).as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|source| OutputError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn found(address: &str, entropy: &str) -> VanityMatch {
        VanityMatch {
            address: address.into(),
            entropy: entropy.into(),
            worker_id: 3,
        }
    }

    #[test]
    fn test_appends_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.txt");

        let mut sink = FileSink::open(&path).unwrap();
        sink.on_match(1, &found("0xAAA", "11")).unwrap();
        sink.on_match(2, &found("0xBBB", "22")).unwrap();
        drop(sink);

        // Reopening appends rather than truncating.
        let mut sink = FileSink::open(&path).unwrap();
        sink.on_match(3, &found("0xCCC", "33")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "ADDRESS: 0xAAA\nPRIVATE KEY: 11\n---\n\
             ADDRESS: 0xBBB\nPRIVATE KEY: 22\n---\n\
             ADDRESS: 0xCCC\nPRIVATE KEY: 33\n---\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");
        FileSink::open(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("matches.txt");

        let err = FileSink::open(&path).err().unwrap();
        assert!(matches!(err, OutputError::Open { .. }));
    }
}
