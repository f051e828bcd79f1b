//! Input resolution: read the text to format from a file or from stdin.
//!
//! The pipeline itself only ever sees a `&str`; this module is the one place
//! that touches the file system on the way in, and it maps every I/O failure
//! onto a [`ClipFmtError`] variant the CLI can explain.

use crate::error::ClipFmtError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Where the text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input (no argument, or `-`).
    Stdin,
    /// A local UTF-8 text file.
    File(PathBuf),
}

impl InputSource {
    /// Interpret a CLI argument: `None` or `-` means stdin.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(PathBuf::from(path)),
        }
    }

    /// Path used in error messages.
    pub fn display_path(&self) -> &Path {
        match self {
            InputSource::Stdin => Path::new("<stdin>"),
            InputSource::File(p) => p,
        }
    }
}

/// Read the whole input as UTF-8 text.
pub async fn read_input(source: &InputSource) -> Result<String, ClipFmtError> {
    let text = match source {
        InputSource::Stdin => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|e| ClipFmtError::InputReadFailed {
                    path: source.display_path().to_path_buf(),
                    source: e,
                })?;
            buf
        }
        InputSource::File(path) => read_file(path).await?,
    };
    debug!(
        "Read {} bytes from {}",
        text.len(),
        source.display_path().display()
    );
    Ok(text)
}

/// Read an optional companion file (the rich-text HTML flavour).
pub async fn read_optional(path: Option<&Path>) -> Result<Option<String>, ClipFmtError> {
    match path {
        Some(p) => read_file(p).await.map(Some),
        None => Ok(None),
    }
}

async fn read_file(path: &Path) -> Result<String, ClipFmtError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClipFmtError::InputNotFound {
                path: path.to_path_buf(),
            },
            ErrorKind::PermissionDenied => ClipFmtError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => ClipFmtError::InputReadFailed {
                path: path.to_path_buf(),
                source: e,
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some("-")), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some("notes.md")),
            InputSource::File(PathBuf::from("notes.md"))
        );
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "测试").unwrap();
        let text = read_input(&InputSource::File(path)).await.unwrap();
        assert_eq!(text, "测试");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = read_input(&InputSource::File(PathBuf::from("/no/such/file.txt")))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipFmtError::InputNotFound { .. }));
    }

    #[tokio::test]
    async fn test_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_input(&InputSource::File(path)).await.unwrap_err();
        assert!(matches!(err, ClipFmtError::InputReadFailed { .. }));
    }

    #[tokio::test]
    async fn test_optional_none() {
        assert_eq!(read_optional(None).await.unwrap(), None);
    }
}
