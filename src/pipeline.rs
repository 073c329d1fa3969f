use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::dataset::{parse_csv_bytes, Dataset};
use crate::error::RankError;
use crate::scoring::{score, RankedDataset};

/// A parsed upload and what became of ranking it.
///
/// The dataset is kept even when ranking fails so the uploaded table can
/// still be shown next to the error.
#[derive(Debug, Clone)]
pub struct Upload {
    pub dataset: Dataset,
    pub ranking: Result<RankedDataset, RankError>,
}

impl Upload {
    pub fn ranked(&self) -> Option<&RankedDataset> {
        self.ranking.as_ref().ok()
    }

    pub fn error(&self) -> Option<&RankError> {
        self.ranking.as_ref().err()
    }
}

/// Parse, validate and score one upload.
///
/// Malformed CSV fails the whole upload. Missing columns or bad values only
/// fail the ranking.
pub fn process_upload(bytes: &[u8]) -> Result<Upload, RankError> {
    let dataset = parse_csv_bytes(bytes)?;
    let ranking = score(&dataset);

    match &ranking {
        Ok(ranked) => debug!(applicants = ranked.len(), "upload ranked"),
        // Shown to the user by the caller
        Err(e) => debug!("upload not ranked: {}", e),
    }

    Ok(Upload { dataset, ranking })
}

/// Read an upload from disk
pub fn read_upload(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ranking_errors_not_logged_at_default_level() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(crate::logging::default_directive(false))
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let upload = process_upload(b"Name,Education,Experience\nA,3,5\n").unwrap();
            assert!(upload.error().is_some());
            let upload = process_upload(b"Name,Education,Experience,Skills\nA,3,x,2\n").unwrap();
            assert!(upload.error().is_some());
        });

        assert!(log.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_valid_upload_ranks() {
        let upload = process_upload(b"Name,Education,Experience,Skills\nA,3,5,2\nB,1,2,9\n").unwrap();
        assert_eq!(upload.dataset.len(), 2);
        assert_eq!(upload.ranked().unwrap().len(), 2);
        assert!(upload.error().is_none());
    }

    #[test]
    fn test_missing_column_keeps_dataset() {
        let upload = process_upload(b"Name,Education,Experience\nA,3,5\n").unwrap();
        assert_eq!(upload.dataset.len(), 1);
        assert!(upload.ranked().is_none());
        assert_eq!(
            upload.error(),
            Some(&RankError::MissingColumns {
                missing: vec!["Skills".to_string()]
            })
        );
    }

    #[test]
    fn test_invalid_value_keeps_dataset() {
        let upload = process_upload(b"Name,Education,Experience,Skills\nA,3,five,2\n").unwrap();
        assert!(matches!(upload.error(), Some(RankError::InvalidData { .. })));
    }

    #[test]
    fn test_malformed_fails_upload() {
        let err = process_upload(b"Name,Education\nA,1,2\n").unwrap_err();
        assert!(matches!(err, RankError::MalformedFile(_)));
    }

    #[test]
    fn test_read_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_upload(&dir.path().join("absent.csv")).unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
    }
}
