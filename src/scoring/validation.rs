use crate::dataset::{Dataset, REQUIRED_COLUMNS};
use crate::error::RankError;

/// Check that an upload carries every required column.
pub fn validate(dataset: &Dataset) -> bool {
    missing_columns(dataset).is_empty()
}

/// Required columns absent from the upload, in canonical order.
pub fn missing_columns(dataset: &Dataset) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !dataset.has_column(column))
        .collect()
}

/// Like [`validate`], but reports all missing columns at once.
pub fn require_columns(dataset: &Dataset) -> Result<(), RankError> {
    let missing = missing_columns(dataset);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RankError::MissingColumns {
            missing: missing.into_iter().map(str::to_string).collect(),
        })
    }
}
