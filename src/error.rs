use crate::dataset::REQUIRED_COLUMNS;

/// Message shown when nothing has been uploaded yet.
pub const NO_FILE_PROMPT: &str = "Upload a CSV file with applicant data to begin.";

/// Everything that can stop an upload from turning into a ranking.
///
/// Each variant is terminal for the current interaction and is reported to the
/// user as-is. `NoFileProvided` is informational rather than a failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    #[error("{}", NO_FILE_PROMPT)]
    NoFileProvided,

    #[error(
        "CSV must contain columns: {} (missing: {})",
        REQUIRED_COLUMNS.join(", "),
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    #[error("Invalid value in column '{column}', row {row}: '{value}' is not a number")]
    InvalidData {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Could not parse CSV: {0}")]
    MalformedFile(String),
}

impl RankError {
    /// True for prompts that should not be rendered as errors.
    pub fn is_informational(&self) -> bool {
        matches!(self, RankError::NoFileProvided)
    }
}
