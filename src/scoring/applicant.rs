use crate::dataset::{Dataset, EDUCATION, EXPERIENCE, NAME, SKILLS};
use crate::error::RankError;

use super::validation::require_columns;

/// A numeric cell: the text as uploaded plus its parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub raw: String,
    pub value: f64,
}

/// One validated applicant row.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRecord {
    /// 0-based position in the upload
    pub position: usize,
    pub name: String,
    pub education: Measurement,
    pub experience: Measurement,
    pub skills: Measurement,
}

/// Turn every row of a validated dataset into an [`ApplicantRecord`].
///
/// Fails fast on the first empty, non-numeric or non-finite value in a scored
/// column. Rows are reported 1-based, counting data rows only.
pub fn extract_applicants(dataset: &Dataset) -> Result<Vec<ApplicantRecord>, RankError> {
    require_columns(dataset)?;

    (0..dataset.len())
        .map(|row| {
            Ok(ApplicantRecord {
                position: row,
                name: dataset.cell(row, NAME).unwrap_or_default().to_string(),
                education: measure(dataset, row, EDUCATION)?,
                experience: measure(dataset, row, EXPERIENCE)?,
                skills: measure(dataset, row, SKILLS)?,
            })
        })
        .collect()
}

fn measure(dataset: &Dataset, row: usize, column: &str) -> Result<Measurement, RankError> {
    let raw = dataset.cell(row, column).unwrap_or_default();
    let trimmed = raw.trim();

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Measurement {
            raw: trimmed.to_string(),
            value,
        }),
        _ => Err(RankError::InvalidData {
            column: column.to_string(),
            row: row + 1,
            value: raw.to_string(),
        }),
    }
}
