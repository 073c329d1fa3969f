use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dataset::SHORTLIST_COLUMNS;
use crate::scoring::RankedApplicant;

/// Default file name of the exported shortlist
pub const SHORTLIST_FILE_NAME: &str = "shortlist.csv";

/// Media type of the exported shortlist
pub const SHORTLIST_MIME: &str = "text/csv";

/// One row of the shortlist, keyed by the shortlist column names.
///
/// Numeric criteria are carried as uploaded so the shortlist reproduces the
/// applicant's values verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Education")]
    pub education: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Final_Score")]
    pub final_score: f64,
}

impl From<&RankedApplicant> for ShortlistEntry {
    fn from(applicant: &RankedApplicant) -> Self {
        Self {
            name: applicant.record.name.clone(),
            education: applicant.record.education.raw.clone(),
            experience: applicant.record.experience.raw.clone(),
            skills: applicant.record.skills.raw.clone(),
            final_score: applicant.final_score,
        }
    }
}

pub fn shortlist_entries(applicants: &[RankedApplicant]) -> Vec<ShortlistEntry> {
    applicants.iter().map(ShortlistEntry::from).collect()
}

/// Serialize ranked applicants as shortlist CSV (header always present, no
/// index column).
pub fn to_csv_bytes(applicants: &[RankedApplicant]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());

    wtr.write_record(SHORTLIST_COLUMNS)
        .context("Failed to write shortlist header")?;
    for entry in shortlist_entries(applicants) {
        wtr.serialize(&entry)
            .with_context(|| format!("Failed to serialize shortlist row for '{}'", entry.name))?;
    }

    wtr.into_inner().context("Failed to flush shortlist CSV")
}

/// Write the shortlist to `path` atomically.
///
/// The file is either fully replaced or left untouched.
pub fn write_shortlist(path: &Path, applicants: &[RankedApplicant]) -> Result<()> {
    let bytes = to_csv_bytes(applicants)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    std::io::Write::write_all(&mut file, &bytes)
        .with_context(|| format!("Failed to write shortlist to {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save shortlist to {}", path.display()))?;

    info!(path = %path.display(), rows = applicants.len(), "wrote shortlist");
    Ok(())
}

/// Read a shortlist back (used to verify exports)
pub fn read_shortlist<R: Read>(reader: R) -> Result<Vec<ShortlistEntry>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    rdr.deserialize()
        .collect::<Result<Vec<ShortlistEntry>, _>>()
        .context("Failed to parse shortlist CSV")
}
