pub mod applicant;
pub mod engine;
pub mod rank;
pub mod validation;
pub mod weights;

pub use applicant::{extract_applicants, ApplicantRecord, Measurement};
pub use engine::{score, CriterionScore, RankedApplicant, RankedDataset};
pub use rank::percentile_ranks;
pub use validation::{missing_columns, require_columns, validate};
pub use weights::{EDUCATION_WEIGHT, EXPERIENCE_WEIGHT, SKILLS_WEIGHT};
