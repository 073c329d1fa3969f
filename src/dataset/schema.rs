//! Column names shared by the reader, the scorer and the shortlist writer.

pub const NAME: &str = "Name";
pub const EDUCATION: &str = "Education";
pub const EXPERIENCE: &str = "Experience";
pub const SKILLS: &str = "Skills";
pub const FINAL_SCORE: &str = "Final_Score";

/// Columns an upload must carry before it can be ranked.
pub const REQUIRED_COLUMNS: [&str; 4] = [NAME, EDUCATION, EXPERIENCE, SKILLS];

/// Columns of the ranked view and the exported shortlist, in output order.
pub const SHORTLIST_COLUMNS: [&str; 5] = [NAME, EDUCATION, EXPERIENCE, SKILLS, FINAL_SCORE];
