use std::cmp::Ordering;

use tracing::debug;

use super::applicant::{extract_applicants, ApplicantRecord};
use super::rank::percentile_ranks;
use super::weights::{EDUCATION_WEIGHT, EXPERIENCE_WEIGHT, SKILLS_WEIGHT};
use crate::dataset::{Dataset, EDUCATION, EXPERIENCE, SKILLS};
use crate::error::RankError;

/// One criterion's share of a final score.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionScore {
    pub label: &'static str, // e.g. "Education"
    pub raw: String,         // value as uploaded
    pub percentile: f64,     // in (0, 1]
    pub weight: f64,
    pub points: f64,         // percentile * weight
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedApplicant {
    pub record: ApplicantRecord,
    pub education_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
    pub final_score: f64,
}

impl RankedApplicant {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Per-criterion contributions, in weight order
    pub fn breakdown(&self) -> [CriterionScore; 3] {
        [
            criterion(EDUCATION, &self.record.education.raw, self.education_score, EDUCATION_WEIGHT),
            criterion(EXPERIENCE, &self.record.experience.raw, self.experience_score, EXPERIENCE_WEIGHT),
            criterion(SKILLS, &self.record.skills.raw, self.skills_score, SKILLS_WEIGHT),
        ]
    }
}

fn criterion(label: &'static str, raw: &str, points: f64, weight: f64) -> CriterionScore {
    CriterionScore {
        label,
        raw: raw.to_string(),
        percentile: points / weight,
        weight,
        points,
    }
}

/// Applicants ordered by final score, highest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedDataset {
    applicants: Vec<RankedApplicant>,
}

impl RankedDataset {
    pub fn applicants(&self) -> &[RankedApplicant] {
        &self.applicants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedApplicant> {
        self.applicants.iter()
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }

    /// The first `n` applicants, or all of them when `n` is `None`
    pub fn top(&self, n: Option<usize>) -> &[RankedApplicant] {
        match n {
            Some(n) => &self.applicants[..n.min(self.applicants.len())],
            None => &self.applicants,
        }
    }

    pub fn max_score(&self) -> f64 {
        self.applicants.first().map(|a| a.final_score).unwrap_or(0.0)
    }
}

impl<'a> IntoIterator for &'a RankedDataset {
    type Item = &'a RankedApplicant;
    type IntoIter = std::slice::Iter<'a, RankedApplicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.applicants.iter()
    }
}

/// Score and rank every applicant in an upload.
///
/// Each of Education, Experience and Skills is turned into a fractional
/// percentile rank and weighted 40/40/20; the final score is their sum. The
/// result is sorted by final score descending. The sort is stable, so
/// applicants with equal final scores keep their upload order.
pub fn score(dataset: &Dataset) -> Result<RankedDataset, RankError> {
    let records = extract_applicants(dataset)?;

    let education: Vec<f64> = records.iter().map(|r| r.education.value).collect();
    let experience: Vec<f64> = records.iter().map(|r| r.experience.value).collect();
    let skills: Vec<f64> = records.iter().map(|r| r.skills.value).collect();

    let education = percentile_ranks(&education);
    let experience = percentile_ranks(&experience);
    let skills = percentile_ranks(&skills);

    let mut applicants: Vec<RankedApplicant> = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let education_score = education[i] * EDUCATION_WEIGHT;
            let experience_score = experience[i] * EXPERIENCE_WEIGHT;
            let skills_score = skills[i] * SKILLS_WEIGHT;
            RankedApplicant {
                record,
                education_score,
                experience_score,
                skills_score,
                final_score: education_score + experience_score + skills_score,
            }
        })
        .collect();

    applicants.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });

    debug!(applicants = applicants.len(), "ranked upload");

    Ok(RankedDataset { applicants })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 4] = ["Name", "Education", "Experience", "Skills"];

    fn names(ranked: &RankedDataset) -> Vec<&str> {
        ranked.iter().map(|a| a.name()).collect()
    }

    #[test]
    fn test_two_applicants_exact_scores() {
        let ds = Dataset::from_rows(&HEADERS, &[&["A", "3", "5", "2"], &["B", "1", "2", "9"]]);
        let ranked = score(&ds).unwrap();

        assert_eq!(names(&ranked), vec!["A", "B"]);

        let a = &ranked.applicants()[0];
        assert_eq!(a.education_score, 40.0);
        assert_eq!(a.experience_score, 40.0);
        assert_eq!(a.skills_score, 10.0);
        assert_eq!(a.final_score, 90.0);

        let b = &ranked.applicants()[1];
        assert_eq!(b.education_score, 20.0);
        assert_eq!(b.experience_score, 20.0);
        assert_eq!(b.skills_score, 20.0);
        assert_eq!(b.final_score, 60.0);
    }

    #[test]
    fn test_education_tie_gets_equal_score() {
        let ds = Dataset::from_rows(
            &HEADERS,
            &[&["A", "3", "1", "1"], &["B", "3", "2", "2"], &["C", "1", "3", "3"]],
        );
        let ranked = score(&ds).unwrap();

        let by_name = |n: &str| ranked.iter().find(|a| a.name() == n).unwrap();
        // A and B share ranks 2 and 3 -> 2.5 / 3
        assert_eq!(by_name("A").education_score, by_name("B").education_score);
        assert!((by_name("A").education_score - 2.5 / 3.0 * 40.0).abs() < 1e-9);
        assert!(by_name("C").education_score < by_name("A").education_score);
    }

    #[test]
    fn test_sorted_descending_and_bounded() {
        let ds = Dataset::from_rows(
            &HEADERS,
            &[
                &["A", "1", "9", "4"],
                &["B", "5", "2", "4"],
                &["C", "3", "3", "8"],
                &["D", "2", "7", "1"],
                &["E", "5", "6", "6"],
            ],
        );
        let ranked = score(&ds).unwrap();

        assert_eq!(ranked.len(), 5);
        for pair in ranked.applicants().windows(2) {
            assert!(pair[0].final_score >= pair[1].final_score);
        }
        for applicant in &ranked {
            assert!(applicant.final_score > 0.0 && applicant.final_score <= 100.0);
        }
        assert_eq!(ranked.max_score(), ranked.applicants()[0].final_score);
    }

    #[test]
    fn test_ties_keep_upload_order() {
        let ds = Dataset::from_rows(
            &HEADERS,
            &[&["First", "2", "2", "2"], &["Low", "1", "1", "1"], &["Second", "2", "2", "2"]],
        );
        let ranked = score(&ds).unwrap();
        assert_eq!(names(&ranked), vec!["First", "Second", "Low"]);
    }

    #[test]
    fn test_single_applicant_scores_full_marks() {
        let ds = Dataset::from_rows(&HEADERS, &[&["Solo", "0", "0", "0"]]);
        let ranked = score(&ds).unwrap();
        assert_eq!(ranked.applicants()[0].final_score, 100.0);
    }

    #[test]
    fn test_empty_dataset_ranks_empty() {
        let ds = Dataset::from_rows(&HEADERS, &[]);
        let ranked = score(&ds).unwrap();
        assert!(ranked.is_empty());
        assert_eq!(ranked.max_score(), 0.0);
    }

    #[test]
    fn test_missing_column_does_not_score() {
        let ds = Dataset::from_rows(&["Name", "Education", "Experience"], &[&["A", "1", "1"]]);
        assert!(matches!(score(&ds), Err(RankError::MissingColumns { .. })));
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let ds = Dataset::from_rows(&HEADERS, &[&["Sam", "1", "1", "1"], &["Sam", "2", "2", "2"]]);
        let ranked = score(&ds).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_top_limits_view() {
        let ds = Dataset::from_rows(
            &HEADERS,
            &[&["A", "1", "1", "1"], &["B", "2", "2", "2"], &["C", "3", "3", "3"]],
        );
        let ranked = score(&ds).unwrap();
        assert_eq!(ranked.top(Some(2)).len(), 2);
        assert_eq!(ranked.top(Some(2))[0].name(), "C");
        assert_eq!(ranked.top(Some(10)).len(), 3);
        assert_eq!(ranked.top(None).len(), 3);
    }

    #[test]
    fn test_breakdown_sums_to_final_score() {
        let ds = Dataset::from_rows(&HEADERS, &[&["A", "3", "5", "2"], &["B", "1", "2", "9"]]);
        let ranked = score(&ds).unwrap();
        let a = &ranked.applicants()[0];
        let parts = a.breakdown();

        assert_eq!(parts[0].label, "Education");
        assert_eq!(parts[0].raw, "3");
        assert_eq!(parts[0].percentile, 1.0);
        assert_eq!(parts[2].percentile, 0.5);
        let total: f64 = parts.iter().map(|p| p.points).sum();
        assert_eq!(total, a.final_score);
    }
}
