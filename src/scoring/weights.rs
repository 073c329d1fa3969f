//! Fixed criterion weights. They sum to 100, so a final score is a percentage.

pub const EDUCATION_WEIGHT: f64 = 40.0;
pub const EXPERIENCE_WEIGHT: f64 = 40.0;
pub const SKILLS_WEIGHT: f64 = 20.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_100() {
        assert_eq!(EDUCATION_WEIGHT + EXPERIENCE_WEIGHT + SKILLS_WEIGHT, 100.0);
    }
}
