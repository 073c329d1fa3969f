use std::cmp::Ordering;

/// Fractional percentile rank of every value, in input order.
///
/// Each value gets its 1-based rank in ascending order divided by the number
/// of values. Tied values share the mean of the ranks they would occupy, so a
/// group tied at positions 2 and 3 of 4 both get 2.5 / 4. Results lie in
/// `(0, 1]`. Inputs must be finite.
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }

        // Ranks start..end (0-based) become start+1..=end; their mean:
        let average_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = average_rank / n as f64;
        }
        start = end;
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(percentile_ranks(&[]).is_empty());
    }

    #[test]
    fn test_single_value() {
        assert_eq!(percentile_ranks(&[7.0]), vec![1.0]);
    }

    #[test]
    fn test_two_distinct_values() {
        assert_eq!(percentile_ranks(&[3.0, 1.0]), vec![1.0, 0.5]);
    }

    #[test]
    fn test_distinct_values_keep_input_order() {
        assert_eq!(
            percentile_ranks(&[20.0, 10.0, 40.0, 30.0]),
            vec![0.5, 0.25, 1.0, 0.75]
        );
    }

    #[test]
    fn test_ties_share_average_rank() {
        // 1 -> rank 1, the two 2s -> ranks 2 and 3 -> 2.5, 5 -> rank 4
        assert_eq!(
            percentile_ranks(&[2.0, 1.0, 2.0, 5.0]),
            vec![0.625, 0.25, 0.625, 1.0]
        );
    }

    #[test]
    fn test_all_equal() {
        assert_eq!(percentile_ranks(&[4.0, 4.0, 4.0, 4.0]), vec![0.625; 4]);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let ranks = percentile_ranks(&[0.0, -0.0]);
        assert_eq!(ranks[0], ranks[1]);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let values = [5.0, -3.0, 5.0, 12.5, 0.0, 7.0, 7.0, 7.0, 1.0];
        let ranks = percentile_ranks(&values);

        for (i, a) in values.iter().enumerate() {
            assert!(ranks[i] > 0.0 && ranks[i] <= 1.0);
            for (j, b) in values.iter().enumerate() {
                if a > b {
                    assert!(ranks[i] > ranks[j], "{} vs {}", a, b);
                }
                if a == b {
                    assert_eq!(ranks[i], ranks[j]);
                }
            }
        }
    }

    #[test]
    fn test_largest_value_ranks_one_when_unique() {
        let ranks = percentile_ranks(&[1.0, 9.0, 3.0]);
        assert_eq!(ranks[1], 1.0);
    }
}
