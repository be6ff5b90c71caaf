//! Cooking-time terciles.
//!
//! Splits a sample of cooking times into fast, medium and slow ranges using
//! the values at the one-third and two-thirds positions as boundaries.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingSpeed {
    Fast,
    Medium,
    Slow,
}

/// Inclusive `(low, high)` minute ranges. Neighbouring ranges share their boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CookingTimeBuckets {
    pub fast: (i32, i32),
    pub medium: (i32, i32),
    pub slow: (i32, i32),
}

impl CookingTimeBuckets {
    /// First range containing `minutes`, checked fast to slow.
    pub fn classify(&self, minutes: i32) -> Option<CookingSpeed> {
        let within = |(low, high): (i32, i32)| low <= minutes && minutes <= high;

        if within(self.fast) {
            Some(CookingSpeed::Fast)
        } else if within(self.medium) {
            Some(CookingSpeed::Medium)
        } else if within(self.slow) {
            Some(CookingSpeed::Slow)
        } else {
            None
        }
    }
}

/// Compute bucket boundaries from an ascending sample. Returns `None` for an empty sample.
pub fn buckets(sorted: &[i32]) -> Option<CookingTimeBuckets> {
    debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    let max = *sorted.last()?;
    let n = sorted.len();
    let fast = sorted[n / 3];
    let medium = sorted[2 * n / 3];

    Some(CookingTimeBuckets {
        fast: (0, fast),
        medium: (fast, medium),
        slow: (medium, max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample() {
        assert_eq!(buckets(&[]), None);
    }

    #[test]
    fn test_single_value() {
        let b = buckets(&[15]).unwrap();
        assert_eq!(b.fast, (0, 15));
        assert_eq!(b.medium, (15, 15));
        assert_eq!(b.slow, (15, 15));
    }

    #[test]
    fn test_terciles() {
        // n = 7: fast boundary at index 2, medium at index 4
        let b = buckets(&[5, 10, 15, 20, 30, 45, 120]).unwrap();
        assert_eq!(b.fast, (0, 15));
        assert_eq!(b.medium, (15, 30));
        assert_eq!(b.slow, (30, 120));
    }

    #[test]
    fn test_classify_prefers_faster_bucket_on_boundary() {
        let b = buckets(&[5, 10, 15, 20, 30, 45, 120]).unwrap();
        assert_eq!(b.classify(15), Some(CookingSpeed::Fast));
        assert_eq!(b.classify(16), Some(CookingSpeed::Medium));
        assert_eq!(b.classify(90), Some(CookingSpeed::Slow));
        assert_eq!(b.classify(121), None);
    }
}
