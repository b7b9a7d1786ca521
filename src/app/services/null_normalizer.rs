//! Sentinel normalization for channel sample data
//!
//! Instrument files declare a pad value that marks missing samples. This
//! module casts channel data to floating point and replaces samples equal to
//! the declared pad value with NaN, the universal missing-value marker used
//! by the output container. Independent of quantity kind and idempotent.

use crate::app::models::Sample;
use tracing::debug;

/// Parse the declared sentinel into a float
///
/// Files frequently declare unusable pad values (empty strings, quoted
/// blanks). Those are treated as NaN, which disables replacement since no
/// sample compares equal to NaN.
pub fn parse_sentinel(sentinel: Option<&str>) -> f64 {
    match sentinel.map(str::trim).and_then(|s| s.parse::<f64>().ok()) {
        Some(value) => value,
        None => {
            if let Some(raw) = sentinel {
                debug!("Pad value '{}' is not numeric, treating as NaN", raw);
            }
            f64::NAN
        }
    }
}

/// Cast samples to floats and replace the declared sentinel with NaN
///
/// Textual samples that do not parse as numbers also become NaN. Applying
/// this function to already-normalized data is a no-op.
pub fn normalize(data: &[Sample], sentinel: Option<&str>) -> Vec<f64> {
    let null_value = parse_sentinel(sentinel);

    data.iter()
        .map(|sample| match sample.as_f64() {
            Some(v) if v == null_value => f64::NAN,
            Some(v) => v,
            None => f64::NAN,
        })
        .collect()
}

/// Variant of [`normalize`] for data already cast to floats, used for
/// derived channels that never pass through the raw sample representation
pub fn normalize_floats(data: &[f64], sentinel: Option<&str>) -> Vec<f64> {
    let null_value = parse_sentinel(sentinel);

    data.iter()
        .map(|&v| if v == null_value { f64::NAN } else { v })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[f64]) -> Vec<Sample> {
        values.iter().map(|&v| Sample::Number(v)).collect()
    }

    #[test]
    fn test_sentinel_replacement() {
        let data = samples(&[1.5, -99.0, 3.0, -99.0]);
        let normalized = normalize(&data, Some("-99.0"));
        assert_eq!(normalized[0], 1.5);
        assert!(normalized[1].is_nan());
        assert_eq!(normalized[2], 3.0);
        assert!(normalized[3].is_nan());
    }

    #[test]
    fn test_absent_sentinel_casts_only() {
        let data = samples(&[1.0, -99.0]);
        let normalized = normalize(&data, None);
        assert_eq!(normalized, vec![1.0, -99.0]);
    }

    #[test]
    fn test_non_numeric_sentinel_casts_only() {
        let data = samples(&[1.0, -99.0]);
        let normalized = normalize(&data, Some("' '"));
        assert_eq!(normalized, vec![1.0, -99.0]);
    }

    #[test]
    fn test_textual_samples_parse_or_become_nan() {
        let data = vec![
            Sample::Text("4.25".to_string()),
            Sample::Text("n/a".to_string()),
            Sample::Number(2.0),
        ];
        let normalized = normalize(&data, None);
        assert_eq!(normalized[0], 4.25);
        assert!(normalized[1].is_nan());
        assert_eq!(normalized[2], 2.0);
    }

    #[test]
    fn test_idempotence() {
        let data = samples(&[5.0, -99.0, 7.5]);
        let once = normalize(&data, Some("-99"));
        let twice = normalize_floats(&once, Some("-99"));

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }

    #[test]
    fn test_normalize_floats_replaces_sentinel() {
        let normalized = normalize_floats(&[0.0, 9999.0], Some("9999"));
        assert_eq!(normalized[0], 0.0);
        assert!(normalized[1].is_nan());
    }
}
