//! Service-time percentiles.
//!
//! Percentiles are read straight out of the sorted sample at index
//! `floor(p * n)`. There is no interpolation.

use std::fmt;

use serde::Serialize;

use crate::SECONDS_PER_MINUTE;
use crate::error::{SimError, SimResult};

/// 10th/50th/90th percentile service times for one queue model, in minutes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentiles {
    pub label: String,
    /// Number of completed services the figures are drawn from
    pub count: usize,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl Percentiles {
    /// Summarise completed total service times (seconds).
    ///
    /// # Errors
    ///
    /// [`SimError::NoCompletedEvents`] when `service_times` is empty.
    pub fn from_service_times(label: &str, service_times: &[usize]) -> SimResult<Percentiles> {
        if service_times.is_empty() {
            return Err(SimError::NoCompletedEvents {
                label: label.to_string(),
            });
        }

        let mut sorted = service_times.to_vec();
        sorted.sort_unstable();

        let minutes_at = |fraction: f64| {
            sorted[percentile_index(sorted.len(), fraction)] as f64 / SECONDS_PER_MINUTE as f64
        };

        Ok(Percentiles {
            label: label.to_string(),
            count: sorted.len(),
            p10: minutes_at(0.1),
            p50: minutes_at(0.5),
            p90: minutes_at(0.9),
        })
    }

    /// The headline figure used to compare models
    pub fn summary(&self) -> f64 {
        self.p90
    }
}

/// `floor(fraction * len)`; always in bounds for `len >= 1` and `fraction < 1`.
fn percentile_index(len: usize, fraction: f64) -> usize {
    (fraction * len as f64) as usize
}

impl fmt::Display for Percentiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} service times in minutes:", self.label)?;
        writeln!(f, " 10th %tile: {:.2}", self.p10)?;
        writeln!(f, " 50th %tile: {:.2}", self.p50)?;
        write!(f, " 90th %tile: {:.2}", self.p90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn index_is_floor_of_rank() {
        assert_eq!(percentile_index(1, 0.9), 0);
        assert_eq!(percentile_index(10, 0.1), 1);
        assert_eq!(percentile_index(10, 0.5), 5);
        assert_eq!(percentile_index(10, 0.9), 9);
        assert_eq!(percentile_index(7, 0.5), 3);
    }

    #[test]
    fn reads_sorted_values_in_minutes() {
        // unsorted on purpose
        let times = vec![600, 60, 300, 120, 540, 180, 480, 240, 420, 360];
        let p = Percentiles::from_service_times("Bank", &times).unwrap();

        assert_eq!(p.count, 10);
        assert_relative_eq!(p.p10, 2.0);
        assert_relative_eq!(p.p50, 6.0);
        assert_relative_eq!(p.p90, 10.0);
        assert_relative_eq!(p.summary(), 10.0);
    }

    #[test]
    fn single_sample_fills_every_percentile() {
        let p = Percentiles::from_service_times("Supermarket", &[90]).unwrap();
        assert_relative_eq!(p.p10, 1.5);
        assert_relative_eq!(p.p50, 1.5);
        assert_relative_eq!(p.p90, 1.5);
    }

    #[test]
    fn empty_sample_is_an_error() {
        match Percentiles::from_service_times("Bank", &[]) {
            Err(SimError::NoCompletedEvents { label }) => assert_eq!(label, "Bank"),
            other => panic!("Expected NoCompletedEvents, got {:?}", other),
        }
    }

    #[test]
    fn display_uses_two_decimals() {
        let p = Percentiles::from_service_times("Bank", &[61, 125, 3600]).unwrap();
        assert_eq!(
            p.to_string(),
            "Bank service times in minutes:\n 10th %tile: 1.02\n 50th %tile: 2.08\n 90th %tile: 60.00"
        );
    }
}
