use crate::models::{MatchingCriteria, PartialMatchingCriteria};
use thiserror::Error;

/// Allowed deviation of the weight total from 100
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// Reasons a set of matching criteria is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("{category} percentage must be a number between 0 and 100")]
    OutOfRange { category: &'static str, value: f64 },

    #[error("Matching criteria must sum to 100%. Current total: {total}%")]
    BadTotal { total: f64 },
}

impl MatchingCriteria {
    /// Check every weight is within [0, 100] and that they sum to 100
    ///
    /// Range errors are reported before the total, for the first offending
    /// category in declaration order.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        for (category, value) in self.entries() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(CriteriaError::OutOfRange { category, value });
            }
        }

        let total = self.total();
        if (total - 100.0).abs() > TOTAL_TOLERANCE {
            return Err(CriteriaError::BadTotal { total: round_total(total) });
        }

        Ok(())
    }
}

/// Merge the provided weights over the defaults and validate the result
pub fn resolve_criteria(partial: &PartialMatchingCriteria) -> Result<MatchingCriteria, CriteriaError> {
    let merged = partial.merge_over(MatchingCriteria::default());
    merged.validate()?;
    Ok(merged)
}

// Float sums like 33.3 + 33.3 + 33.4 print with noise otherwise.
fn round_total(total: f64) -> f64 {
    (total * 1e6).round() / 1e6
}
