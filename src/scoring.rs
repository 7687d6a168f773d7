//! Scoring parameters for the flat-gap local alignment model.
//!
//! All three values are **magnitudes**: a match adds `match_reward`, a
//! mismatch subtracts `mismatch_penalty`, and every inserted or deleted
//! symbol subtracts `indel_penalty`.
use crate::common::MlstError;

/// Match/mismatch/indel scoring used by [`align`](crate::aligner::align).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringParams {
    /// Added when the two symbols are equal.
    pub match_reward: i32,
    /// Subtracted when the two symbols differ.
    pub mismatch_penalty: i32,
    /// Subtracted per gap position.
    pub indel_penalty: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self { match_reward: 2, mismatch_penalty: 2, indel_penalty: 1 }
    }
}

impl ScoringParams {
    /// Build validated parameters.
    pub fn new(match_reward: i32, mismatch_penalty: i32, indel_penalty: i32) -> Result<Self, MlstError> {
        let params = Self { match_reward, mismatch_penalty, indel_penalty };
        params.validate()?;
        Ok(params)
    }

    /// Reject values that break the magnitude convention.
    ///
    /// The aligner itself never calls this; scorers and the CLI do.
    pub fn validate(&self) -> Result<(), MlstError> {
        if self.match_reward <= 0 {
            return Err(MlstError::InvalidParameter {
                name: "match_reward",
                value: self.match_reward,
                reason: "must be positive",
            });
        }
        if self.mismatch_penalty < 0 {
            return Err(MlstError::InvalidParameter {
                name: "mismatch_penalty",
                value: self.mismatch_penalty,
                reason: "must be a non-negative magnitude",
            });
        }
        if self.indel_penalty < 0 {
            return Err(MlstError::InvalidParameter {
                name: "indel_penalty",
                value: self.indel_penalty,
                reason: "must be a non-negative magnitude",
            });
        }
        Ok(())
    }

    /// Score for aligning `x` against `y`.
    #[inline]
    pub fn pair(&self, x: char, y: char) -> i32 {
        if x == y { self.match_reward } else { 0i32.saturating_sub(self.mismatch_penalty) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_values() {
        let p = ScoringParams::default();
        assert_eq!((p.match_reward, p.mismatch_penalty, p.indel_penalty), (2, 2, 1));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_negative_magnitudes() {
        assert!(matches!(
            ScoringParams::new(2, -2, 1),
            Err(MlstError::InvalidParameter { name: "mismatch_penalty", .. })
        ));
        assert!(matches!(
            ScoringParams::new(2, 2, -1),
            Err(MlstError::InvalidParameter { name: "indel_penalty", .. })
        ));
        assert!(ScoringParams::new(0, 2, 1).is_err());
        assert!(ScoringParams::new(1, 0, 0).is_ok());
    }

    #[test]
    fn pair_subtracts_mismatch() {
        let p = ScoringParams::new(3, 2, 1).unwrap();
        assert_eq!(p.pair('A', 'A'), 3);
        assert_eq!(p.pair('A', 'C'), -2);
    }
}
