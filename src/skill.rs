use crate::error::EngineError;
use crate::stats::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// Discrete skill tier derived from a wpm/accuracy snapshot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum SkillLevel {
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Classify a snapshot into a tier.
    ///
    /// Both axes are bucketed 1-5 and combined with accuracy weighted higher
    /// than raw speed (0.6 vs 0.4). Accuracy must be a percentage in
    /// [0, 100]; anything else is a contract violation.
    pub fn classify(stats: &StatsSnapshot) -> Result<SkillLevel, EngineError> {
        if !(0.0..=100.0).contains(&stats.accuracy) {
            return Err(EngineError::InvalidArgument(format!(
                "accuracy must be in [0, 100], got {}",
                stats.accuracy
            )));
        }

        let wpm_score: f64 = match stats.wpm {
            0..=29 => 1.0,
            30..=44 => 2.0,
            45..=59 => 3.0,
            60..=74 => 4.0,
            _ => 5.0,
        };

        let accuracy_score: f64 = if stats.accuracy < 80.0 {
            1.0
        } else if stats.accuracy < 85.0 {
            2.0
        } else if stats.accuracy < 90.0 {
            3.0
        } else if stats.accuracy < 95.0 {
            4.0
        } else {
            5.0
        };

        let composite = wpm_score * 0.4 + accuracy_score * 0.6;
        match composite {
            c if (1.0..=1.9).contains(&c) => Ok(SkillLevel::Beginner),
            c if (2.0..=2.9).contains(&c) => Ok(SkillLevel::Novice),
            c if (3.0..=3.9).contains(&c) => Ok(SkillLevel::Intermediate),
            c if (4.0..=4.9).contains(&c) => Ok(SkillLevel::Advanced),
            c if c >= 5.0 => Ok(SkillLevel::Expert),
            c => Err(EngineError::InvalidArgument(format!(
                "composite score {c} outside [1, 5]"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_zero_stats_is_beginner() {
        let level = SkillLevel::classify(&StatsSnapshot::new(0, 0.0)).unwrap();
        assert_eq!(level, SkillLevel::Beginner);
    }

    #[test]
    fn test_high_stats_is_expert() {
        let level = SkillLevel::classify(&StatsSnapshot::new(80, 98.0)).unwrap();
        assert_eq!(level, SkillLevel::Expert);
    }

    #[test]
    fn test_boundary_is_expert() {
        // wpm 75 and accuracy 95 both land in the top bucket: 0.4*5 + 0.6*5 = 5
        let level = SkillLevel::classify(&StatsSnapshot::new(75, 95.0)).unwrap();
        assert_eq!(level, SkillLevel::Expert);
    }

    #[test]
    fn test_accuracy_dominates_weighting() {
        // slow but very accurate: 0.4*1 + 0.6*5 = 3.4 -> Intermediate
        let level = SkillLevel::classify(&StatsSnapshot::new(10, 99.0)).unwrap();
        assert_eq!(level, SkillLevel::Intermediate);

        // fast but sloppy: 0.4*5 + 0.6*1 = 2.6 -> Novice
        let level = SkillLevel::classify(&StatsSnapshot::new(90, 50.0)).unwrap();
        assert_eq!(level, SkillLevel::Novice);
    }

    #[test]
    fn test_out_of_range_accuracy_rejected() {
        let result = SkillLevel::classify(&StatsSnapshot::new(40, 101.0));
        assert_matches!(result, Err(EngineError::InvalidArgument(_)));

        let result = SkillLevel::classify(&StatsSnapshot::new(40, -1.0));
        assert_matches!(result, Err(EngineError::InvalidArgument(_)));

        let result = SkillLevel::classify(&StatsSnapshot::new(40, f64::NAN));
        assert_matches!(result, Err(EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(SkillLevel::Beginner < SkillLevel::Novice);
        assert!(SkillLevel::Advanced < SkillLevel::Expert);
        assert!(SkillLevel::Expert >= SkillLevel::Advanced);
    }

    #[test]
    fn test_display() {
        assert_eq!(SkillLevel::Intermediate.to_string(), "Intermediate");
    }
}
