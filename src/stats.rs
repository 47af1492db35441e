use serde::{Deserialize, Serialize};

/// A single words-per-minute / accuracy measurement.
///
/// Snapshots are compared with [`StatsSnapshot::dominates`], a partial order:
/// two snapshots can be incomparable (faster but sloppier, slower but
/// cleaner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub wpm: u32,
    /// Percentage in [0, 100].
    pub accuracy: f64,
}

impl StatsSnapshot {
    pub fn new(wpm: u32, accuracy: f64) -> Self {
        Self { wpm, accuracy }
    }

    /// True when `self` is at least as good as `other` on both axes.
    pub fn dominates(&self, other: &StatsSnapshot) -> bool {
        self.wpm >= other.wpm && self.accuracy >= other.accuracy
    }
}
