use crate::course::{CourseId, TrainingType};
use crate::error::EngineError;
use crate::key_stats::{self, KeyEvent, KeyStat};
use crate::stats::StatsSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One completed, timed practice attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillResult {
    pub course_id: CourseId,
    pub lesson_id: u32,
    pub practice_text: String,
    pub typed_text: String,
    pub key_events: Vec<KeyEvent>,
    pub start_time: DateTime<Utc>,
    pub finish_time: DateTime<Utc>,
    pub stats: StatsSnapshot,
    pub training_type: TrainingType,
}

/// A learner's full practice history.
///
/// The engine works on this as a value: the caller reads a snapshot from its
/// store, records a drill, and persists whatever comes back. `practice_stats`
/// is append-only and never reordered in storage; reporting sorts views only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PracticeLog {
    pub current_course_id: CourseId,
    pub current_lesson_id: u32,
    pub practice_stats: Vec<DrillResult>,
    pub key_stats: HashMap<char, KeyStat>,
    pub practice_duration_hours: u64,
}

impl PracticeLog {
    /// Fold a finished drill into the log: update the per-key aggregates from
    /// its key events, append the drill, and move the bookmark to its lesson.
    ///
    /// The drill must belong to the course the log is tracking; a mismatch is
    /// a caller bug, not a state to absorb silently.
    pub fn record_drill(&mut self, drill: DrillResult) -> Result<(), EngineError> {
        if drill.course_id != self.current_course_id {
            return Err(EngineError::InvalidArgument(format!(
                "drill for course {} recorded against log tracking course {}",
                drill.course_id, self.current_course_id
            )));
        }

        self.key_stats = key_stats::apply(&self.key_stats, &drill.key_events);
        self.current_lesson_id = drill.lesson_id;
        self.practice_stats.push(drill);
        Ok(())
    }
}
