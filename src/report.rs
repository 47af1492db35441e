use crate::course::{Course, TrainingType};
use crate::key_stats::KeyEvent;
use crate::practice_log::PracticeLog;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;

/// Read-time view of one key's aggregate. All fields are derived here from
/// the stored raw sums; nothing in the practice log is mutated to produce a
/// report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySummary {
    pub key: char,
    /// Average press duration per correct press, ms. 0 with no correct press.
    pub type_speed: f64,
    /// Average latency per correct press, ms. 0 with no correct press.
    pub latency: f64,
    /// Percentage of correct presses. 0 when the key was never typed.
    pub accuracy: f64,
}

/// Per-key summaries for a learner, sorted by key.
pub fn key_summaries(log: &PracticeLog) -> Vec<KeySummary> {
    log.key_stats
        .values()
        .map(|stat| {
            let (type_speed, latency) = if stat.correct_count == 0 {
                (0.0, 0.0)
            } else {
                (
                    stat.total_press_duration_ms / stat.correct_count as f64,
                    stat.total_latency_ms / stat.correct_count as f64,
                )
            };
            let accuracy = if stat.typing_count == 0 {
                0.0
            } else {
                stat.correct_count as f64 / stat.typing_count as f64 * 100.0
            };
            KeySummary {
                key: stat.key,
                type_speed,
                latency,
                accuracy,
            }
        })
        .sorted_by_key(|s| s.key)
        .collect()
}

/// One row of a progress report, covering a single drill.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressRecord {
    pub training_type: TrainingType,
    pub course_name: String,
    pub date: DateTime<Utc>,
    pub overall_wpm: u32,
    pub overall_accuracy: f64,
    /// Keys whose grouped events averaged above 20 wpm in this drill.
    pub good_wpm_keys: usize,
    pub letter_wpm: u32,
    pub number_wpm: u32,
    pub symbol_wpm: u32,
}

/// Progress rows for every drill of the requested training type, in the
/// log's storage order.
pub fn progress_records(log: &PracticeLog, course: &Course, kind: TrainingType) -> Vec<ProgressRecord> {
    log.practice_stats
        .iter()
        .filter(|drill| match kind {
            TrainingType::Course => drill.training_type == TrainingType::Course,
            TrainingType::AllKeysTest | TrainingType::SpeedTest => matches!(
                drill.training_type,
                TrainingType::AllKeysTest | TrainingType::SpeedTest
            ),
        })
        .map(|drill| ProgressRecord {
            training_type: drill.training_type,
            course_name: course.name.clone(),
            date: drill.start_time,
            overall_wpm: drill.stats.wpm,
            overall_accuracy: drill.stats.accuracy,
            good_wpm_keys: good_wpm_keys(&drill.key_events),
            letter_wpm: key_class_wpm(&drill.key_events, |c| c.is_alphabetic()),
            number_wpm: key_class_wpm(&drill.key_events, |c| c.is_numeric()),
            symbol_wpm: key_class_wpm(&drill.key_events, |c| !c.is_alphanumeric()),
        })
        .collect()
}

/// Standard deviation of per-drill wpm, as a consistency signal.
/// None until the learner has at least one recorded drill.
pub fn wpm_consistency(log: &PracticeLog) -> Option<f64> {
    let samples: Vec<f64> = log
        .practice_stats
        .iter()
        .map(|d| d.stats.wpm as f64)
        .collect();
    if samples.is_empty() {
        return None;
    }

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let variance = samples
        .iter()
        .map(|v| {
            let diff = mean - v;
            diff * diff
        })
        .sum::<f64>()
        / samples.len() as f64;
    Some(variance.sqrt())
}

/// Count keys whose event span in this drill works out above 20 wpm
/// (words = characters / 5).
fn good_wpm_keys(events: &[KeyEvent]) -> usize {
    if events.len() < 2 {
        return 0;
    }

    events
        .iter()
        .into_group_map_by(|e| e.key)
        .values()
        .filter(|group| span_wpm(group.iter().copied()) > 20.0)
        .count()
}

/// Wpm over the events whose expected key matches the class predicate,
/// 0 when the class is absent or the span is degenerate.
fn key_class_wpm(events: &[KeyEvent], class: impl Fn(char) -> bool) -> u32 {
    let filtered: Vec<&KeyEvent> = events.iter().filter(|e| class(e.key)).collect();
    if filtered.is_empty() {
        return 0;
    }
    span_wpm(filtered.into_iter()) as u32
}

fn span_wpm<'a>(events: impl Iterator<Item = &'a KeyEvent>) -> f64 {
    let events: Vec<&KeyEvent> = events.collect();
    let (first, last) = match (events.first(), events.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return 0.0,
    };

    let minutes = (last.key_up_time - first.key_down_time).num_milliseconds() as f64 / 60_000.0;
    if minutes <= 0.0 {
        return 0.0;
    }
    (events.len() as f64 / 5.0) / minutes
}
