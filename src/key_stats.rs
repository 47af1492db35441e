use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One key press as captured by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The character the prompt expected.
    pub key: char,
    /// The character actually typed.
    pub typed_key: char,
    pub is_correct: bool,
    pub key_down_time: DateTime<Utc>,
    pub key_up_time: DateTime<Utc>,
    pub latency_ms: f64,
}

/// Running aggregate for one key.
///
/// Only raw sums are stored; averages are computed at read time. The stored
/// totals are never divided in place, so folding more events in later stays
/// safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyStat {
    pub key: char,
    pub typing_count: u64,
    pub correct_count: u64,
    pub total_press_duration_ms: f64,
    pub total_latency_ms: f64,
}

impl KeyStat {
    pub fn new(key: char) -> Self {
        Self {
            key,
            typing_count: 0,
            correct_count: 0,
            total_press_duration_ms: 0.0,
            total_latency_ms: 0.0,
        }
    }

    /// Mean latency across all presses of this key, 0 when never pressed.
    pub fn average_latency_ms(&self) -> f64 {
        if self.typing_count == 0 {
            0.0
        } else {
            self.total_latency_ms / self.typing_count as f64
        }
    }
}

/// Fold a batch of key events into per-key aggregates.
///
/// Pure transform: the prior mapping is left untouched and an updated copy is
/// returned, so callers can treat the mapping as a value in a
/// read-modify-write cycle. Applying the same batch twice accumulates twice;
/// this is deliberately not a set-like merge.
///
/// NUL and other control characters are skipped, matching what the input
/// capture layer can emit for dead keys.
pub fn apply(prior: &HashMap<char, KeyStat>, events: &[KeyEvent]) -> HashMap<char, KeyStat> {
    let mut updated = prior.clone();

    for event in events {
        if event.key == '\0' || event.key.is_control() {
            log::debug!("skipping control key event {:?}", event.key);
            continue;
        }

        let stat = updated
            .entry(event.key)
            .or_insert_with(|| KeyStat::new(event.key));

        stat.typing_count += 1;
        if event.is_correct {
            stat.correct_count += 1;
        }

        let press_ms = (event.key_up_time - event.key_down_time).num_milliseconds() as f64;
        stat.total_press_duration_ms += press_ms;
        stat.total_latency_ms += event.latency_ms;
    }

    updated
}
