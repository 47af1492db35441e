use serde::{Deserialize, Serialize};

/// One unit of practice inside a course.
///
/// `practice_text` is regenerated per attempt for beginner-style lessons and
/// authored in the lesson data for point-based courses. A lesson with
/// `is_course_complete` set is the terminal sentinel returned once a course
/// has no further lessons to offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u32,
    /// Key tokens this lesson drills, in teaching order ("a", "s", ...).
    pub target_keys: Vec<String>,
    pub instruction: String,
    /// Difficulty weight; non-decreasing across a course, ties broken by id.
    pub point: u32,
    pub description: Option<String>,
    pub practice_text: String,
    pub is_course_complete: bool,
}

impl Lesson {
    /// Terminal sentinel for a completed course, pinned at the lesson the
    /// learner finished on.
    pub fn course_complete(cur_lesson_id: u32, complete_text: &str) -> Self {
        Self {
            id: cur_lesson_id,
            target_keys: Vec::new(),
            instruction: complete_text.to_string(),
            point: 0,
            description: None,
            practice_text: String::new(),
            is_course_complete: true,
        }
    }
}

/// Raw lesson record as it appears in lesson data JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonRecord {
    pub id: u32,
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(rename = "practiceText", default)]
    pub practice_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub point: u32,
}

impl From<LessonRecord> for Lesson {
    fn from(record: LessonRecord) -> Self {
        Lesson {
            id: record.id,
            target_keys: record.target,
            instruction: record.instruction,
            point: record.point,
            description: if record.description.is_empty() {
                None
            } else {
                Some(record.description)
            },
            practice_text: record.practice_text,
            is_course_complete: false,
        }
    }
}
