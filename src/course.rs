use crate::catalog::{LessonCatalog, LessonSource};
use crate::error::EngineError;
use crate::lesson::Lesson;
use crate::skill::SkillLevel;
use crate::stats::StatsSnapshot;
use crate::text_gen::{self, Vocabulary};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub type CourseId = u32;

/// Lesson id 0 means "no lesson practiced yet"; real lessons start at 1.
pub const INITIAL_LESSON_ID: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum TrainingType {
    Course,
    AllKeysTest,
    SpeedTest,
}

/// Progression flavor of a course.
///
/// `Beginner` walks lessons strictly by id, gated on the course's target
/// stats. `AdvancedLevel` and `Practice` share point-based progression that
/// escalates difficulty once the learner classifies as Advanced or better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseKind {
    Beginner,
    AdvancedLevel,
    Practice,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseSetting {
    pub minutes: u32,
    pub target_stats: StatsSnapshot,
    pub new_keys_per_step: u32,
    pub practice_text_length: usize,
}

impl Default for CourseSetting {
    fn default() -> Self {
        Self {
            minutes: 0,
            target_stats: StatsSnapshot::new(0, 0.0),
            new_keys_per_step: 0,
            practice_text_length: 74,
        }
    }
}

/// A course with its cached lesson list. Immutable once built; the
/// progression methods are pure apart from drawing randomness for practice
/// text, so one instance can serve concurrent learners.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub kind: CourseKind,
    pub training_type: TrainingType,
    pub lessons: Vec<Lesson>,
    pub settings: CourseSetting,
    pub complete_text: String,
    pub description: String,
}

/// Outcome of the shared selection logic: the next lesson to practice, or
/// `Complete` when the course has nothing further to offer.
enum Selection<'a> {
    Next(&'a Lesson),
    Complete,
}

impl Course {
    /// Pick the lesson to practice next given the learner's latest stats.
    ///
    /// Returns the terminal sentinel (`is_course_complete` set) once the
    /// course is exhausted. Beginner lessons come back with freshly generated
    /// practice text for their target keys; point-based lessons keep their
    /// authored text.
    pub fn next_lesson(
        &self,
        cur_lesson_id: u32,
        stats: &StatsSnapshot,
        vocab: &Vocabulary,
        rng: &mut impl Rng,
    ) -> Result<Lesson, EngineError> {
        match self.select(cur_lesson_id, stats)? {
            Selection::Complete => Ok(Lesson::course_complete(cur_lesson_id, &self.complete_text)),
            Selection::Next(lesson) => {
                let mut lesson = lesson.clone();
                if self.kind == CourseKind::Beginner {
                    lesson.practice_text = text_gen::generate(
                        &lesson.target_keys,
                        self.settings.practice_text_length,
                        vocab,
                        rng,
                    )?;
                }
                Ok(lesson)
            }
        }
    }

    /// True when the selection logic would declare the course complete.
    /// Shares `select` with [`Course::next_lesson`] so the two can never
    /// disagree on the terminal state.
    pub fn is_completed(&self, cur_lesson_id: u32, stats: &StatsSnapshot) -> Result<bool, EngineError> {
        Ok(matches!(
            self.select(cur_lesson_id, stats)?,
            Selection::Complete
        ))
    }

    fn select(&self, cur_lesson_id: u32, stats: &StatsSnapshot) -> Result<Selection<'_>, EngineError> {
        match self.kind {
            CourseKind::Beginner => self.select_by_id(cur_lesson_id, stats),
            CourseKind::AdvancedLevel | CourseKind::Practice => {
                self.select_by_point(cur_lesson_id, stats)
            }
        }
    }

    /// Beginner progression: repeat the current lesson until the target stats
    /// are dominated, then step to the next id.
    fn select_by_id(
        &self,
        cur_lesson_id: u32,
        stats: &StatsSnapshot,
    ) -> Result<Selection<'_>, EngineError> {
        if stats.dominates(&self.settings.target_stats) {
            // Target met: step to the next id, or declare the course complete
            // when there is no such lesson.
            Ok(self
                .lesson_by_id(cur_lesson_id + 1)
                .map(Selection::Next)
                .unwrap_or(Selection::Complete))
        } else {
            self.lesson_by_id(cur_lesson_id)
                .map(Selection::Next)
                .ok_or(EngineError::LessonNotFound(cur_lesson_id))
        }
    }

    /// Point-based progression: escalate to a higher point once the learner
    /// classifies as Advanced or better, otherwise walk ids within the
    /// current point, repeating the current lesson when it is the last one at
    /// that point.
    fn select_by_point(
        &self,
        cur_lesson_id: u32,
        stats: &StatsSnapshot,
    ) -> Result<Selection<'_>, EngineError> {
        if cur_lesson_id == INITIAL_LESSON_ID {
            return Ok(self
                .lesson_by_id(1)
                .map(Selection::Next)
                .unwrap_or(Selection::Complete));
        }

        // Tolerant default: a stale id that is no longer in the catalog is
        // treated as point 1 rather than an error.
        let cur_point = self.lesson_by_id(cur_lesson_id).map(|l| l.point).unwrap_or(1);
        let skill = SkillLevel::classify(stats)?;

        let next = if skill >= SkillLevel::Advanced {
            self.lessons.iter().find(|l| l.point > cur_point)
        } else {
            self.lessons
                .iter()
                .find(|l| l.point == cur_point && l.id > cur_lesson_id)
                .or_else(|| {
                    self.lessons
                        .iter()
                        .find(|l| l.point == cur_point && l.id == cur_lesson_id)
                })
        };

        Ok(next.map(Selection::Next).unwrap_or(Selection::Complete))
    }

    fn lesson_by_id(&self, id: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }
}

/// Static description of a course before its lessons are loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDefinition {
    pub id: CourseId,
    pub name: String,
    pub kind: CourseKind,
    pub training_type: TrainingType,
    /// Opaque cache key handed to the lesson source.
    pub source_key: String,
    pub settings: CourseSetting,
    #[serde(default)]
    pub complete_text: String,
    #[serde(default)]
    pub description: String,
}

/// Builds ready-to-use courses by pulling lesson lists through a shared
/// catalog.
pub struct CourseFactory<S> {
    catalog: LessonCatalog<S>,
}

impl<S: LessonSource> CourseFactory<S> {
    pub fn new(catalog: LessonCatalog<S>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &LessonCatalog<S> {
        &self.catalog
    }

    /// Assemble a course from its definition.
    ///
    /// A failed lesson load degrades to an empty lesson list instead of
    /// failing the request; the first lesson lookup against the empty course
    /// then reports `LessonNotFound`, which callers surface as "course
    /// unavailable".
    pub fn build(&self, definition: &CourseDefinition) -> Course {
        let lessons = match self.catalog.get(&definition.source_key) {
            Ok(lessons) => lessons,
            Err(e) => {
                log::warn!(
                    "failed to load lessons for course {} from {}: {e}",
                    definition.name,
                    definition.source_key
                );
                Vec::new()
            }
        };

        Course {
            id: definition.id,
            name: definition.name.clone(),
            kind: definition.kind,
            training_type: definition.training_type,
            lessons,
            settings: definition.settings,
            complete_text: if definition.complete_text.is_empty() {
                "Congratulations, you have completed all lessons in this course.".to_string()
            } else {
                definition.complete_text.clone()
            },
            description: definition.description.clone(),
        }
    }
}
