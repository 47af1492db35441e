use thiserror::Error;

/// Errors surfaced by the engine.
///
/// `InvalidArgument` and `VocabularyNotFound` are contract violations and fail
/// fast. Catalog load failures (`SourceUnavailable`, `DeserializationError`)
/// degrade to an empty lesson list at the course layer; the first lesson
/// lookup against an empty catalog then reports `LessonNotFound`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no vocabulary entry for key set `{0}`")]
    VocabularyNotFound(String),

    #[error("lesson {0} not found in course")]
    LessonNotFound(u32),

    #[error("lesson source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("failed to deserialize lesson data: {0}")]
    DeserializationError(String),
}
