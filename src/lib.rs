// Library surface for the lesson progression and typing statistics engine.
// Persistence, transport, and presentation live outside this crate; callers
// hand in snapshots (practice logs, course metadata) and persist what comes
// back.
pub mod catalog;
pub mod course;
pub mod error;
pub mod key_stats;
pub mod lesson;
pub mod practice_log;
pub mod report;
pub mod skill;
pub mod stats;
pub mod text_gen;

pub use error::EngineError;
pub use skill::SkillLevel;
pub use stats::StatsSnapshot;
