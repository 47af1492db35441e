use crate::error::EngineError;
use crate::lesson::{Lesson, LessonRecord};
use include_dir::{include_dir, Dir};
use std::collections::HashMap;
use std::sync::Mutex;

static DATA_DIR: Dir = include_dir!("src/data");

/// Supplies raw lesson records for an opaque source key.
///
/// Implementations own the I/O and the parsing into typed records; the
/// catalog never touches the filesystem or network itself.
pub trait LessonSource {
    fn load_lessons(&self, key: &str) -> Result<Vec<LessonRecord>, EngineError>;
}

/// Lesson source backed by the JSON files embedded in the crate
/// (`src/data/*.json`); the source key is the file name.
#[derive(Debug, Default)]
pub struct EmbeddedLessonSource;

impl LessonSource for EmbeddedLessonSource {
    fn load_lessons(&self, key: &str) -> Result<Vec<LessonRecord>, EngineError> {
        let file = DATA_DIR
            .get_file(key)
            .ok_or_else(|| EngineError::SourceUnavailable(key.to_string()))?;
        let contents = file.contents_utf8().ok_or_else(|| {
            EngineError::DeserializationError(format!("{key} is not valid utf-8"))
        })?;
        serde_json::from_str(contents).map_err(|e| EngineError::DeserializationError(e.to_string()))
    }
}

/// Cached lesson lists, one entry per source key.
///
/// The cache is the only shared mutable state in the engine. One mutex guards
/// the whole map; it is held for the check-and-populate only, never around
/// course-selection logic. Loads are rare and small, so a single lock is
/// enough and also guarantees that concurrent gets for the same uncached key
/// load exactly once.
pub struct LessonCatalog<S> {
    source: S,
    cache: Mutex<HashMap<String, Vec<Lesson>>>,
}

impl<S: LessonSource> LessonCatalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Lessons for a source key, loading and caching on first use.
    ///
    /// Returns a defensive copy; mutating it never touches the cached
    /// snapshot. Failed loads are not cached, so the next call retries.
    pub fn get(&self, key: &str) -> Result<Vec<Lesson>, EngineError> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = cache.get(key) {
            return Ok(cached.clone());
        }

        let lessons: Vec<Lesson> = self
            .source
            .load_lessons(key)?
            .into_iter()
            .map(Lesson::from)
            .collect();

        if !lessons.is_empty() {
            cache.insert(key.to_string(), lessons.clone());
        }
        Ok(lessons)
    }

    /// Drop every cached entry. Meant for tests and ops tooling after a data
    /// update, not for steady-state request handling.
    pub fn invalidate(&self) {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail,
            }
        }

        fn records() -> Vec<LessonRecord> {
            serde_json::from_str(
                r#"[
                    {"id": 1, "target": ["a", "s"], "point": 1},
                    {"id": 2, "target": ["a", "s", "d"], "point": 1}
                ]"#,
            )
            .unwrap()
        }
    }

    impl LessonSource for CountingSource {
        fn load_lessons(&self, key: &str) -> Result<Vec<LessonRecord>, EngineError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(EngineError::SourceUnavailable(key.to_string()))
            } else {
                Ok(Self::records())
            }
        }
    }

    #[test]
    fn test_first_get_loads_then_caches() {
        let catalog = LessonCatalog::new(CountingSource::new(false));

        let first = catalog.get("lessons.json").unwrap();
        let second = catalog.get("lessons.json").unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(catalog.source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_returned_copy_is_defensive() {
        let catalog = LessonCatalog::new(CountingSource::new(false));

        let mut lessons = catalog.get("lessons.json").unwrap();
        lessons.clear();

        assert_eq!(catalog.get("lessons.json").unwrap().len(), 2);
    }

    #[test]
    fn test_failed_load_not_cached() {
        let catalog = LessonCatalog::new(CountingSource::new(true));

        assert_matches!(
            catalog.get("missing.json"),
            Err(EngineError::SourceUnavailable(_))
        );
        assert_matches!(
            catalog.get("missing.json"),
            Err(EngineError::SourceUnavailable(_))
        );
        // both calls hit the source; errors never poison the cache
        assert_eq!(catalog.source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let catalog = LessonCatalog::new(CountingSource::new(false));

        catalog.get("lessons.json").unwrap();
        catalog.invalidate();
        catalog.get("lessons.json").unwrap();

        assert_eq!(catalog.source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_gets_load_once() {
        let catalog = Arc::new(LessonCatalog::new(CountingSource::new(false)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.get("lessons.json").unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 2);
        }
        assert_eq!(catalog.source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_embedded_source_round_trip() {
        let catalog = LessonCatalog::new(EmbeddedLessonSource);

        let lessons = catalog.get("beginner-course-lessons.json").unwrap();
        assert_eq!(lessons.len(), 5);
        assert_eq!(lessons[0].target_keys, vec!["a", "s", "d", "f"]);

        assert_matches!(
            catalog.get("no-such-course.json"),
            Err(EngineError::SourceUnavailable(_))
        );
    }
}
