use crate::error::EngineError;
use include_dir::{include_dir, Dir};
use rand::Rng;
use std::collections::HashMap;

static DATA_DIR: Dir = include_dir!("src/data");

/// Words restricted to exact key sets, keyed by the concatenation of the
/// set's tokens in teaching order ("asdf", "asdfj", ...).
///
/// Lookup is strict equality on that concatenation, not a subset search:
/// introducing a new key to a course requires a new vocabulary entry under
/// the longer key string.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: HashMap<String, Vec<String>>,
}

impl Vocabulary {
    /// The vocabulary shipped with the crate (`src/data/vocabulary.json`).
    pub fn builtin() -> Result<Self, EngineError> {
        let file = DATA_DIR
            .get_file("vocabulary.json")
            .ok_or_else(|| EngineError::SourceUnavailable("vocabulary.json".into()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| EngineError::DeserializationError("vocabulary.json is not utf-8".into()))?;
        let words = serde_json::from_str(contents)
            .map_err(|e| EngineError::DeserializationError(e.to_string()))?;
        Ok(Self { words })
    }

    pub fn from_entries<I, K, W>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<W>)>,
        K: Into<String>,
        W: Into<String>,
    {
        let words = entries
            .into_iter()
            .map(|(k, ws)| (k.into(), ws.into_iter().map(Into::into).collect()))
            .collect();
        Self { words }
    }

    /// Candidate words for an exact key set, by canonical concatenation.
    pub fn words_for(&self, target_keys: &[String]) -> Result<&[String], EngineError> {
        let key_set = target_keys.concat();
        self.words
            .get(&key_set)
            .map(|v| v.as_slice())
            .ok_or(EngineError::VocabularyNotFound(key_set))
    }
}

/// Build a practice string of at most `max_len` characters for a key set.
///
/// The text opens with 1-5 "drill fragments" (random 2-4 token runs from the
/// target set, space-separated) and is then padded with whole words sampled
/// from the vocabulary until the next word would overflow. The fragment phase
/// also stops rather than overflow, keeping the length bound hard.
///
/// The rng is injected so callers can share one source per request and tests
/// can seed it.
pub fn generate(
    target_keys: &[String],
    max_len: usize,
    vocab: &Vocabulary,
    rng: &mut impl Rng,
) -> Result<String, EngineError> {
    if target_keys.is_empty() {
        return Err(EngineError::InvalidArgument(
            "target key set is empty".into(),
        ));
    }
    let words = vocab.words_for(target_keys)?;

    let mut text = String::new();

    let fragment_count = rng.gen_range(1..=5);
    for _ in 0..fragment_count {
        let token_count = rng.gen_range(2..=4);
        let mut fragment = String::new();
        for _ in 0..token_count {
            let token = &target_keys[rng.gen_range(0..target_keys.len())];
            fragment.push_str(token);
        }

        let needed = fragment.len() + if text.is_empty() { 0 } else { 1 };
        if text.len() + needed > max_len {
            break;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&fragment);
    }

    while text.len() < max_len {
        let word = &words[rng.gen_range(0..words.len())];
        if text.len() + word.len() + 1 > max_len {
            break;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word);
    }

    Ok(text)
}
