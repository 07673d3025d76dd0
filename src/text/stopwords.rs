//! Stop-word resources
//!
//! The stop-word set is loaded once at process start and shared read-only.
//! A missing resource is a startup failure: normalizing layers refuse to come
//! up rather than classify with a different vocabulary.

use crate::error::AssistantError;
use crate::Result;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Embedded English list. Contraction shards ("ma", "ll", "ve", ...) are left
/// out so indicator abbreviations survive filtering.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "can", "will", "just", "don't", "should", "should've", "now", "aren't",
    "couldn't", "didn't", "doesn't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "needn't", "shan't", "shouldn't", "wasn't", "weren't",
    "won't", "wouldn't",
];

/// Immutable stop-word set plus a fingerprint of its contents.
#[derive(Debug, Clone)]
pub struct StopWordSet {
    words: HashSet<String>,
    version: String,
}

impl StopWordSet {
    /// Build a set from raw words; entries are lower-cased and trimmed.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let version = fingerprint(&words);
        Self { words, version }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// SHA-256 over the sorted word list, hex encoded.
    pub fn version(&self) -> &str {
        &self.version
    }
}

fn fingerprint(words: &HashSet<String>) -> String {
    let mut sorted: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    for word in sorted {
        hasher.update(word.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// Source of stop words for a language.
pub trait StopWordProvider: Send + Sync {
    fn load(&self, language: &str) -> Result<StopWordSet>;
}

/// Compiled-in English list.
pub struct BuiltinStopWords;

impl StopWordProvider for BuiltinStopWords {
    fn load(&self, language: &str) -> Result<StopWordSet> {
        match language.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(StopWordSet::new(ENGLISH_STOP_WORDS.iter())),
            other => Err(AssistantError::StopWordsUnavailable(format!(
                "no built-in stop words for language '{}'",
                other
            ))),
        }
    }
}

/// Reads one word per line. Blank lines and `#` comments are skipped.
pub struct FileStopWords {
    path: PathBuf,
}

impl FileStopWords {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StopWordProvider for FileStopWords {
    fn load(&self, language: &str) -> Result<StopWordSet> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AssistantError::StopWordsUnavailable(format!(
                "failed to read {} stop words from {}: {}",
                language,
                self.path.display(),
                e
            ))
        })?;

        let set = StopWordSet::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );

        if set.is_empty() {
            return Err(AssistantError::StopWordsUnavailable(format!(
                "stop-word file {} contains no words",
                self.path.display()
            )));
        }

        Ok(set)
    }
}

// Process-wide stop words, installed once at startup
static STOP_WORDS: OnceLock<Arc<StopWordSet>> = OnceLock::new();

/// Load and install the process-wide stop-word set.
///
/// The first successful call wins; later calls return the installed set.
pub fn init_stop_words(provider: &dyn StopWordProvider, language: &str) -> Result<Arc<StopWordSet>> {
    if let Some(existing) = STOP_WORDS.get() {
        return Ok(existing.clone());
    }

    let loaded = Arc::new(provider.load(language)?);
    let installed = STOP_WORDS.get_or_init(|| loaded.clone());

    if installed.version() != loaded.version() {
        warn!(
            "Stop words already installed (version {}), ignoring reload",
            installed.version()
        );
    } else {
        info!(
            language = language,
            words = installed.len(),
            version = %installed.version(),
            "Stop words loaded"
        );
    }

    Ok(installed.clone())
}

/// The installed stop-word set, or an error if startup never loaded one.
pub fn installed_stop_words() -> Result<Arc<StopWordSet>> {
    STOP_WORDS.get().cloned().ok_or_else(|| {
        AssistantError::StopWordsUnavailable("stop words were not initialized".to_string())
    })
}
