//! Text handling
//!
//! Stop-word resources and query normalization feeding the classifier.

pub mod normalizer;
pub mod stopwords;

pub use normalizer::{Normalizer, TokenSequence};
pub use stopwords::{
    init_stop_words, installed_stop_words, BuiltinStopWords, FileStopWords, StopWordProvider,
    StopWordSet,
};
