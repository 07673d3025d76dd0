//! Forex Strategy Assistant
//!
//! A deterministic conversational assistant for trading-strategy questions:
//! - Normalizes free text (lower-casing, word segmentation, stop words)
//! - Classifies intent through an ordered chain of keyword rule tables
//! - Dispatches canned or templated replies
//! - Greets and gives risk advice
//!
//! TURN PIPELINE:
//! QUERY → NORMALIZE → CLASSIFY (domain → generic → base) → RESPOND

pub mod api;
pub mod assistant;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod responses;
pub mod text;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use assistant::StrategyAssistant;
pub use classifier::{ClassifierInput, IntentClassifier};
pub use config::AssistantConfig;
pub use text::{Normalizer, TokenSequence};
