//! Core data models for the strategy assistant

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

/// The closed set of categories a query can be classified into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    StrategyGeneric,
    StrategyMovingAverage,
    StrategyAnalyze,
    StrategyOptimize,
    RiskManagement,
    Backtest,
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::Greeting,
        Intent::StrategyGeneric,
        Intent::StrategyMovingAverage,
        Intent::StrategyAnalyze,
        Intent::StrategyOptimize,
        Intent::RiskManagement,
        Intent::Backtest,
        Intent::Unknown,
    ];
}

/// Risk appetite used by the risk-advice lookup. Never derived from text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    /// Parse a raw level, degrading to `Medium` for anything unrecognized.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}

/// Which link of the specialization chain produced a classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Domain,
    GenericStrategy,
    Base,
}

/// How far down the specialization chain an assistant starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpecializationLevel {
    /// Raw substring matching on the lower-cased query, no domain layer.
    Simple,
    /// Tokenized, stop-word filtered matching, no domain layer.
    Nlp,
    /// Tokenized matching with the domain layer in front.
    #[default]
    Strategy,
}

impl SpecializationLevel {
    pub fn match_mode(&self) -> MatchMode {
        match self {
            SpecializationLevel::Simple => MatchMode::Substring,
            SpecializationLevel::Nlp | SpecializationLevel::Strategy => MatchMode::TokenSet,
        }
    }
}

impl std::str::FromStr for SpecializationLevel {
    type Err = crate::error::AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(SpecializationLevel::Simple),
            "nlp" => Ok(SpecializationLevel::Nlp),
            "strategy" => Ok(SpecializationLevel::Strategy),
            other => Err(crate::error::AssistantError::ConfigError(format!(
                "unknown specialization level '{}' (expected simple, nlp or strategy)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Substring,
    TokenSet,
}

//
// ================= Classification =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub layer: LayerKind,
}

//
// ================= Turn =================
//

/// Outcome of a single interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnReply {
    pub intent: Intent,
    pub layer: LayerKind,
    pub reply: String,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Greeting => "greeting",
            Intent::StrategyGeneric => "strategy_generic",
            Intent::StrategyMovingAverage => "strategy_moving_average",
            Intent::StrategyAnalyze => "strategy_analyze",
            Intent::StrategyOptimize => "strategy_optimize",
            Intent::RiskManagement => "risk_management",
            Intent::Backtest => "backtest",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayerKind::Domain => "domain",
            LayerKind::GenericStrategy => "generic_strategy",
            LayerKind::Base => "base",
        };
        write!(f, "{}", s)
    }
}
