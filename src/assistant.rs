//! Strategy assistant
//!
//! Ties normalization, classification and response dispatch into a single
//! turn handler. One assistant is built at startup and shared read-only; a
//! turn keeps no state after it returns.

use crate::classifier::{ClassifierInput, IntentClassifier};
use crate::config::AssistantConfig;
use crate::models::{LayerKind, MatchMode, RiskLevel, SpecializationLevel, TurnReply};
use crate::responses;
use crate::text::{
    init_stop_words, BuiltinStopWords, FileStopWords, Normalizer, StopWordProvider, StopWordSet,
};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub struct StrategyAssistant {
    classifier: IntentClassifier,
    /// Present for every level that matches on tokens
    normalizer: Option<Normalizer>,
    default_risk_level: RiskLevel,
}

impl StrategyAssistant {
    /// Substring-matching assistant. Needs no stop words.
    pub fn simple() -> Self {
        Self {
            classifier: IntentClassifier::new(SpecializationLevel::Simple),
            normalizer: None,
            default_risk_level: RiskLevel::Medium,
        }
    }

    /// Build an assistant for `level`, using `stop_words` when it tokenizes.
    pub fn new(level: SpecializationLevel, stop_words: Arc<StopWordSet>) -> Self {
        let normalizer = match level.match_mode() {
            MatchMode::Substring => None,
            MatchMode::TokenSet => Some(Normalizer::new(stop_words)),
        };

        Self {
            classifier: IntentClassifier::new(level),
            normalizer,
            default_risk_level: RiskLevel::Medium,
        }
    }

    /// Build from configuration, loading the process-wide stop words first
    /// when the level needs them. A missing stop-word resource fails here.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let mut assistant = match config.level.match_mode() {
            MatchMode::Substring => Self::simple(),
            MatchMode::TokenSet => {
                let provider: Box<dyn StopWordProvider> = match &config.stop_words_path {
                    Some(path) => Box::new(FileStopWords::new(path)),
                    None => Box::new(BuiltinStopWords),
                };
                let stop_words = init_stop_words(provider.as_ref(), &config.stop_words_language)?;
                Self::new(config.level, stop_words)
            }
        };
        assistant.default_risk_level = config.default_risk_level;

        info!(
            level = ?config.level,
            default_risk_level = %config.default_risk_level,
            "Strategy assistant ready"
        );

        Ok(assistant)
    }

    pub fn level(&self) -> SpecializationLevel {
        self.classifier.level()
    }

    /// Normalize, classify and answer one query.
    ///
    /// `params` only reach the reply when the domain layer claimed the query
    /// and they are not blank.
    pub fn respond_to(&self, query: &str, params: &str) -> TurnReply {
        let classification = match &self.normalizer {
            Some(normalizer) => {
                let tokens = normalizer.normalize(query, true);
                self.classifier
                    .classify_detailed(ClassifierInput::Tokens(&tokens))
            }
            None => {
                let lowered = query.to_lowercase();
                self.classifier
                    .classify_detailed(ClassifierInput::Text(&lowered))
            }
        };

        let params = match classification.layer {
            LayerKind::Domain => Some(params).filter(|p| !p.trim().is_empty()),
            _ => None,
        };

        debug!(
            intent = %classification.intent,
            layer = %classification.layer,
            "Classified query"
        );

        TurnReply {
            intent: classification.intent,
            layer: classification.layer,
            reply: responses::respond(classification.intent, params),
        }
    }

    pub fn handle_turn(&self, query: &str, params: &str) -> String {
        self.respond_to(query, params).reply
    }

    pub fn greet(&self) -> String {
        responses::greet()
    }

    /// Level a raw risk argument resolves to; the configured default when absent.
    pub fn resolve_risk_level(&self, level: Option<&str>) -> RiskLevel {
        level.map_or(self.default_risk_level, RiskLevel::parse_lenient)
    }

    pub fn risk_advice(&self, level: Option<&str>) -> &'static str {
        self.resolve_risk_level(level).advice()
    }

    pub fn analyze_strategy(&self, params: &str) -> String {
        responses::analyze_strategy(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intent;

    fn strategy_assistant() -> StrategyAssistant {
        let stop_words = Arc::new(BuiltinStopWords.load("english").unwrap());
        StrategyAssistant::new(SpecializationLevel::Strategy, stop_words)
    }

    #[test]
    fn test_risk_scenario() {
        let reply = strategy_assistant().handle_turn("Can you help me with risk management?", "");
        assert!(reply.contains("1-2% risk per trade"));

        let reply = StrategyAssistant::simple().handle_turn("Can you help me with risk management?", "");
        assert!(reply.contains("1-2% risk per trade"));
    }

    #[test]
    fn test_optimize_scenario_embeds_params() {
        let reply = strategy_assistant().handle_turn("optimize my strategy parameters", "period=14");
        assert!(reply.contains("Optimizing"));
        assert!(reply.contains("period=14"));
    }

    #[test]
    fn test_generic_optimize_ignores_params() {
        let stop_words = Arc::new(BuiltinStopWords.load("english").unwrap());
        let nlp = StrategyAssistant::new(SpecializationLevel::Nlp, stop_words);

        let turn = nlp.respond_to("parameter optimization", "period=14");
        assert_eq!(turn.intent, Intent::StrategyOptimize);
        assert_eq!(turn.layer, LayerKind::GenericStrategy);
        assert!(!turn.reply.contains("period=14"));
    }

    #[test]
    fn test_domain_override() {
        let turn = strategy_assistant().respond_to("please analyze my strategy", "fast=10");
        assert_eq!(turn.intent, Intent::StrategyAnalyze);
        assert_eq!(turn.reply, "Analyzing strategy: fast=10. This feature is under development.");
    }

    #[test]
    fn test_domain_turn_without_params() {
        let assistant = strategy_assistant();

        let turn = assistant.respond_to("please analyze my strategy", "");
        assert_eq!(turn.layer, LayerKind::Domain);
        assert_eq!(turn.reply, responses::respond(Intent::StrategyAnalyze, None));
        assert!(!turn.reply.contains("Analyzing strategy: ."));

        let reply = assistant.handle_turn("optimize it", "  ");
        assert_eq!(reply, responses::respond(Intent::StrategyOptimize, None));
    }

    #[test]
    fn test_stop_word_only_query() {
        let turn = strategy_assistant().respond_to("what is the", "");
        assert_eq!(turn.intent, Intent::Unknown);
        assert_eq!(turn.layer, LayerKind::Base);
    }

    #[test]
    fn test_simple_assistant_has_no_normalizer() {
        let simple = StrategyAssistant::simple();
        assert_eq!(simple.level(), SpecializationLevel::Simple);
        assert!(simple.normalizer.is_none());

        // substring matching finds "ma" inside "management"
        let turn = simple.respond_to("Share your strategy for risk management", "");
        assert_eq!(turn.intent, Intent::StrategyMovingAverage);
    }

    #[test]
    fn test_risk_advice_default() {
        let assistant = strategy_assistant();
        assert_eq!(assistant.risk_advice(None), RiskLevel::Medium.advice());
        assert_eq!(assistant.risk_advice(Some("nonsense")), assistant.risk_advice(Some("medium")));
        assert_eq!(assistant.resolve_risk_level(Some(" HIGH ")), RiskLevel::High);
        assert_eq!(assistant.resolve_risk_level(Some("nonsense")), RiskLevel::Medium);
    }

    #[test]
    fn test_from_config_simple_skips_stop_words() {
        let config = AssistantConfig {
            level: SpecializationLevel::Simple,
            stop_words_path: Some("/nonexistent/stopwords.txt".into()),
            default_risk_level: RiskLevel::Low,
            ..AssistantConfig::default()
        };
        let assistant = StrategyAssistant::from_config(&config).unwrap();
        assert_eq!(assistant.risk_advice(None), RiskLevel::Low.advice());
    }
}
