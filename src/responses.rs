//! Response dispatch
//!
//! Turns a classified intent into reply text. Everything here is pure except
//! greeting selection, which draws from an RNG.

use crate::models::{Intent, RiskLevel};
use rand::seq::SliceRandom;
use rand::Rng;

pub const GREETINGS: &[&str] = &[
    "Hello! How can I assist you with your trading strategies today?",
    "Hi there! Ready to optimize your trading strategies?",
    "Welcome! How can I help you with your trading goals?",
];

const MOVING_AVERAGE_REPLY: &str =
    "Moving Average strategy analysis: Fast MA crosses above/below Slow MA generate signals.";
const RISK_REPLY: &str =
    "Risk management is crucial. I recommend starting with 1-2% risk per trade.";
const OPTIMIZE_REPLY: &str =
    "Strategy optimization involves testing different parameter combinations.";
const BACKTEST_REPLY: &str =
    "Backtesting helps validate strategy performance using historical data.";
const STRATEGY_CLARIFY_REPLY: &str =
    "Let me help you analyze your trading strategy. Could you provide more details?";
const UNKNOWN_REPLY: &str = "I'm here to assist with trading strategies and risk management. Could you clarify your question?";

/// Reply for an intent.
///
/// With `params`, analysis and optimization replies are synthesized around
/// the caller's text, echoed as given. Every other intent ignores `params`.
pub fn respond(intent: Intent, params: Option<&str>) -> String {
    match (intent, params) {
        (Intent::StrategyAnalyze, Some(params)) => {
            format!("Analyzing strategy: {}. This feature is under development.", params)
        }
        (Intent::StrategyOptimize, Some(params)) => format!(
            "Optimizing strategy parameters: {}. This feature is under development.",
            params
        ),
        (intent, _) => static_reply(intent).to_string(),
    }
}

fn static_reply(intent: Intent) -> &'static str {
    match intent {
        Intent::Greeting => GREETINGS[0],
        Intent::StrategyMovingAverage => MOVING_AVERAGE_REPLY,
        Intent::RiskManagement => RISK_REPLY,
        Intent::StrategyOptimize => OPTIMIZE_REPLY,
        Intent::Backtest => BACKTEST_REPLY,
        Intent::StrategyGeneric | Intent::StrategyAnalyze => STRATEGY_CLARIFY_REPLY,
        Intent::Unknown => UNKNOWN_REPLY,
    }
}

/// Random greeting from the thread-local RNG.
pub fn greet() -> String {
    greet_with(&mut rand::thread_rng())
}

/// Random greeting from a caller-supplied RNG.
pub fn greet_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    GREETINGS
        .choose(rng)
        .copied()
        .unwrap_or(GREETINGS[0])
        .to_string()
}

impl RiskLevel {
    pub fn advice(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Conservative approach: 1% risk per trade recommended.",
            RiskLevel::Medium => "Balanced approach: 1-2% risk per trade suggested.",
            RiskLevel::High => {
                "Aggressive approach: Up to 3% risk per trade, but not recommended for beginners."
            }
        }
    }
}

/// Advice for a raw risk level; anything unrecognized gets `Medium`'s.
pub fn risk_advice(level: &str) -> &'static str {
    RiskLevel::parse_lenient(level).advice()
}

/// Direct entry point for a strategy review with free-form parameters.
pub fn analyze_strategy(params: &str) -> String {
    format!(
        "Analyzing strategy with parameters: {}. Looking for optimal entry and exit points.",
        params
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_static_templates() {
        assert!(respond(Intent::RiskManagement, None).contains("1-2% risk per trade"));
        assert!(respond(Intent::StrategyMovingAverage, None).starts_with("Moving Average"));
        assert!(respond(Intent::Backtest, None).contains("historical data"));
        assert_eq!(respond(Intent::Greeting, None), GREETINGS[0]);
        assert_eq!(
            respond(Intent::StrategyOptimize, None),
            "Strategy optimization involves testing different parameter combinations."
        );
    }

    #[test]
    fn test_clarification_prompts() {
        assert!(respond(Intent::StrategyGeneric, None).contains("Could you provide more details?"));
        assert!(respond(Intent::Unknown, None).contains("Could you clarify your question?"));
    }

    #[test]
    fn test_parameterized_replies_echo_verbatim() {
        let reply = respond(Intent::StrategyOptimize, Some("period=14"));
        assert!(reply.contains("Optimizing"));
        assert!(reply.contains("period=14"));

        let raw = "<script>fast=10; slow=50</script>";
        let reply = respond(Intent::StrategyAnalyze, Some(raw));
        assert_eq!(
            reply,
            format!("Analyzing strategy: {}. This feature is under development.", raw)
        );
    }

    #[test]
    fn test_params_ignored_for_fixed_intents() {
        assert_eq!(
            respond(Intent::RiskManagement, Some("ignored")),
            respond(Intent::RiskManagement, None)
        );
    }

    #[test]
    fn test_greeting_is_member_of_fixed_set() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let greeting = greet_with(&mut rng);
            assert!(GREETINGS.contains(&greeting.as_str()));
        }
        assert!(GREETINGS.contains(&greet().as_str()));
    }

    #[test]
    fn test_greeting_covers_all_entries() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: std::collections::HashSet<String> = (0..300).map(|_| greet_with(&mut rng)).collect();
        assert_eq!(seen.len(), GREETINGS.len());
    }

    #[test]
    fn test_risk_advice_defaults_to_medium() {
        assert_eq!(risk_advice("nonsense"), risk_advice("medium"));
        assert_eq!(risk_advice(""), RiskLevel::Medium.advice());
        assert!(risk_advice("low").contains("1% risk"));
        assert!(risk_advice("High").contains("Up to 3%"));
    }

    #[test]
    fn test_analyze_strategy() {
        let reply = analyze_strategy("fast=10, slow=50");
        assert!(reply.contains("fast=10, slow=50"));
        assert!(reply.ends_with("optimal entry and exit points."));
    }
}
