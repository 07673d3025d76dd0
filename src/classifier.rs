//! Intent Classifier
//!
//! Maps a query onto exactly one `Intent` by walking a fixed chain of rule
//! tables, most specific layer first:
//! - Domain: strategy analysis and parameter optimization requests
//! - Generic strategy: strategy, risk, optimization and backtesting Q&A
//! - Base: always resolves to `Unknown`
//!
//! Within a layer rules are ordered and the first match wins. Classification
//! is total: every input, including empty text, yields an intent.

use crate::models::{Classification, Intent, LayerKind, MatchMode, SpecializationLevel};
use crate::text::TokenSequence;

/// One keyword rule. A match on `triggers` tries `refinements` in order and
/// falls back to `intent`.
#[derive(Debug)]
pub struct Rule {
    pub triggers: &'static [&'static str],
    pub intent: Intent,
    pub refinements: &'static [Rule],
}

/// A link of the specialization chain: its own rules plus the layer it
/// delegates to.
#[derive(Debug)]
pub struct Layer {
    pub kind: LayerKind,
    pub rules: &'static [Rule],
    pub next: Option<&'static Layer>,
}

// Rule tables, most specific rule first
const DOMAIN_RULES: &[Rule] = &[
    Rule {
        triggers: &["analyze", "analysis"],
        intent: Intent::StrategyAnalyze,
        refinements: &[],
    },
    Rule {
        triggers: &["optimize", "optimization"],
        intent: Intent::StrategyOptimize,
        refinements: &[],
    },
];

const GENERIC_RULES: &[Rule] = &[
    Rule {
        triggers: &["strategy"],
        intent: Intent::StrategyGeneric,
        refinements: &[Rule {
            triggers: &["ma", "moving average"],
            intent: Intent::StrategyMovingAverage,
            refinements: &[],
        }],
    },
    Rule {
        triggers: &["risk"],
        intent: Intent::RiskManagement,
        refinements: &[],
    },
    Rule {
        triggers: &["optimize", "optimization"],
        intent: Intent::StrategyOptimize,
        refinements: &[],
    },
    Rule {
        triggers: &["backtest", "testing"],
        intent: Intent::Backtest,
        refinements: &[],
    },
];

pub static BASE_LAYER: Layer = Layer {
    kind: LayerKind::Base,
    rules: &[],
    next: None,
};

pub static GENERIC_STRATEGY_LAYER: Layer = Layer {
    kind: LayerKind::GenericStrategy,
    rules: GENERIC_RULES,
    next: Some(&BASE_LAYER),
};

pub static DOMAIN_LAYER: Layer = Layer {
    kind: LayerKind::Domain,
    rules: DOMAIN_RULES,
    next: Some(&GENERIC_STRATEGY_LAYER),
};

impl Layer {
    /// This layer followed by everything it delegates to.
    pub fn chain(&'static self) -> impl Iterator<Item = &'static Layer> {
        std::iter::successors(Some(self), |layer| layer.next)
    }

    fn resolve(&self, input: &ClassifierInput<'_>) -> Option<Intent> {
        resolve_rules(self.rules, input)
    }
}

fn resolve_rules(rules: &[Rule], input: &ClassifierInput<'_>) -> Option<Intent> {
    rules
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| input.matches(t)))
        .map(|rule| resolve_rules(rule.refinements, input).unwrap_or(rule.intent))
}

/// What the classifier looks at: the raw lower-cased query or its tokens.
#[derive(Debug, Clone, Copy)]
pub enum ClassifierInput<'a> {
    /// Lower-cased query, matched by substring containment.
    Text(&'a str),
    /// Normalized tokens, matched by token membership.
    Tokens(&'a TokenSequence),
}

impl<'a> ClassifierInput<'a> {
    pub fn mode(&self) -> MatchMode {
        match self {
            ClassifierInput::Text(_) => MatchMode::Substring,
            ClassifierInput::Tokens(_) => MatchMode::TokenSet,
        }
    }

    /// Multi-word triggers match consecutive tokens in token mode.
    fn matches(&self, trigger: &str) -> bool {
        match self {
            ClassifierInput::Text(text) => text.contains(trigger),
            ClassifierInput::Tokens(tokens) => {
                if trigger.contains(' ') {
                    let words: Vec<&str> = trigger.split_whitespace().collect();
                    tokens.contains_run(&words)
                } else {
                    tokens.contains(trigger)
                }
            }
        }
    }
}

/// Classifier entered at the layer matching a specialization level
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier {
    level: SpecializationLevel,
}

impl IntentClassifier {
    pub fn new(level: SpecializationLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> SpecializationLevel {
        self.level
    }

    /// First layer consulted for this classifier's level.
    pub fn entry_layer(&self) -> &'static Layer {
        match self.level {
            SpecializationLevel::Simple | SpecializationLevel::Nlp => &GENERIC_STRATEGY_LAYER,
            SpecializationLevel::Strategy => &DOMAIN_LAYER,
        }
    }

    pub fn classify(&self, input: ClassifierInput<'_>) -> Intent {
        self.classify_detailed(input).intent
    }

    /// Classify and report which layer produced the intent.
    pub fn classify_detailed(&self, input: ClassifierInput<'_>) -> Classification {
        for layer in self.entry_layer().chain() {
            if let Some(intent) = layer.resolve(&input) {
                return Classification {
                    intent,
                    layer: layer.kind,
                };
            }
        }

        Classification {
            intent: Intent::Unknown,
            layer: LayerKind::Base,
        }
    }
}
