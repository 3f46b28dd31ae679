use serde::{Deserialize, Serialize};

/// Weights applied to the four 0-100 sub-scores in absolute mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteWeights {
    pub price: f64,
    pub delivery: f64,
    pub compliance: f64,
    pub support: f64,
}

impl Default for AbsoluteWeights {
    fn default() -> Self {
        Self {
            price: 0.30,
            delivery: 0.25,
            compliance: 0.35,
            support: 0.10,
        }
    }
}

/// Maximum points per axis in batch mode. The caps sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCaps {
    pub price: f64,
    pub delivery: f64,
    pub warranty: f64,
    pub premium_support: f64,
    pub standard_support: f64,
}

impl Default for BatchCaps {
    fn default() -> Self {
        Self {
            price: 40.0,
            delivery: 30.0,
            warranty: 20.0,
            premium_support: 10.0,
            standard_support: 5.0,
        }
    }
}

/// Rubric configuration shared by both scoring profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub absolute: AbsoluteWeights,
    pub batch: BatchCaps,
    /// Absolute-mode support score when a premium signal is present.
    pub premium_support_score: f64,
    /// Absolute-mode support score otherwise.
    pub standard_support_score: f64,
    /// Score used when the RFP carries no baseline for an axis.
    pub neutral_score: f64,
    /// Case-insensitive phrases marking premium support, e.g. "24/7".
    pub premium_support_signals: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            absolute: AbsoluteWeights::default(),
            batch: BatchCaps::default(),
            premium_support_score: 100.0,
            standard_support_score: 50.0,
            neutral_score: 50.0,
            premium_support_signals: default_premium_signals(),
        }
    }
}

pub fn default_premium_signals() -> Vec<String> {
    ["premium", "24/7", "24x7"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl ScoringConfig {
    /// Replace the premium signals, keeping the defaults when none survive trimming.
    pub fn with_premium_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cleaned: Vec<String> = signals
            .into_iter()
            .map(|signal| signal.as_ref().trim().to_ascii_lowercase())
            .filter(|signal| !signal.is_empty())
            .collect();

        if !cleaned.is_empty() {
            self.premium_support_signals = cleaned;
        }
        self
    }

    pub fn has_premium_signal(&self, support_level: Option<&str>) -> bool {
        let Some(text) = support_level else {
            return false;
        };
        let lowered = text.to_ascii_lowercase();
        self.premium_support_signals
            .iter()
            .any(|signal| lowered.contains(&signal.to_ascii_lowercase()))
    }
}
