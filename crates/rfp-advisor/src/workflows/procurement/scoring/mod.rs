mod absolute;
mod batch;
mod config;
pub mod duration;
mod normalize;
mod reasoning;

pub use config::{default_premium_signals, AbsoluteWeights, BatchCaps, ScoringConfig};
pub use duration::{parse_duration_days, parse_leading_integer};

use super::domain::{ProposalData, RequirementSet};
use batch::{BatchExtremes, BatchInputs};
use normalize::{clamp_score, round_score, QualityNotes};
use serde::{Deserialize, Serialize};

/// The two scoring strategies.
///
/// `Absolute` scores one proposal against the RFP baseline with weighted 0-100 axes.
/// `Batch` scores proposals relative to the best in their batch, with the compliance axis
/// carrying a warranty ratio. The two are not expected to agree for the same proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreProfile {
    Absolute,
    Batch,
}

impl ScoreProfile {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreProfile::Absolute => "absolute",
            ScoreProfile::Batch => "batch",
        }
    }

    /// Highest value a displayed sub-score can reach under this profile.
    pub fn axis_max(self, axis: ScoreAxis, config: &ScoringConfig) -> f64 {
        match (self, axis) {
            (ScoreProfile::Absolute, _) => 100.0,
            (ScoreProfile::Batch, ScoreAxis::Price) => config.batch.price,
            (ScoreProfile::Batch, ScoreAxis::Delivery) => config.batch.delivery,
            (ScoreProfile::Batch, ScoreAxis::Compliance) => config.batch.warranty,
            (ScoreProfile::Batch, ScoreAxis::Support) => config.batch.premium_support,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAxis {
    Price,
    Delivery,
    Compliance,
    Support,
}

impl ScoreAxis {
    pub const fn ordered() -> [Self; 4] {
        [Self::Price, Self::Delivery, Self::Compliance, Self::Support]
    }
}

/// Unrounded per-axis scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AxisScores {
    pub price: f64,
    pub delivery: f64,
    pub compliance: f64,
    pub support: f64,
}

impl AxisScores {
    fn sum(&self) -> f64 {
        self.price + self.delivery + self.compliance + self.support
    }
}

/// Scores attached to a proposal once the engine has run.
///
/// Sub-scores are rounded for display; `overall` is computed from the unrounded values and
/// rounded once. Under `Batch`, `compliance_score` holds the warranty ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub profile: ScoreProfile,
    pub price_score: u8,
    pub delivery_score: u8,
    pub compliance_score: u8,
    pub support_score: u8,
    pub overall: u8,
    pub reasoning: String,
}

impl ScoreResult {
    pub fn component(&self, axis: ScoreAxis) -> u8 {
        match axis {
            ScoreAxis::Price => self.price_score,
            ScoreAxis::Delivery => self.delivery_score,
            ScoreAxis::Compliance => self.compliance_score,
            ScoreAxis::Support => self.support_score,
        }
    }

    fn from_axes(profile: ScoreProfile, axes: &AxisScores, overall: f64) -> Self {
        Self {
            profile,
            price_score: round_score(axes.price),
            delivery_score: round_score(axes.delivery),
            compliance_score: round_score(axes.compliance),
            support_score: round_score(axes.support),
            overall: round_score(overall),
            reasoning: String::new(),
        }
    }
}

/// Stateless scorer applying a [`ScoringConfig`] to proposals.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Absolute mode: score a single proposal against the RFP baseline, independent of
    /// any sibling proposals.
    pub fn score_proposal(&self, requirements: &RequirementSet, data: &ProposalData) -> ScoreResult {
        let mut notes = QualityNotes::default();
        let axes = absolute::score_against_baseline(requirements, data, &self.config, &mut notes);
        let overall = absolute::weighted_overall(&axes, &self.config);

        let mut result = ScoreResult::from_axes(ScoreProfile::Absolute, &axes, overall);
        result.reasoning = reasoning::absolute_reasoning(&result, &notes);
        result
    }

    /// Batch mode: score every proposal relative to the best of the batch. Results are
    /// returned in input order.
    pub fn score_batch<'a, I>(&self, proposals: I) -> Vec<ScoreResult>
    where
        I: IntoIterator<Item = &'a ProposalData>,
    {
        let proposals: Vec<&ProposalData> = proposals.into_iter().collect();
        let inputs: Vec<BatchInputs> = proposals
            .iter()
            .map(|data| BatchInputs::extract(data, &self.config))
            .collect();
        let extremes = BatchExtremes::across(&inputs);

        proposals
            .iter()
            .zip(&inputs)
            .map(|(data, input)| {
                let mut notes = QualityNotes::default();
                let axes = batch::score_relative(input, &extremes, &self.config, &mut notes);
                let overall = clamp_score(axes.sum());

                let mut result = ScoreResult::from_axes(ScoreProfile::Batch, &axes, overall);
                result.reasoning = reasoning::batch_reasoning(data, &notes);
                result
            })
            .collect()
    }
}
