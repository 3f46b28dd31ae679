mod export;
mod rationale;

pub use rationale::{decision_rationale, ALTERNATIVE_NOTE};

use super::domain::{Proposal, ProposalId, RfpId, VendorId};
use super::scoring::{ScoreResult, ScoringEngine};
use serde::{Deserialize, Serialize};

pub const NO_PROPOSALS_MESSAGE: &str = "No proposals available for comparison";

/// A proposal annotated with its batch score and 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProposal {
    pub rank: usize,
    pub proposal_id: ProposalId,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub total_price: Option<f64>,
    pub lead_time: Option<String>,
    pub warranty: Option<String>,
    pub scores: ScoreResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub vendor_name: String,
    pub score: u8,
    pub why_consider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommended_vendor_name: String,
    pub overall_score: u8,
    pub decision: String,
    pub alternatives: Vec<Alternative>,
}

/// Outcome of comparing every proposal received for one RFP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub rfp_id: RfpId,
    pub total_proposals: usize,
    pub proposals: Vec<RankedProposal>,
    pub recommendation: Option<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComparisonResult {
    pub fn empty(rfp_id: RfpId) -> Self {
        Self {
            rfp_id,
            total_proposals: 0,
            proposals: Vec::new(),
            recommendation: None,
            message: Some(NO_PROPOSALS_MESSAGE.to_string()),
        }
    }

    pub fn winner(&self) -> Option<&RankedProposal> {
        self.proposals.first()
    }
}

/// Batch-score `proposals`, rank them and recommend the best.
///
/// `proposals` must be in receipt order: ranking is a stable sort on the rounded overall
/// score, so exact ties keep that order. An empty slice yields [`ComparisonResult::empty`].
pub fn compare_and_recommend(
    engine: &ScoringEngine,
    rfp_id: &RfpId,
    proposals: &[Proposal],
) -> ComparisonResult {
    if proposals.is_empty() {
        return ComparisonResult::empty(rfp_id.clone());
    }

    let scores = engine.score_batch(proposals.iter().map(|proposal| &proposal.data));

    let mut order: Vec<usize> = (0..proposals.len()).collect();
    order.sort_by(|a, b| scores[*b].overall.cmp(&scores[*a].overall));

    let ranked: Vec<RankedProposal> = order
        .into_iter()
        .enumerate()
        .map(|(position, index)| {
            let proposal = &proposals[index];
            RankedProposal {
                rank: position + 1,
                proposal_id: proposal.id.clone(),
                vendor_id: proposal.vendor_id.clone(),
                vendor_name: proposal.vendor_name.clone(),
                total_price: proposal.data.total_price(),
                lead_time: proposal.data.lead_time().map(str::to_string),
                warranty: proposal.data.warranty().map(str::to_string),
                scores: scores[index].clone(),
            }
        })
        .collect();

    let recommendation = ranked.split_first().map(|(winner, rest)| Recommendation {
        recommended_vendor_name: winner.vendor_name.clone(),
        overall_score: winner.scores.overall,
        decision: decision_rationale(winner, engine.config()),
        alternatives: rest
            .iter()
            .map(|alternative| Alternative {
                vendor_name: alternative.vendor_name.clone(),
                score: alternative.scores.overall,
                why_consider: ALTERNATIVE_NOTE.to_string(),
            })
            .collect(),
    });

    ComparisonResult {
        rfp_id: rfp_id.clone(),
        total_proposals: ranked.len(),
        proposals: ranked,
        recommendation,
        message: None,
    }
}
