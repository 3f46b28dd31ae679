use super::super::domain::{ProposalData, RequirementSet};
use super::config::ScoringConfig;
use super::duration::parse_duration_days;
use super::normalize::{clamp_score, usable, QualityNotes};
use super::AxisScores;

/// Score one proposal against the RFP's fixed baseline, each axis on a 0-100 scale.
pub(crate) fn score_against_baseline(
    requirements: &RequirementSet,
    data: &ProposalData,
    config: &ScoringConfig,
    notes: &mut QualityNotes,
) -> AxisScores {
    let price = price_score(requirements.budget_total, data.total_price(), config);
    let delivery = delivery_score(requirements, data, config);
    let compliance = compliance_score(data);
    let support = if config.has_premium_signal(data.support_level()) {
        config.premium_support_score
    } else {
        config.standard_support_score
    };

    AxisScores {
        price: clamp_score(notes.finite_or_zero("price", price)),
        delivery: clamp_score(notes.finite_or_zero("delivery", delivery)),
        compliance: clamp_score(notes.finite_or_zero("compliance", compliance)),
        support: clamp_score(notes.finite_or_zero("support", support)),
    }
}

/// Weighted overall on the unrounded axes.
pub(crate) fn weighted_overall(axes: &AxisScores, config: &ScoringConfig) -> f64 {
    let weights = &config.absolute;
    clamp_score(
        axes.price * weights.price
            + axes.delivery * weights.delivery
            + axes.compliance * weights.compliance
            + axes.support * weights.support,
    )
}

fn price_score(budget: Option<f64>, price: Option<f64>, config: &ScoringConfig) -> f64 {
    let Some(price) = price.filter(|price| usable(*price)) else {
        return 0.0;
    };

    match budget.filter(|budget| usable(*budget)) {
        Some(budget) => (budget / price).min(1.0) * 100.0,
        None => config.neutral_score,
    }
}

fn delivery_score(requirements: &RequirementSet, data: &ProposalData, config: &ScoringConfig) -> f64 {
    let Some(lead_days) = data.lead_time().and_then(parse_duration_days) else {
        return 0.0;
    };

    if let Some(required) = requirements.required_lead_time_days {
        if lead_days <= required {
            return 100.0;
        }
        return f64::from(required) / f64::from(lead_days) * 100.0;
    }

    match (requirements.delivery_deadline, data.estimated_date()) {
        (Some(deadline), Some(estimated)) if estimated <= deadline => 100.0,
        (Some(_), Some(_)) => 0.0,
        _ => config.neutral_score,
    }
}

fn compliance_score(data: &ProposalData) -> f64 {
    let Some(compliance) = &data.compliance else {
        return 0.0;
    };

    let matched = compliance.specs_matched.len();
    let total = matched + compliance.specs_not_matched.len();
    if total == 0 {
        return 0.0;
    }

    matched as f64 / total as f64 * 100.0
}
