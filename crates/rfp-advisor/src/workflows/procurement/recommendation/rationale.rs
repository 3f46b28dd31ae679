use super::super::scoring::{ScoreAxis, ScoreProfile, ScoringConfig};
use super::RankedProposal;

/// Note attached to every non-winning proposal.
pub const ALTERNATIVE_NOTE: &str = "Competitive option with trade-offs";

/// Share of an axis maximum at which the axis counts as a strength of the winner.
const STRENGTH_THRESHOLD: f64 = 0.75;

/// One-line rationale for the recommended proposal, naming the axes that carried it.
pub fn decision_rationale(winner: &RankedProposal, config: &ScoringConfig) -> String {
    let strengths: Vec<&'static str> = ScoreAxis::ordered()
        .into_iter()
        .filter(|axis| {
            let max = winner.scores.profile.axis_max(*axis, config);
            max > 0.0 && f64::from(winner.scores.component(*axis)) / max >= STRENGTH_THRESHOLD
        })
        .map(|axis| axis_phrase(winner.scores.profile, axis))
        .collect();

    let drivers = if strengths.is_empty() {
        "reflecting a balanced set of trade-offs".to_string()
    } else {
        format!("driven by {}", join_phrases(&strengths))
    };

    format!(
        "Selected {} with the highest overall score ({}) {}.",
        winner.vendor_name, winner.scores.overall, drivers
    )
}

fn axis_phrase(profile: ScoreProfile, axis: ScoreAxis) -> &'static str {
    match (profile, axis) {
        (_, ScoreAxis::Price) => "competitive pricing",
        (_, ScoreAxis::Delivery) => "delivery timeline",
        (ScoreProfile::Batch, ScoreAxis::Compliance) => "warranty terms",
        (ScoreProfile::Absolute, ScoreAxis::Compliance) => "specification compliance",
        (_, ScoreAxis::Support) => "support level",
    }
}

fn join_phrases(phrases: &[&str]) -> String {
    match phrases {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_phrases_reads_naturally() {
        assert_eq!(join_phrases(&["pricing"]), "pricing");
        assert_eq!(join_phrases(&["pricing", "delivery"]), "pricing and delivery");
        assert_eq!(
            join_phrases(&["pricing", "delivery", "support"]),
            "pricing, delivery and support"
        );
    }
}
