use super::common::*;

use crate::workflows::procurement::domain::RfpId;
use crate::workflows::procurement::recommendation::{
    compare_and_recommend, ALTERNATIVE_NOTE, NO_PROPOSALS_MESSAGE,
};
use crate::workflows::procurement::scoring::ScoringEngine;

fn rfp_id() -> RfpId {
    RfpId("rfp-test".to_string())
}

#[test]
fn empty_batch_has_no_recommendation() {
    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &[]);

    assert_eq!(result.total_proposals, 0);
    assert!(result.proposals.is_empty());
    assert!(result.recommendation.is_none());
    assert_eq!(result.message.as_deref(), Some(NO_PROPOSALS_MESSAGE));
}

#[test]
fn single_proposal_is_recommended_without_alternatives() {
    let proposals = vec![stored_proposal(1, "Solo Supply", offer_b())];

    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &proposals);

    let recommendation = result.recommendation.expect("recommendation present");
    assert_eq!(recommendation.recommended_vendor_name, "Solo Supply");
    assert!(recommendation.alternatives.is_empty());
    assert_eq!(result.proposals[0].rank, 1);
    assert!(result.message.is_none());
}

#[test]
fn reference_comparison_recommends_vendor_a() {
    let proposals = vec![
        stored_proposal(1, "Vendor B", offer_b()),
        stored_proposal(2, "Vendor A", offer_a()),
    ];

    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &proposals);

    assert_eq!(result.total_proposals, 2);
    let names: Vec<&str> = result
        .proposals
        .iter()
        .map(|ranked| ranked.vendor_name.as_str())
        .collect();
    assert_eq!(names, vec!["Vendor A", "Vendor B"]);
    assert_eq!(result.winner().map(|winner| winner.scores.overall), Some(96));

    let recommendation = result.recommendation.expect("recommendation present");
    assert_eq!(recommendation.overall_score, 96);
    assert_eq!(
        recommendation.decision,
        "Selected Vendor A with the highest overall score (96) driven by competitive pricing, \
         delivery timeline, warranty terms and support level."
    );
    assert_eq!(recommendation.alternatives.len(), 1);
    assert_eq!(recommendation.alternatives[0].vendor_name, "Vendor B");
    assert_eq!(recommendation.alternatives[0].score, 70);
    assert_eq!(recommendation.alternatives[0].why_consider, ALTERNATIVE_NOTE);
}

#[test]
fn exact_ties_keep_receipt_order() {
    let same = || proposal_data(Some(4_000.0), Some("3 weeks"), Some("12 months"), None);
    let proposals = vec![
        stored_proposal(1, "First In", same()),
        stored_proposal(2, "Second In", same()),
        stored_proposal(3, "Third In", same()),
    ];

    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &proposals);

    let order: Vec<(usize, &str)> = result
        .proposals
        .iter()
        .map(|ranked| (ranked.rank, ranked.vendor_name.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![(1, "First In"), (2, "Second In"), (3, "Third In")]
    );
}

#[test]
fn rounded_ties_keep_receipt_order_over_raw_scores() {
    // Raw overalls are 94.96 and 95.0; both round to 95.
    let proposals = vec![
        stored_proposal(
            1,
            "Slightly Dearer",
            proposal_data(Some(10_000.0), Some("3 weeks"), Some("12 months"), None),
        ),
        stored_proposal(
            2,
            "Slightly Cheaper",
            proposal_data(Some(9_990.0), Some("3 weeks"), Some("12 months"), None),
        ),
    ];

    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &proposals);

    let order: Vec<(usize, &str, u8)> = result
        .proposals
        .iter()
        .map(|ranked| (ranked.rank, ranked.vendor_name.as_str(), ranked.scores.overall))
        .collect();
    assert_eq!(
        order,
        vec![(1, "Slightly Dearer", 95), (2, "Slightly Cheaper", 95)]
    );
}

#[test]
fn lowest_price_earns_the_full_price_component() {
    let proposals = vec![
        stored_proposal(1, "Pricey", proposal_data(Some(7_500.0), Some("10 days"), None, None)),
        stored_proposal(2, "Budget", proposal_data(Some(5_000.0), Some("10 days"), None, None)),
        stored_proposal(3, "Middle", proposal_data(Some(6_000.0), Some("10 days"), None, None)),
    ];

    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &proposals);

    let budget = result
        .proposals
        .iter()
        .find(|ranked| ranked.vendor_name == "Budget")
        .expect("budget ranked");
    assert_eq!(budget.scores.price_score, 40);
    assert_eq!(budget.rank, 1);
    assert!(result
        .proposals
        .iter()
        .filter(|ranked| ranked.vendor_name != "Budget")
        .all(|ranked| ranked.scores.price_score < 40));
}

#[test]
fn balanced_winner_gets_generic_rationale() {
    let weak = proposal_data(None, None, None, None);
    let proposals = vec![stored_proposal(1, "Sparse Co", weak)];

    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &proposals);

    let recommendation = result.recommendation.expect("recommendation present");
    assert_eq!(
        recommendation.decision,
        "Selected Sparse Co with the highest overall score (5) reflecting a balanced set of \
         trade-offs."
    );
}

#[test]
fn csv_export_lists_rows_in_rank_order() {
    let proposals = vec![
        stored_proposal(1, "Vendor B", offer_b()),
        stored_proposal(2, "Vendor A", offer_a()),
    ];
    let result = compare_and_recommend(&ScoringEngine::default(), &rfp_id(), &proposals);

    let mut buffer = Vec::new();
    result.write_csv(&mut buffer).expect("csv written");
    let text = String::from_utf8(buffer).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("rank,vendor,proposal_id"));
    assert_eq!(lines[1], "1,Vendor A,proposal-002,9000,2 weeks,24 months,36,30,20,10,96");
    assert_eq!(lines[2], "2,Vendor B,proposal-001,8000,4 weeks,12 months,40,15,10,5,70");
}
