use super::common::*;
use chrono::NaiveDate;

use crate::workflows::procurement::domain::{DeliveryDetails, ProposalData, RequirementSet};
use crate::workflows::procurement::scoring::{ScoreProfile, ScoringConfig, ScoringEngine};

#[test]
fn batch_scoring_matches_reference_comparison() {
    let engine = ScoringEngine::default();
    let (a, b) = (offer_a(), offer_b());

    let scores = engine.score_batch([&a, &b]);

    let first = &scores[0];
    assert_eq!(first.profile, ScoreProfile::Batch);
    assert_eq!(first.price_score, 36);
    assert_eq!(first.delivery_score, 30);
    assert_eq!(first.compliance_score, 20);
    assert_eq!(first.support_score, 10);
    assert_eq!(first.overall, 96);

    let second = &scores[1];
    assert_eq!(second.price_score, 40);
    assert_eq!(second.delivery_score, 15);
    assert_eq!(second.compliance_score, 10);
    assert_eq!(second.support_score, 5);
    assert_eq!(second.overall, 70);
}

#[test]
fn batch_reasoning_names_the_inputs() {
    let engine = ScoringEngine::default();
    let (a, b) = (offer_a(), offer_b());

    let scores = engine.score_batch([&a, &b]);

    assert_eq!(
        scores[0].reasoning,
        "Evaluated based on pricing (9000), delivery (2 weeks), and warranty (24 months)."
    );
}

#[test]
fn missing_total_price_scores_zero_on_price_axis() {
    let engine = ScoringEngine::default();
    let priced = offer_b();
    let unpriced = ProposalData {
        pricing: None,
        ..offer_a()
    };

    let batch = engine.score_batch([&unpriced, &priced]);
    assert_eq!(batch[0].price_score, 0);
    assert_eq!(batch[1].price_score, 40);
    assert!(batch[0].reasoning.contains("pricing (n/a)"));

    let absolute = engine.score_proposal(&requirements(), &unpriced);
    assert_eq!(absolute.price_score, 0);
}

#[test]
fn batch_without_any_usable_value_scores_only_support() {
    let engine = ScoringEngine::default();
    let empty = ProposalData::default();
    let zero = proposal_data(Some(0.0), Some("0 days"), None, Some("standard"));

    let scores = engine.score_batch([&empty, &zero]);

    for result in &scores {
        assert_eq!(result.price_score, 0);
        assert_eq!(result.delivery_score, 0);
        assert_eq!(result.compliance_score, 0);
        assert_eq!(result.support_score, 5);
        assert_eq!(result.overall, 5);
    }
}

#[test]
fn non_finite_price_degrades_to_worst_case() {
    let engine = ScoringEngine::default();
    let broken = proposal_data(Some(f64::NAN), Some("2 weeks"), None, None);
    let sane = proposal_data(Some(1_000.0), Some("2 weeks"), None, None);

    let scores = engine.score_batch([&broken, &sane]);

    assert_eq!(scores[0].price_score, 0);
    assert_eq!(scores[1].price_score, 40);
    assert_eq!(engine.score_proposal(&requirements(), &broken).price_score, 0);
}

#[test]
fn scoring_is_idempotent() {
    let engine = ScoringEngine::default();
    let (a, b) = (offer_a(), offer_b());

    assert_eq!(
        engine.score_proposal(&requirements(), &a),
        engine.score_proposal(&requirements(), &a)
    );
    assert_eq!(engine.score_batch([&a, &b]), engine.score_batch([&a, &b]));
}

#[test]
fn absolute_scoring_uses_the_rfp_baseline() {
    let engine = ScoringEngine::default();

    let a = engine.score_proposal(&requirements(), &offer_a());
    assert_eq!(a.profile, ScoreProfile::Absolute);
    assert_eq!(
        (a.price_score, a.delivery_score, a.compliance_score, a.support_score),
        (100, 100, 100, 100)
    );
    assert_eq!(a.overall, 100);

    let b = engine.score_proposal(&requirements(), &offer_b());
    assert_eq!(
        (b.price_score, b.delivery_score, b.compliance_score, b.support_score),
        (100, 75, 50, 50)
    );
    // 30 + 18.75 + 17.5 + 5
    assert_eq!(b.overall, 71);
    assert_eq!(
        b.reasoning,
        "Price: 100/100 | Delivery: 75/100 | Compliance: 50/100 | Support: 50/100"
    );
}

#[test]
fn absolute_price_scales_with_budget_overrun() {
    let engine = ScoringEngine::default();
    let over_budget = proposal_data(Some(12_500.0), Some("1 week"), None, None);

    let result = engine.score_proposal(&requirements(), &over_budget);

    assert_eq!(result.price_score, 80);
}

#[test]
fn absolute_scoring_is_neutral_without_a_baseline() {
    let engine = ScoringEngine::default();
    let open = RequirementSet::default();
    let data = proposal_data(Some(5_000.0), Some("10 days"), None, None);

    let result = engine.score_proposal(&open, &data);

    assert_eq!(result.price_score, 50);
    assert_eq!(result.delivery_score, 50);
    assert_eq!(result.compliance_score, 0);
}

#[test]
fn absolute_delivery_falls_back_to_deadline() {
    let engine = ScoringEngine::default();
    let deadline = NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid date");
    let requirements = RequirementSet {
        delivery_deadline: Some(deadline),
        ..RequirementSet::default()
    };

    let early = ProposalData {
        delivery_details: Some(DeliveryDetails {
            lead_time: Some("3 weeks".to_string()),
            estimated_date: NaiveDate::from_ymd_opt(2025, 3, 20),
            ..DeliveryDetails::default()
        }),
        ..ProposalData::default()
    };
    let late = ProposalData {
        delivery_details: Some(DeliveryDetails {
            lead_time: Some("8 weeks".to_string()),
            estimated_date: NaiveDate::from_ymd_opt(2025, 5, 15),
            ..DeliveryDetails::default()
        }),
        ..ProposalData::default()
    };

    assert_eq!(engine.score_proposal(&requirements, &early).delivery_score, 100);
    assert_eq!(engine.score_proposal(&requirements, &late).delivery_score, 0);
}

#[test]
fn configured_premium_signals_drive_support_scores() {
    let engine = ScoringEngine::new(ScoringConfig::default().with_premium_signals(["gold"]));
    let gold = proposal_data(Some(1_000.0), Some("1 week"), None, Some("Gold tier"));
    let premium = proposal_data(Some(1_000.0), Some("1 week"), None, Some("Premium"));

    let scores = engine.score_batch([&gold, &premium]);

    assert_eq!(scores[0].support_score, 10);
    assert_eq!(scores[1].support_score, 5);
    assert_eq!(engine.score_proposal(&requirements(), &gold).support_score, 100);
}
