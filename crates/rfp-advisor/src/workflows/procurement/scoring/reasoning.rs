use super::super::domain::ProposalData;
use super::normalize::QualityNotes;
use super::ScoreResult;

pub(crate) fn absolute_reasoning(result: &ScoreResult, notes: &QualityNotes) -> String {
    let base = format!(
        "Price: {}/100 | Delivery: {}/100 | Compliance: {}/100 | Support: {}/100",
        result.price_score, result.delivery_score, result.compliance_score, result.support_score
    );
    with_quality_notes(base, notes)
}

pub(crate) fn batch_reasoning(data: &ProposalData, notes: &QualityNotes) -> String {
    let pricing = data
        .total_price()
        .map(|price| price.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let delivery = data.lead_time().unwrap_or("n/a");
    let warranty = data.warranty().unwrap_or("n/a");

    let base = format!(
        "Evaluated based on pricing ({pricing}), delivery ({delivery}), and warranty ({warranty})."
    );
    with_quality_notes(base, notes)
}

fn with_quality_notes(base: String, notes: &QualityNotes) -> String {
    if notes.is_empty() {
        base
    } else {
        format!("{base} Data quality: {}.", notes.join())
    }
}
