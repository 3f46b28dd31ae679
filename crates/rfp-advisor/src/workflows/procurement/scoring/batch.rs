use super::super::domain::ProposalData;
use super::config::ScoringConfig;
use super::duration::parse_leading_integer;
use super::normalize::{higher_is_better, lower_is_better, usable, QualityNotes};
use super::AxisScores;

/// Values a proposal contributes to batch scoring.
///
/// Missing, zero or unparsable prices and lead times become `f64::INFINITY` so they can
/// never be the batch minimum; a missing warranty becomes 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BatchInputs {
    pub price: f64,
    pub delivery_days: f64,
    pub warranty_months: f64,
    pub premium_support: bool,
}

impl BatchInputs {
    pub(crate) fn extract(data: &ProposalData, config: &ScoringConfig) -> Self {
        let price = data
            .total_price()
            .filter(|price| usable(*price))
            .unwrap_or(f64::INFINITY);
        let delivery_days = data
            .lead_time()
            .and_then(parse_leading_integer)
            .filter(|days| *days > 0)
            .map(f64::from)
            .unwrap_or(f64::INFINITY);
        let warranty_months = data
            .warranty()
            .and_then(parse_leading_integer)
            .map(f64::from)
            .unwrap_or(0.0);

        Self {
            price,
            delivery_days,
            warranty_months,
            premium_support: config.has_premium_signal(data.support_level()),
        }
    }
}

/// Best observed value per axis across the batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BatchExtremes {
    pub min_price: f64,
    pub min_delivery_days: f64,
    pub max_warranty_months: f64,
}

impl BatchExtremes {
    pub(crate) fn across(inputs: &[BatchInputs]) -> Self {
        inputs.iter().fold(
            Self {
                min_price: f64::INFINITY,
                min_delivery_days: f64::INFINITY,
                max_warranty_months: 0.0,
            },
            |extremes, input| Self {
                min_price: extremes.min_price.min(input.price),
                min_delivery_days: extremes.min_delivery_days.min(input.delivery_days),
                max_warranty_months: extremes.max_warranty_months.max(input.warranty_months),
            },
        )
    }
}

/// Score one proposal relative to the batch. Axes are already weighted by their caps.
pub(crate) fn score_relative(
    input: &BatchInputs,
    extremes: &BatchExtremes,
    config: &ScoringConfig,
    notes: &mut QualityNotes,
) -> AxisScores {
    let caps = &config.batch;

    let price = lower_is_better(extremes.min_price, input.price) * caps.price;
    let delivery = lower_is_better(extremes.min_delivery_days, input.delivery_days) * caps.delivery;
    let warranty =
        higher_is_better(extremes.max_warranty_months, input.warranty_months) * caps.warranty;
    let support = if input.premium_support {
        caps.premium_support
    } else {
        caps.standard_support
    };

    AxisScores {
        price: notes.finite_or_zero("price", price),
        delivery: notes.finite_or_zero("delivery", delivery),
        compliance: notes.finite_or_zero("warranty", warranty),
        support: notes.finite_or_zero("support", support),
    }
}
