/// Data-quality findings collected while scoring a single proposal.
#[derive(Debug, Default)]
pub(crate) struct QualityNotes {
    notes: Vec<String>,
}

impl QualityNotes {
    /// Coerce a non-finite component to 0, recording which axis produced it.
    pub(crate) fn finite_or_zero(&mut self, axis: &str, value: f64) -> f64 {
        if value.is_finite() {
            value
        } else {
            self.notes
                .push(format!("{axis} produced a non-finite value and was scored 0"));
            0.0
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub(crate) fn join(&self) -> String {
        self.notes.join("; ")
    }
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub(crate) fn round_score(value: f64) -> u8 {
    clamp_score(value).round() as u8
}

/// Ratio of the best observed value to `value` for lower-is-better axes.
///
/// Missing, zero, negative or infinite inputs yield 0.
pub(crate) fn lower_is_better(best: f64, value: f64) -> f64 {
    if !usable(value) || !usable(best) {
        return 0.0;
    }
    best / value
}

/// Ratio of `value` to the best observed value for higher-is-better axes.
pub(crate) fn higher_is_better(best: f64, value: f64) -> f64 {
    if !usable(best) || !value.is_finite() || value < 0.0 {
        return 0.0;
    }
    value / best
}

/// Positive finite numbers are the only values a ratio can be built from.
pub(crate) fn usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
