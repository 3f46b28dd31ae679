//! Contract with the external language-model service that writes or reads proposals.
//!
//! Providers are swappable behind [`ProposalOracle`]; the rest of the crate only relies on
//! the [`ProposalData`] schema they return.

use serde::Deserialize;

use super::domain::{ProposalData, Rfp, Vendor};

/// What the oracle is asked to do for a vendor on an RFP.
#[derive(Debug, Clone, Copy)]
pub enum OracleRequest<'a> {
    /// Extract structured proposal data from a vendor's reply.
    ParseEmail {
        rfp: &'a Rfp,
        vendor: &'a Vendor,
        content: &'a str,
    },
    /// Draft a simulated proposal on the vendor's behalf.
    Generate { rfp: &'a Rfp, vendor: &'a Vendor },
}

impl<'a> OracleRequest<'a> {
    pub fn rfp(&self) -> &'a Rfp {
        match *self {
            OracleRequest::ParseEmail { rfp, .. } | OracleRequest::Generate { rfp, .. } => rfp,
        }
    }

    pub fn vendor(&self) -> &'a Vendor {
        match *self {
            OracleRequest::ParseEmail { vendor, .. } | OracleRequest::Generate { vendor, .. } => {
                vendor
            }
        }
    }

    /// Provider-independent prompt context describing the request.
    pub fn brief(&self) -> String {
        let rfp = self.rfp();
        let requirements = &rfp.requirements;
        let items = requirements
            .required_items
            .iter()
            .map(|item| format!("{} x {}", item.name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        let budget = requirements
            .budget_total
            .map(|total| format!("{total} {}", requirements.currency))
            .unwrap_or_else(|| "not stated".to_string());
        let warranty = requirements
            .required_warranty_months
            .map(|months| format!("{months} months"))
            .unwrap_or_else(|| "not stated".to_string());

        let context = format!(
            "Vendor: {}\nRFP: {}\nItems: {}\nBudget: {}\nWarranty required: {}",
            self.vendor().name,
            rfp.title,
            if items.is_empty() { "none listed" } else { items.as_str() },
            budget,
            warranty
        );

        match self {
            OracleRequest::ParseEmail { content, .. } => {
                format!("{context}\n\nParse this vendor proposal email:\n\n{content}")
            }
            OracleRequest::Generate { .. } => {
                format!("{context}\n\nRespond to this RFP as the vendor.")
            }
        }
    }
}

/// Oracle output: the prose it worked from or wrote, plus the structured data.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleResponse {
    pub raw_text: String,
    pub data: ProposalData,
}

/// Capability that turns proposal context into structured data.
pub trait ProposalOracle: Send + Sync {
    fn generate_or_parse(&self, request: OracleRequest<'_>) -> Result<OracleResponse, OracleError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("proposal oracle unavailable: {0}")]
    Unavailable(String),
    #[error("proposal oracle returned an empty response")]
    Empty,
    #[error("proposal oracle returned malformed proposal data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Deserialize the proposal JSON an oracle returned, tolerating markdown code fences.
pub fn parse_oracle_payload(raw: &str) -> Result<ProposalData, OracleError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(OracleError::Empty);
    }
    Ok(serde_json::from_str(cleaned)?)
}

/// Deserialize a generated proposal: `{ rawText, parsedData, .. }`.
///
/// Any scores the oracle attached are discarded; scoring is always recomputed locally.
pub fn parse_generated_payload(raw: &str) -> Result<OracleResponse, OracleError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Generated {
        #[serde(default)]
        raw_text: String,
        parsed_data: ProposalData,
    }

    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(OracleError::Empty);
    }
    let generated: Generated = serde_json::from_str(cleaned)?;
    Ok(OracleResponse {
        raw_text: generated.raw_text,
        data: generated.parsed_data,
    })
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}
