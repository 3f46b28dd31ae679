use metrics_exporter_prometheus::PrometheusHandle;
use rfp_advisor::config::AppConfig;
use rfp_advisor::error::AppError;
use rfp_advisor::workflows::procurement::{
    parse_generated_payload, parse_oracle_payload, MailError, OracleError, OracleRequest,
    OracleResponse, OutboundMessage, ProcurementRepository, Proposal, ProposalId, ProposalOracle,
    RepositoryError, Rfp, RfpId, ScoringConfig, Vendor, VendorId, VendorMailer,
};
use serde_json::json;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

/// Process-local store. Vectors keep receipt order for proposal listings.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProcurementRepository {
    rfps: Arc<Mutex<Vec<Rfp>>>,
    vendors: Arc<Mutex<Vec<Vendor>>>,
    proposals: Arc<Mutex<Vec<Proposal>>>,
}

impl ProcurementRepository for InMemoryProcurementRepository {
    fn insert_rfp(&self, rfp: Rfp) -> Result<Rfp, RepositoryError> {
        let mut guard = lock(&self.rfps)?;
        if guard.iter().any(|existing| existing.id == rfp.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(rfp.clone());
        Ok(rfp)
    }

    fn update_rfp(&self, rfp: Rfp) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.rfps)?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == rfp.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = rfp;
        Ok(())
    }

    fn fetch_rfp(&self, id: &RfpId) -> Result<Option<Rfp>, RepositoryError> {
        Ok(lock(&self.rfps)?.iter().find(|rfp| &rfp.id == id).cloned())
    }

    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError> {
        Ok(lock(&self.rfps)?.clone())
    }

    fn insert_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError> {
        let mut guard = lock(&self.vendors)?;
        if guard
            .iter()
            .any(|existing| existing.email.eq_ignore_ascii_case(&vendor.email))
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(vendor.clone());
        Ok(vendor)
    }

    fn fetch_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError> {
        Ok(lock(&self.vendors)?
            .iter()
            .find(|vendor| &vendor.id == id)
            .cloned())
    }

    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Ok(lock(&self.vendors)?.clone())
    }

    fn insert_proposal(&self, proposal: Proposal) -> Result<Proposal, RepositoryError> {
        let mut guard = lock(&self.proposals)?;
        if guard.iter().any(|existing| {
            existing.rfp_id == proposal.rfp_id && existing.vendor_id == proposal.vendor_id
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(proposal.clone());
        Ok(proposal)
    }

    fn update_proposal(&self, proposal: Proposal) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.proposals)?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == proposal.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = proposal;
        Ok(())
    }

    fn fetch_proposal(&self, id: &ProposalId) -> Result<Option<Proposal>, RepositoryError> {
        Ok(lock(&self.proposals)?
            .iter()
            .find(|proposal| &proposal.id == id)
            .cloned())
    }

    fn proposals_for_rfp(&self, rfp_id: &RfpId) -> Result<Vec<Proposal>, RepositoryError> {
        Ok(lock(&self.proposals)?
            .iter()
            .filter(|proposal| &proposal.rfp_id == rfp_id)
            .cloned()
            .collect())
    }
}

/// Mail transport stand-in that logs and keeps every invitation.
#[derive(Default, Clone)]
pub(crate) struct LoggingMailer {
    outbox: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl VendorMailer for LoggingMailer {
    fn send(&self, message: OutboundMessage) -> Result<(), MailError> {
        info!(to = %message.to, subject = %message.subject, "rfp invitation queued");
        self.outbox
            .lock()
            .map_err(|_| MailError::Transport("outbox mutex poisoned".to_string()))?
            .push(message);
        Ok(())
    }
}

impl LoggingMailer {
    pub(crate) fn outbox(&self) -> Vec<OutboundMessage> {
        self.outbox
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Offline oracle: reads vendor replies written as proposal JSON and drafts deterministic
/// proposals seeded by the vendor name.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SimulatedOracle;

impl ProposalOracle for SimulatedOracle {
    fn generate_or_parse(&self, request: OracleRequest<'_>) -> Result<OracleResponse, OracleError> {
        match request {
            OracleRequest::ParseEmail { content, .. } => Ok(OracleResponse {
                raw_text: content.to_string(),
                data: parse_oracle_payload(content)?,
            }),
            OracleRequest::Generate { rfp, vendor } => {
                parse_generated_payload(&simulated_payload(rfp, vendor))
            }
        }
    }
}

fn simulated_payload(rfp: &Rfp, vendor: &Vendor) -> String {
    let seed = vendor
        .name
        .bytes()
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(u32::from(byte)));
    let requirements = &rfp.requirements;

    let budget = requirements.budget_total.unwrap_or(10_000.0);
    let price = (budget * (0.80 + f64::from(seed % 30) / 100.0)).round();
    let weeks = 1 + seed % 4;
    let warranty = requirements.required_warranty_months.unwrap_or(12) * (1 + seed % 2);
    let support = if seed % 3 == 0 {
        "24/7 premium support"
    } else {
        "Business hours standard support"
    };

    json!({
        "rawText": format!(
            "{} is pleased to quote {price} {} for {}, delivered in {weeks} weeks with a \
             {warranty} month warranty and {support}.",
            vendor.name, requirements.currency, rfp.title
        ),
        "parsedData": {
            "pricing": { "totalPrice": price, "currency": requirements.currency },
            "deliveryDetails": { "leadTime": format!("{weeks} weeks") },
            "terms": {
                "warranty": format!("{warranty} months"),
                "supportLevel": support,
            },
            "summaryByAI": format!("{} offer at {price} {}", vendor.name, requirements.currency),
        }
    })
    .to_string()
}

pub(crate) fn default_scoring_config(config: &AppConfig) -> ScoringConfig {
    config.scoring.scoring_config()
}

/// Scoring rubric from the environment, shared by every subcommand.
pub(crate) fn load_scoring_config() -> Result<ScoringConfig, AppError> {
    let config = AppConfig::load()?;
    Ok(default_scoring_config(&config))
}
