use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::procurement::domain::{
    CommercialTerms, ComplianceSummary, DeliveryDetails, InboundEmail, Pricing, Proposal,
    ProposalData, ProposalId, ProposalStatus, RequiredItem, RequirementSet, Rfp, RfpDraft, RfpId,
    Vendor, VendorDraft, VendorId,
};
use crate::workflows::procurement::oracle::{
    parse_oracle_payload, OracleError, OracleRequest, OracleResponse, ProposalOracle,
};
use crate::workflows::procurement::outreach::{MailError, OutboundMessage, VendorMailer};
use crate::workflows::procurement::repository::{ProcurementRepository, RepositoryError};
use crate::workflows::procurement::scoring::ScoringConfig;
use crate::workflows::procurement::service::ProcurementService;

pub(super) fn requirements() -> RequirementSet {
    RequirementSet {
        budget_total: Some(10_000.0),
        required_lead_time_days: Some(21),
        required_items: vec![RequiredItem {
            name: "Laptop".to_string(),
            quantity: 20,
            specs: [("ram".to_string(), Value::from("16GB"))].into_iter().collect(),
        }],
        required_warranty_months: Some(12),
        delivery_location: Some("Austin HQ".to_string()),
        ..RequirementSet::default()
    }
}

pub(super) fn rfp_draft() -> RfpDraft {
    RfpDraft {
        title: "Office laptops".to_string(),
        description: Some("Refresh for the support team".to_string()),
        requirements: requirements(),
    }
}

pub(super) fn vendor_draft(name: &str, email: &str) -> VendorDraft {
    VendorDraft {
        name: name.to_string(),
        email: email.to_string(),
        contact_person: None,
        phone: None,
    }
}

pub(super) fn proposal_data(
    price: Option<f64>,
    lead_time: Option<&str>,
    warranty: Option<&str>,
    support_level: Option<&str>,
) -> ProposalData {
    ProposalData {
        pricing: Some(Pricing {
            total_price: price,
            ..Pricing::default()
        }),
        delivery_details: Some(DeliveryDetails {
            lead_time: lead_time.map(str::to_string),
            ..DeliveryDetails::default()
        }),
        terms: Some(CommercialTerms {
            warranty: warranty.map(str::to_string),
            support_level: support_level.map(str::to_string),
            ..CommercialTerms::default()
        }),
        compliance: None,
        summary: None,
    }
}

fn compliance(matched: &[&str], not_matched: &[&str]) -> ComplianceSummary {
    ComplianceSummary {
        specs_matched: matched.iter().map(|spec| spec.to_string()).collect(),
        specs_not_matched: not_matched.iter().map(|spec| spec.to_string()).collect(),
        additional_offerings: BTreeSet::new(),
    }
}

/// Vendor A of the reference comparison: pricier but faster, longer warranty, premium support.
pub(super) fn offer_a() -> ProposalData {
    ProposalData {
        compliance: Some(compliance(&["16GB RAM", "512GB SSD"], &[])),
        ..proposal_data(
            Some(9_000.0),
            Some("2 weeks"),
            Some("24 months"),
            Some("24/7 premium support"),
        )
    }
}

/// Vendor B of the reference comparison: cheapest, slower, standard support.
pub(super) fn offer_b() -> ProposalData {
    ProposalData {
        compliance: Some(compliance(&["16GB RAM"], &["512GB SSD"])),
        ..proposal_data(
            Some(8_000.0),
            Some("4 weeks"),
            Some("12 months"),
            Some("standard"),
        )
    }
}

pub(super) fn stored_proposal(index: u32, vendor_name: &str, data: ProposalData) -> Proposal {
    Proposal {
        id: ProposalId(format!("proposal-{index:03}")),
        rfp_id: RfpId("rfp-test".to_string()),
        vendor_id: VendorId(format!("vendor-{index:03}")),
        vendor_name: vendor_name.to_string(),
        raw_body: None,
        data,
        scores: None,
        status: ProposalStatus::Received,
        received_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 9, index, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn email_for(data: &ProposalData) -> InboundEmail {
    InboundEmail {
        text: Some(serde_json::to_string(data).expect("proposal serializes")),
        html: None,
        attachments: Vec::new(),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    rfps: Mutex<Vec<Rfp>>,
    vendors: Mutex<Vec<Vendor>>,
    proposals: Mutex<Vec<Proposal>>,
}

impl ProcurementRepository for MemoryRepository {
    fn insert_rfp(&self, rfp: Rfp) -> Result<Rfp, RepositoryError> {
        let mut guard = self.rfps.lock().expect("lock poisoned");
        if guard.iter().any(|existing| existing.id == rfp.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(rfp.clone());
        Ok(rfp)
    }

    fn update_rfp(&self, rfp: Rfp) -> Result<(), RepositoryError> {
        let mut guard = self.rfps.lock().expect("lock poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == rfp.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = rfp;
        Ok(())
    }

    fn fetch_rfp(&self, id: &RfpId) -> Result<Option<Rfp>, RepositoryError> {
        let guard = self.rfps.lock().expect("lock poisoned");
        Ok(guard.iter().find(|rfp| &rfp.id == id).cloned())
    }

    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError> {
        Ok(self.rfps.lock().expect("lock poisoned").clone())
    }

    fn insert_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError> {
        let mut guard = self.vendors.lock().expect("lock poisoned");
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
        let guard = self.vendors.lock().expect("lock poisoned");
        Ok(guard.iter().find(|vendor| &vendor.id == id).cloned())
    }

    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Ok(self.vendors.lock().expect("lock poisoned").clone())
    }

    fn insert_proposal(&self, proposal: Proposal) -> Result<Proposal, RepositoryError> {
        let mut guard = self.proposals.lock().expect("lock poisoned");
        if guard.iter().any(|existing| {
            existing.rfp_id == proposal.rfp_id && existing.vendor_id == proposal.vendor_id
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(proposal.clone());
        Ok(proposal)
    }

    fn update_proposal(&self, proposal: Proposal) -> Result<(), RepositoryError> {
        let mut guard = self.proposals.lock().expect("lock poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == proposal.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = proposal;
        Ok(())
    }

    fn fetch_proposal(&self, id: &ProposalId) -> Result<Option<Proposal>, RepositoryError> {
        let guard = self.proposals.lock().expect("lock poisoned");
        Ok(guard.iter().find(|proposal| &proposal.id == id).cloned())
    }

    fn proposals_for_rfp(&self, rfp_id: &RfpId) -> Result<Vec<Proposal>, RepositoryError> {
        let guard = self.proposals.lock().expect("lock poisoned");
        Ok(guard
            .iter()
            .filter(|proposal| &proposal.rfp_id == rfp_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ProcurementRepository for UnavailableRepository {
    fn insert_rfp(&self, _rfp: Rfp) -> Result<Rfp, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_rfp(&self, _rfp: Rfp) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_rfp(&self, _id: &RfpId) -> Result<Option<Rfp>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_vendor(&self, _vendor: Vendor) -> Result<Vendor, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_vendor(&self, _id: &VendorId) -> Result<Option<Vendor>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_proposal(&self, _proposal: Proposal) -> Result<Proposal, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_proposal(&self, _proposal: Proposal) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_proposal(&self, _id: &ProposalId) -> Result<Option<Proposal>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn proposals_for_rfp(&self, _rfp_id: &RfpId) -> Result<Vec<Proposal>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingMailer {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingMailer {
    pub(super) fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("lock poisoned").clone()
    }
}

impl VendorMailer for RecordingMailer {
    fn send(&self, message: OutboundMessage) -> Result<(), MailError> {
        if message.to.ends_with("@bounce.test") {
            return Err(MailError::Rejected(message.to));
        }
        self.sent.lock().expect("lock poisoned").push(message);
        Ok(())
    }
}

/// Oracle that parses inbound emails as proposal JSON and answers generation requests from
/// a per-vendor script.
#[derive(Default)]
pub(super) struct ScriptedOracle {
    generated: Mutex<HashMap<String, ProposalData>>,
    calls: Mutex<usize>,
}

impl ScriptedOracle {
    pub(super) fn script(&self, vendor_name: &str, data: ProposalData) {
        self.generated
            .lock()
            .expect("lock poisoned")
            .insert(vendor_name.to_string(), data);
    }

    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("lock poisoned")
    }
}

impl ProposalOracle for ScriptedOracle {
    fn generate_or_parse(&self, request: OracleRequest<'_>) -> Result<OracleResponse, OracleError> {
        *self.calls.lock().expect("lock poisoned") += 1;
        match request {
            OracleRequest::ParseEmail { content, .. } => Ok(OracleResponse {
                raw_text: content.to_string(),
                data: parse_oracle_payload(content)?,
            }),
            OracleRequest::Generate { vendor, .. } => {
                let data = self
                    .generated
                    .lock()
                    .expect("lock poisoned")
                    .get(&vendor.name)
                    .cloned()
                    .ok_or(OracleError::Empty)?;
                Ok(OracleResponse {
                    raw_text: format!("Proposal from {}", vendor.name),
                    data,
                })
            }
        }
    }
}

pub(super) struct DownOracle;

impl ProposalOracle for DownOracle {
    fn generate_or_parse(&self, _request: OracleRequest<'_>) -> Result<OracleResponse, OracleError> {
        Err(OracleError::Unavailable("model endpoint timed out".to_string()))
    }
}

pub(super) type TestService = ProcurementService<MemoryRepository, RecordingMailer>;

pub(super) struct Harness {
    pub(super) service: Arc<TestService>,
    pub(super) mailer: Arc<RecordingMailer>,
    pub(super) oracle: Arc<ScriptedOracle>,
}

pub(super) fn harness() -> Harness {
    let mailer = Arc::new(RecordingMailer::default());
    let oracle = Arc::new(ScriptedOracle::default());
    let service = Arc::new(ProcurementService::new(
        Arc::new(MemoryRepository::default()),
        mailer.clone(),
        oracle.clone(),
        ScoringConfig::default(),
    ));
    Harness {
        service,
        mailer,
        oracle,
    }
}

pub(super) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

pub(super) async fn assert_status(response: Response, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    read_json(response).await
}
