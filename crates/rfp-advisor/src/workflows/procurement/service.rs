use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    InboundEmail, Proposal, ProposalId, ProposalStatus, RequirementSet, Rfp, RfpDraft, RfpId,
    RfpStatus, Vendor, VendorDraft, VendorId, VendorStatus,
};
use super::oracle::{OracleError, OracleRequest, ProposalOracle};
use super::outreach::{invitation, DeliveryReceipt, DeliveryStatus, VendorMailer};
use super::recommendation::{compare_and_recommend, ComparisonResult};
use super::repository::{ProcurementRepository, RepositoryError};
use super::scoring::{ScoreResult, ScoringConfig, ScoringEngine};

/// Service composing the repository, mail transport, proposal oracle and scoring engine.
pub struct ProcurementService<R, M> {
    repository: Arc<R>,
    mailer: Arc<M>,
    oracle: Arc<dyn ProposalOracle>,
    engine: Arc<ScoringEngine>,
}

static RFP_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static VENDOR_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PROPOSAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

/// Comparison outcome stamped with the time it was computed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    #[serde(flatten)]
    pub comparison: ComparisonResult,
    pub generated_at: DateTime<Utc>,
}

impl<R, M> ProcurementService<R, M>
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        oracle: Arc<dyn ProposalOracle>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            repository,
            mailer,
            oracle,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Register a vendor. Emails are unique across the registry.
    pub fn register_vendor(&self, draft: VendorDraft) -> Result<Vendor, ProcurementServiceError> {
        let name = draft.name.trim();
        let email = draft.email.trim();
        if name.is_empty() {
            return Err(ProcurementServiceError::InvalidInput(
                "vendor name is required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(ProcurementServiceError::InvalidInput(format!(
                "vendor email '{email}' is not a valid address"
            )));
        }

        let vendor = Vendor {
            id: VendorId(next_id(&VENDOR_SEQUENCE, "vendor")),
            name: name.to_string(),
            email: email.to_string(),
            contact_person: draft.contact_person,
            phone: draft.phone,
            status: VendorStatus::Active,
        };

        let stored = self.repository.insert_vendor(vendor)?;
        info!(vendor_id = %stored.id, "vendor registered");
        Ok(stored)
    }

    pub fn list_vendors(&self) -> Result<Vec<Vendor>, ProcurementServiceError> {
        Ok(self.repository.list_vendors()?)
    }

    /// Open a draft RFP from structured requirements.
    pub fn create_rfp(&self, draft: RfpDraft) -> Result<Rfp, ProcurementServiceError> {
        let title = draft.title.trim();
        let title = if title.is_empty() {
            "Procurement Request"
        } else {
            title
        };

        let rfp = Rfp {
            id: RfpId(next_id(&RFP_SEQUENCE, "rfp")),
            title: title.to_string(),
            description: draft.description,
            requirements: draft.requirements,
            status: RfpStatus::Draft,
            vendors: Vec::new(),
            created_at: Utc::now(),
        };

        let stored = self.repository.insert_rfp(rfp)?;
        info!(rfp_id = %stored.id, "rfp created");
        Ok(stored)
    }

    pub fn get_rfp(&self, rfp_id: &RfpId) -> Result<Rfp, ProcurementServiceError> {
        let rfp = self
            .repository
            .fetch_rfp(rfp_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(rfp)
    }

    pub fn list_rfps(&self) -> Result<Vec<Rfp>, ProcurementServiceError> {
        Ok(self.repository.list_rfps()?)
    }

    /// Replace the requirement set of an RFP that has not been distributed yet.
    pub fn update_requirements(
        &self,
        rfp_id: &RfpId,
        requirements: RequirementSet,
    ) -> Result<Rfp, ProcurementServiceError> {
        let mut rfp = self.get_rfp(rfp_id)?;
        if rfp.status.requirements_locked() {
            return Err(ProcurementServiceError::RequirementsLocked {
                rfp_id: rfp.id,
                status: rfp.status,
            });
        }

        rfp.requirements = requirements;
        self.repository.update_rfp(rfp.clone())?;
        Ok(rfp)
    }

    /// Send the RFP to each vendor. Transport failures are reported per vendor.
    pub fn distribute(
        &self,
        rfp_id: &RfpId,
        vendor_ids: &[VendorId],
    ) -> Result<Vec<DeliveryReceipt>, ProcurementServiceError> {
        let mut rfp = self.get_rfp(rfp_id)?;
        let vendors = self.resolve_vendors(vendor_ids)?;

        let mut receipts = Vec::with_capacity(vendors.len());
        for vendor in &vendors {
            let receipt = match self.mailer.send(invitation(&rfp, vendor)) {
                Ok(()) => DeliveryReceipt {
                    vendor_id: vendor.id.clone(),
                    email: vendor.email.clone(),
                    status: DeliveryStatus::Sent,
                    detail: None,
                },
                Err(err) => {
                    warn!(rfp_id = %rfp.id, vendor_id = %vendor.id, error = %err, "rfp invitation failed");
                    DeliveryReceipt {
                        vendor_id: vendor.id.clone(),
                        email: vendor.email.clone(),
                        status: DeliveryStatus::Failed,
                        detail: Some(err.to_string()),
                    }
                }
            };
            receipts.push(receipt);

            if !rfp.vendors.contains(&vendor.id) {
                rfp.vendors.push(vendor.id.clone());
            }
        }

        if rfp.status == RfpStatus::Draft {
            rfp.status = RfpStatus::Sent;
        }
        self.repository.update_rfp(rfp.clone())?;

        let sent = receipts
            .iter()
            .filter(|receipt| receipt.status == DeliveryStatus::Sent)
            .count();
        info!(rfp_id = %rfp.id, sent, total = receipts.len(), "rfp distributed");
        Ok(receipts)
    }

    /// Parse a vendor reply, score it against the RFP baseline and store it.
    pub fn receive_proposal(
        &self,
        rfp_id: &RfpId,
        vendor_id: &VendorId,
        email: InboundEmail,
    ) -> Result<Proposal, ProcurementServiceError> {
        let mut rfp = self.get_rfp(rfp_id)?;
        let vendor = self.resolve_vendor(vendor_id)?;
        self.ensure_no_proposal(&rfp.id, &vendor.id)?;

        let content = email.full_content();
        let response = self.oracle.generate_or_parse(OracleRequest::ParseEmail {
            rfp: &rfp,
            vendor: &vendor,
            content: &content,
        })?;

        let scores = self.engine.score_proposal(&rfp.requirements, &response.data);
        let proposal = Proposal {
            id: ProposalId(next_id(&PROPOSAL_SEQUENCE, "proposal")),
            rfp_id: rfp.id.clone(),
            vendor_id: vendor.id.clone(),
            vendor_name: vendor.name.clone(),
            raw_body: email.raw_body(),
            data: response.data,
            scores: Some(scores),
            status: ProposalStatus::Evaluated,
            received_at: Utc::now(),
        };
        let stored = self.repository.insert_proposal(proposal)?;

        if !rfp.vendors.contains(&vendor.id) {
            rfp.vendors.push(vendor.id.clone());
        }
        if matches!(rfp.status, RfpStatus::Draft | RfpStatus::Sent) {
            rfp.status = RfpStatus::ResponsesReceived;
        }
        self.repository.update_rfp(rfp)?;

        info!(
            proposal_id = %stored.id,
            overall = ?stored.scores.as_ref().map(|scores| scores.overall),
            "proposal received and scored"
        );
        Ok(stored)
    }

    /// Ask the oracle for a simulated proposal from each vendor that has not responded.
    pub fn generate_proposals(
        &self,
        rfp_id: &RfpId,
        vendor_ids: &[VendorId],
    ) -> Result<Vec<Proposal>, ProcurementServiceError> {
        let mut rfp = self.get_rfp(rfp_id)?;
        let vendors = self.resolve_vendors(vendor_ids)?;
        let responded: BTreeSet<VendorId> = self
            .repository
            .proposals_for_rfp(&rfp.id)?
            .into_iter()
            .map(|proposal| proposal.vendor_id)
            .collect();

        // Every oracle call completes before anything is stored, so an oracle failure leaves
        // the RFP untouched.
        let mut drafted = Vec::new();
        for vendor in vendors.iter().filter(|vendor| !responded.contains(&vendor.id)) {
            let response = self
                .oracle
                .generate_or_parse(OracleRequest::Generate {
                    rfp: &rfp,
                    vendor,
                })?;

            let scores = self.engine.score_proposal(&rfp.requirements, &response.data);
            drafted.push(Proposal {
                id: ProposalId(next_id(&PROPOSAL_SEQUENCE, "proposal")),
                rfp_id: rfp.id.clone(),
                vendor_id: vendor.id.clone(),
                vendor_name: vendor.name.clone(),
                raw_body: Some(response.raw_text),
                data: response.data,
                scores: Some(scores),
                status: ProposalStatus::Parsed,
                received_at: Utc::now(),
            });
        }

        let mut created = Vec::with_capacity(drafted.len());
        let mut failure = None;
        for proposal in drafted {
            match self.repository.insert_proposal(proposal) {
                Ok(stored) => {
                    if !rfp.vendors.contains(&stored.vendor_id) {
                        rfp.vendors.push(stored.vendor_id.clone());
                    }
                    created.push(stored);
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        // Stored proposals are reflected on the RFP even when a later insert failed.
        if !created.is_empty() && matches!(rfp.status, RfpStatus::Draft | RfpStatus::Sent) {
            rfp.status = RfpStatus::ResponsesReceived;
        }
        self.repository.update_rfp(rfp)?;

        if let Some(err) = failure {
            warn!(rfp_id = %rfp_id, stored = created.len(), error = %err, "simulated proposal insert failed");
            return Err(err.into());
        }

        info!(rfp_id = %rfp_id, created = created.len(), "simulated proposals generated");
        Ok(created)
    }

    /// Recompute absolute-mode scores for a stored proposal.
    pub fn rescore(&self, proposal_id: &ProposalId) -> Result<ScoreResult, ProcurementServiceError> {
        let mut proposal = self
            .repository
            .fetch_proposal(proposal_id)?
            .ok_or(RepositoryError::NotFound)?;
        let rfp = self.get_rfp(&proposal.rfp_id)?;

        let scores = self.engine.score_proposal(&rfp.requirements, &proposal.data);
        if matches!(
            proposal.status,
            ProposalStatus::Received | ProposalStatus::Parsed
        ) {
            proposal.status = ProposalStatus::Evaluated;
        }
        proposal.scores = Some(scores.clone());
        self.repository.update_proposal(proposal)?;
        Ok(scores)
    }

    pub fn proposals_for_rfp(
        &self,
        rfp_id: &RfpId,
    ) -> Result<Vec<Proposal>, ProcurementServiceError> {
        Ok(self.repository.proposals_for_rfp(rfp_id)?)
    }

    /// Batch-compare every proposal received for the RFP.
    ///
    /// An unknown RFP or an RFP without proposals yields an empty comparison.
    pub fn compare(&self, rfp_id: &RfpId) -> Result<ComparisonReport, ProcurementServiceError> {
        let Some(mut rfp) = self.repository.fetch_rfp(rfp_id)? else {
            return Ok(self.report(ComparisonResult::empty(rfp_id.clone())));
        };

        let proposals = self.repository.proposals_for_rfp(&rfp.id)?;
        for proposal in &proposals {
            if proposal.data.total_price().is_none() {
                warn!(proposal_id = %proposal.id, "proposal has no total price; scored as worst case");
            }
        }

        let comparison = compare_and_recommend(&self.engine, &rfp.id, &proposals);
        if comparison.total_proposals > 0 && rfp.status != RfpStatus::Evaluated {
            rfp.status = RfpStatus::Evaluated;
            self.repository.update_rfp(rfp)?;
        }

        if let Some(recommendation) = &comparison.recommendation {
            info!(
                rfp_id = %rfp_id,
                vendor = %recommendation.recommended_vendor_name,
                score = recommendation.overall_score,
                "comparison completed"
            );
        }
        Ok(self.report(comparison))
    }

    fn report(&self, comparison: ComparisonResult) -> ComparisonReport {
        ComparisonReport {
            comparison,
            generated_at: Utc::now(),
        }
    }

    fn resolve_vendor(&self, vendor_id: &VendorId) -> Result<Vendor, ProcurementServiceError> {
        self.repository
            .fetch_vendor(vendor_id)?
            .ok_or_else(|| ProcurementServiceError::UnknownVendor(vendor_id.clone()))
    }

    fn resolve_vendors(
        &self,
        vendor_ids: &[VendorId],
    ) -> Result<Vec<Vendor>, ProcurementServiceError> {
        let mut seen = BTreeSet::new();
        vendor_ids
            .iter()
            .filter(|id| seen.insert((*id).clone()))
            .map(|id| self.resolve_vendor(id))
            .collect()
    }

    fn ensure_no_proposal(
        &self,
        rfp_id: &RfpId,
        vendor_id: &VendorId,
    ) -> Result<(), ProcurementServiceError> {
        let exists = self
            .repository
            .proposals_for_rfp(rfp_id)?
            .iter()
            .any(|proposal| &proposal.vendor_id == vendor_id);
        if exists {
            return Err(ProcurementServiceError::DuplicateProposal {
                rfp_id: rfp_id.clone(),
                vendor_id: vendor_id.clone(),
            });
        }
        Ok(())
    }
}

/// Error raised by the procurement service.
#[derive(Debug, thiserror::Error)]
pub enum ProcurementServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error("requirements of rfp {rfp_id} are locked once it is {status}")]
    RequirementsLocked { rfp_id: RfpId, status: RfpStatus },
    #[error("vendor {0} is not registered")]
    UnknownVendor(VendorId),
    #[error("vendor {vendor_id} already submitted a proposal for rfp {rfp_id}")]
    DuplicateProposal { rfp_id: RfpId, vendor_id: VendorId },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
