use serde::Serialize;

use super::domain::{Proposal, ProposalId, Rfp, RfpId, RfpStatus, Vendor, VendorId};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// `insert_vendor` must reject a second vendor with the same email (ignoring case) and
/// `insert_proposal` a second proposal for the same (RFP, vendor) pair, both with
/// [`RepositoryError::Conflict`].
pub trait ProcurementRepository: Send + Sync {
    fn insert_rfp(&self, rfp: Rfp) -> Result<Rfp, RepositoryError>;
    fn update_rfp(&self, rfp: Rfp) -> Result<(), RepositoryError>;
    fn fetch_rfp(&self, id: &RfpId) -> Result<Option<Rfp>, RepositoryError>;
    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError>;

    fn insert_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError>;
    fn fetch_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError>;
    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError>;

    fn insert_proposal(&self, proposal: Proposal) -> Result<Proposal, RepositoryError>;
    fn update_proposal(&self, proposal: Proposal) -> Result<(), RepositoryError>;
    fn fetch_proposal(&self, id: &ProposalId) -> Result<Option<Proposal>, RepositoryError>;
    /// All proposals for an RFP in receipt order, read as one snapshot.
    fn proposals_for_rfp(&self, rfp_id: &RfpId) -> Result<Vec<Proposal>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public summary of an RFP for list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RfpStatusView {
    pub rfp_id: RfpId,
    pub title: String,
    pub status: &'static str,
    pub vendor_count: usize,
}

impl From<&Rfp> for RfpStatusView {
    fn from(rfp: &Rfp) -> Self {
        Self {
            rfp_id: rfp.id.clone(),
            title: rfp.title.clone(),
            status: RfpStatus::label(rfp.status),
            vendor_count: rfp.vendors.len(),
        }
    }
}
