//! Procurement workflow: RFP authoring, vendor outreach, proposal intake, scoring and
//! recommendation.
//!
//! Scoring runs in two profiles. Absolute scores land on a proposal when it is received and
//! compare it with the RFP's requirements. Batch scores are computed on demand across every
//! proposal of an RFP and drive the ranking and recommendation.

pub mod domain;
pub mod oracle;
pub mod outreach;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CommercialTerms, ComplianceSummary, DeliveryDetails, EmailAttachment, InboundEmail,
    PriceLine, Pricing, Proposal, ProposalData, ProposalId, ProposalStatus, RequiredItem,
    RequirementSet, Rfp, RfpDraft, RfpId, RfpStatus, Vendor, VendorDraft, VendorId,
    VendorStatus,
};
pub use oracle::{
    parse_generated_payload, parse_oracle_payload, OracleError, OracleRequest, OracleResponse,
    ProposalOracle,
};
pub use outreach::{
    invitation, DeliveryReceipt, DeliveryStatus, MailError, OutboundMessage, VendorMailer,
};
pub use recommendation::{
    compare_and_recommend, Alternative, ComparisonResult, RankedProposal, Recommendation,
};
pub use repository::{ProcurementRepository, RepositoryError, RfpStatusView};
pub use router::procurement_router;
pub use scoring::{ScoreAxis, ScoreProfile, ScoreResult, ScoringConfig, ScoringEngine};
pub use service::{ComparisonReport, ProcurementService, ProcurementServiceError};
