use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{InboundEmail, ProposalId, RequirementSet, RfpDraft, RfpId, VendorDraft, VendorId};
use super::outreach::VendorMailer;
use super::repository::{ProcurementRepository, RepositoryError, RfpStatusView};
use super::service::{ProcurementService, ProcurementServiceError};

type SharedService<R, M> = Arc<ProcurementService<R, M>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DistributeRequest {
    pub(crate) vendor_ids: Vec<VendorId>,
    /// Also ask the oracle for a simulated proposal from each vendor.
    #[serde(default)]
    pub(crate) generate_proposals: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InboundProposalRequest {
    pub(crate) vendor_id: VendorId,
    pub(crate) email: InboundEmail,
}

/// Router builder exposing the RFP, vendor, proposal and comparison endpoints.
pub fn procurement_router<R, M>(service: SharedService<R, M>) -> Router
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    Router::new()
        .route(
            "/api/v1/vendors",
            post(register_vendor_handler::<R, M>).get(list_vendors_handler::<R, M>),
        )
        .route(
            "/api/v1/rfps",
            post(create_rfp_handler::<R, M>).get(list_rfps_handler::<R, M>),
        )
        .route("/api/v1/rfps/:rfp_id", get(get_rfp_handler::<R, M>))
        .route(
            "/api/v1/rfps/:rfp_id/requirements",
            put(update_requirements_handler::<R, M>),
        )
        .route(
            "/api/v1/rfps/:rfp_id/distribute",
            post(distribute_handler::<R, M>),
        )
        .route(
            "/api/v1/rfps/:rfp_id/proposals",
            post(receive_proposal_handler::<R, M>).get(list_proposals_handler::<R, M>),
        )
        .route(
            "/api/v1/proposals/:proposal_id/rescore",
            post(rescore_handler::<R, M>),
        )
        .route(
            "/api/v1/comparison/:rfp_id",
            get(comparison_handler::<R, M>),
        )
        .with_state(service)
}

pub(crate) fn error_response(error: ProcurementServiceError) -> Response {
    let status = match &error {
        ProcurementServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ProcurementServiceError::Repository(RepositoryError::Conflict)
        | ProcurementServiceError::DuplicateProposal { .. }
        | ProcurementServiceError::RequirementsLocked { .. } => StatusCode::CONFLICT,
        ProcurementServiceError::UnknownVendor(_) | ProcurementServiceError::InvalidInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ProcurementServiceError::Oracle(_) => StatusCode::BAD_GATEWAY,
        ProcurementServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn register_vendor_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Json(draft): Json<VendorDraft>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.register_vendor(draft) {
        Ok(vendor) => (StatusCode::CREATED, Json(json!({ "vendor": vendor }))).into_response(),
        Err(ProcurementServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "vendor with this email already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn list_vendors_handler<R, M>(
    State(service): State<SharedService<R, M>>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.list_vendors() {
        Ok(vendors) => (StatusCode::OK, Json(json!({ "vendors": vendors }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_rfp_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Json(draft): Json<RfpDraft>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.create_rfp(draft) {
        Ok(rfp) => (StatusCode::CREATED, Json(json!({ "rfp": rfp }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_rfps_handler<R, M>(State(service): State<SharedService<R, M>>) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.list_rfps() {
        Ok(rfps) => {
            let views: Vec<RfpStatusView> = rfps.iter().map(RfpStatusView::from).collect();
            (StatusCode::OK, Json(json!({ "rfps": views }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_rfp_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.get_rfp(&RfpId(rfp_id)) {
        Ok(rfp) => (StatusCode::OK, Json(json!({ "rfp": rfp }))).into_response(),
        Err(ProcurementServiceError::Repository(RepositoryError::NotFound)) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "RFP not found" }))).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn update_requirements_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Path(rfp_id): Path<String>,
    Json(requirements): Json<RequirementSet>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.update_requirements(&RfpId(rfp_id), requirements) {
        Ok(rfp) => (StatusCode::OK, Json(json!({ "rfp": rfp }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn distribute_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Path(rfp_id): Path<String>,
    Json(request): Json<DistributeRequest>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    let rfp_id = RfpId(rfp_id);
    let results = match service.distribute(&rfp_id, &request.vendor_ids) {
        Ok(results) => results,
        Err(err) => return error_response(err),
    };

    let proposals = if request.generate_proposals {
        match service.generate_proposals(&rfp_id, &request.vendor_ids) {
            Ok(proposals) => proposals,
            Err(err) => return error_response(err),
        }
    } else {
        Vec::new()
    };

    let payload = json!({
        "message": "RFP sent to vendors",
        "results": results,
        "proposals": proposals,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn receive_proposal_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Path(rfp_id): Path<String>,
    Json(request): Json<InboundProposalRequest>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.receive_proposal(&RfpId(rfp_id), &request.vendor_id, request.email) {
        Ok(proposal) => (StatusCode::CREATED, Json(json!({ "proposal": proposal }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_proposals_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.proposals_for_rfp(&RfpId(rfp_id)) {
        Ok(proposals) => (StatusCode::OK, Json(json!({ "proposals": proposals }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rescore_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Path(proposal_id): Path<String>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.rescore(&ProposalId(proposal_id)) {
        Ok(scores) => (StatusCode::OK, Json(json!({ "scores": scores }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn comparison_handler<R, M>(
    State(service): State<SharedService<R, M>>,
    Path(rfp_id): Path<String>,
) -> Response
where
    R: ProcurementRepository + 'static,
    M: VendorMailer + 'static,
{
    match service.compare(&RfpId(rfp_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}
