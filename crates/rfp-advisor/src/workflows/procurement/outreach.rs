use serde::{Deserialize, Serialize};

use super::domain::{Rfp, RfpId, Vendor, VendorId};

/// Outbound hook for the mail transport that carries RFP invitations.
pub trait VendorMailer: Send + Sync {
    fn send(&self, message: OutboundMessage) -> Result<(), MailError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub rfp_id: RfpId,
    pub vendor_id: VendorId,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
    #[error("recipient rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

/// Per-vendor result of distributing an RFP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub vendor_id: VendorId,
    pub email: String,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub fn invitation(rfp: &Rfp, vendor: &Vendor) -> OutboundMessage {
    OutboundMessage {
        rfp_id: rfp.id.clone(),
        vendor_id: vendor.id.clone(),
        to: vendor.email.clone(),
        subject: format!("Request for Proposal: {} ({})", rfp.title, rfp.id.0),
        html_body: invitation_body(rfp),
    }
}

fn invitation_body(rfp: &Rfp) -> String {
    let requirements = &rfp.requirements;

    let items: String = requirements
        .required_items
        .iter()
        .map(|item| {
            let specs = if item.specs.is_empty() {
                String::new()
            } else {
                let entries: String = item
                    .specs
                    .iter()
                    .map(|(key, value)| format!("<li>{key}: {}</li>", spec_value(value)))
                    .collect();
                format!("<ul>{entries}</ul>")
            };
            format!(
                "<li><strong>{}</strong> (Qty: {}){}</li>",
                item.name, item.quantity, specs
            )
        })
        .collect();

    let budget = requirements
        .budget_total
        .map(|total| format!("{} {}", requirements.currency, total))
        .unwrap_or_else(|| format!("{} N/A", requirements.currency));
    let deadline = requirements
        .delivery_deadline
        .map(|date| date.to_string())
        .unwrap_or_else(|| "TBD".to_string());
    let location = requirements
        .delivery_location
        .as_deref()
        .map(|location| format!("<p>Location: {location}</p>"))
        .unwrap_or_default();

    format!(
        "<h2>Request for Proposal</h2><p><strong>{}</strong></p>\
         <h3>Items</h3><ul>{}</ul>\
         <h3>Budget</h3><p>{}</p>\
         <h3>Delivery</h3><p>Deadline: {}</p>{}\
         <h3>Payment</h3><p>Net {}</p>\
         <h3>Warranty</h3><p>{} months</p>\
         <p>Please reply with your quotation and terms.</p>",
        rfp.title,
        items,
        budget,
        deadline,
        location,
        requirements.payment_net_days.unwrap_or(30),
        requirements.required_warranty_months.unwrap_or(12),
    )
}

fn spec_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
