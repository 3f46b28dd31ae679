use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::ScoreResult;

/// Identifier wrapper for requests for proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RfpId(pub String);

/// Identifier wrapper for registered vendors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VendorId(pub String);

/// Identifier wrapper for received proposals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProposalId(pub String);

macro_rules! display_id {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

display_id!(RfpId, VendorId, ProposalId);

/// Line item the buyer asks vendors to quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub specs: BTreeMap<String, serde_json::Value>,
}

/// Buyer expectations every proposal is scored against.
///
/// Frozen once the owning RFP leaves `Draft` so proposals scored at different times stay
/// comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSet {
    #[serde(default)]
    pub budget_total: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub delivery_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub required_lead_time_days: Option<u32>,
    #[serde(default)]
    pub required_items: Vec<RequiredItem>,
    #[serde(default)]
    pub required_warranty_months: Option<u32>,
    #[serde(default)]
    pub payment_net_days: Option<u32>,
    #[serde(default)]
    pub delivery_location: Option<String>,
}

impl Default for RequirementSet {
    fn default() -> Self {
        Self {
            budget_total: None,
            currency: default_currency(),
            delivery_deadline: None,
            required_lead_time_days: None,
            required_items: Vec::new(),
            required_warranty_months: None,
            payment_net_days: None,
            delivery_location: None,
        }
    }
}

pub(crate) fn default_currency() -> String {
    "USD".to_string()
}

/// Lifecycle of a request for proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfpStatus {
    Draft,
    Sent,
    ResponsesReceived,
    Evaluated,
}

impl RfpStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RfpStatus::Draft => "draft",
            RfpStatus::Sent => "sent",
            RfpStatus::ResponsesReceived => "responses_received",
            RfpStatus::Evaluated => "evaluated",
        }
    }

    /// Requirements may only change before the RFP reaches any vendor.
    pub const fn requirements_locked(self) -> bool {
        !matches!(self, RfpStatus::Draft)
    }
}

impl fmt::Display for RfpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured input used to open a new RFP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfpDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: RequirementSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rfp {
    pub id: RfpId,
    pub title: String,
    pub description: Option<String>,
    pub requirements: RequirementSet,
    pub status: RfpStatus,
    pub vendors: Vec<VendorId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Active,
    Inactive,
}

/// Contact details submitted when registering a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub email: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub status: VendorStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLine {
    pub item_name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub breakdown: Vec<PriceLine>,
    #[serde(default)]
    pub discounts: Option<String>,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            total_price: None,
            currency: default_currency(),
            breakdown: Vec::new(),
            discounts: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    #[serde(default)]
    pub estimated_date: Option<NaiveDate>,
    /// Free text such as "3 weeks".
    #[serde(default)]
    pub lead_time: Option<String>,
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    #[serde(default)]
    pub conditions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialTerms {
    #[serde(default)]
    pub payment_terms: Option<String>,
    /// Free text such as "24 months".
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub support_level: Option<String>,
    #[serde(default)]
    pub sla: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    #[serde(default)]
    pub specs_matched: BTreeSet<String>,
    #[serde(default)]
    pub specs_not_matched: BTreeSet<String>,
    #[serde(default)]
    pub additional_offerings: BTreeSet<String>,
}

/// Structured vendor response as produced by the proposal oracle.
///
/// Every section is optional; scoring degrades missing values to the worst case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalData {
    #[serde(default)]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub delivery_details: Option<DeliveryDetails>,
    #[serde(default)]
    pub terms: Option<CommercialTerms>,
    #[serde(default)]
    pub compliance: Option<ComplianceSummary>,
    #[serde(default, alias = "summaryByAI")]
    pub summary: Option<String>,
}

impl ProposalData {
    pub fn total_price(&self) -> Option<f64> {
        self.pricing.as_ref().and_then(|pricing| pricing.total_price)
    }

    pub fn lead_time(&self) -> Option<&str> {
        self.delivery_details
            .as_ref()
            .and_then(|details| details.lead_time.as_deref())
    }

    pub fn estimated_date(&self) -> Option<NaiveDate> {
        self.delivery_details
            .as_ref()
            .and_then(|details| details.estimated_date)
    }

    pub fn warranty(&self) -> Option<&str> {
        self.terms.as_ref().and_then(|terms| terms.warranty.as_deref())
    }

    pub fn support_level(&self) -> Option<&str> {
        self.terms
            .as_ref()
            .and_then(|terms| terms.support_level.as_deref())
    }
}

/// Lifecycle of a received proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Received,
    Parsed,
    Evaluated,
    Selected,
    Rejected,
}

impl ProposalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProposalStatus::Received => "received",
            ProposalStatus::Parsed => "parsed",
            ProposalStatus::Evaluated => "evaluated",
            ProposalStatus::Selected => "selected",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

/// A vendor's response to one RFP. The (rfp, vendor) pair is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    pub rfp_id: RfpId,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    #[serde(default)]
    pub raw_body: Option<String>,
    pub data: ProposalData,
    #[serde(default)]
    pub scores: Option<ScoreResult>,
    pub status: ProposalStatus,
    pub received_at: DateTime<Utc>,
}

/// Attachment carried by an inbound vendor email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    #[serde(default)]
    pub content: String,
}

/// Vendor reply as delivered by the mail webhook.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEmail {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub attachments: Vec<EmailAttachment>,
}

impl InboundEmail {
    /// Body preferring plain text, followed by every attachment marker and the content of
    /// text attachments.
    pub fn full_content(&self) -> String {
        let mut content = self
            .text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(self.html.as_deref())
            .unwrap_or_default()
            .to_string();

        for attachment in &self.attachments {
            content.push_str(&format!("\n\n[Attachment: {}]", attachment.filename));
            if attachment.content_type.contains("text") {
                content.push('\n');
                content.push_str(&attachment.content);
            }
        }

        content
    }

    pub fn raw_body(&self) -> Option<String> {
        self.text.clone().or_else(|| self.html.clone())
    }
}
