use crate::compare::render_table;
use crate::infra::{
    load_scoring_config, InMemoryProcurementRepository, LoggingMailer, SimulatedOracle,
};
use clap::Args;
use rfp_advisor::error::AppError;
use rfp_advisor::workflows::procurement::{
    CommercialTerms, ComplianceSummary, DeliveryDetails, InboundEmail, Pricing,
    ProcurementService, ProposalData, RequiredItem, RequirementSet, RfpDraft, VendorDraft,
};
use std::io;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Extra vendors whose proposals are drafted by the simulated oracle (repeatable)
    #[arg(long = "simulated-vendor")]
    pub(crate) simulated_vendors: Vec<String>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let scoring = load_scoring_config()?;
    let mailer = Arc::new(LoggingMailer::default());
    let service = ProcurementService::new(
        Arc::new(InMemoryProcurementRepository::default()),
        mailer.clone(),
        Arc::new(SimulatedOracle),
        scoring,
    );

    println!("RFP advisor demo");
    let rfp = service.create_rfp(demo_rfp())?;
    println!("- Created {} \"{}\" ({})", rfp.id, rfp.title, rfp.status);

    let vendor_a = service.register_vendor(vendor("Vendor A", "quotes@vendor-a.example"))?;
    let vendor_b = service.register_vendor(vendor("Vendor B", "sales@vendor-b.example"))?;
    let mut vendor_ids = vec![vendor_a.id.clone(), vendor_b.id.clone()];
    let mut simulated_ids = Vec::new();
    for (index, name) in args.simulated_vendors.iter().enumerate() {
        let email = format!("rfp{}@simulated.example", index + 1);
        let simulated = service.register_vendor(vendor(name, &email))?;
        vendor_ids.push(simulated.id.clone());
        simulated_ids.push(simulated.id);
    }

    let receipts = service.distribute(&rfp.id, &vendor_ids)?;
    println!(
        "- Sent invitations to {} vendors ({} queued in the outbox)",
        receipts.len(),
        mailer.outbox().len()
    );

    for (responder, data) in [(&vendor_a, offer_a()), (&vendor_b, offer_b())] {
        let proposal = service.receive_proposal(&rfp.id, &responder.id, reply(&data)?)?;
        if let Some(scores) = &proposal.scores {
            println!(
                "- {} replied: absolute score {} ({})",
                proposal.vendor_name, scores.overall, scores.reasoning
            );
        }
    }

    if !simulated_ids.is_empty() {
        for proposal in service.generate_proposals(&rfp.id, &simulated_ids)? {
            let overall = proposal.scores.as_ref().map(|scores| scores.overall);
            println!(
                "- {} (simulated) quoted {}: absolute score {}",
                proposal.vendor_name,
                proposal
                    .data
                    .total_price()
                    .map(|price| format!("{price:.0}"))
                    .unwrap_or_else(|| "n/a".to_string()),
                overall.map(|score| score.to_string()).unwrap_or_default()
            );
        }
    }

    let report = service.compare(&rfp.id)?;
    println!();
    render_table(&report.comparison, &mut io::stdout().lock())?;
    Ok(())
}

fn demo_rfp() -> RfpDraft {
    RfpDraft {
        title: "Support team laptops".to_string(),
        description: Some("Twenty laptops for the new support hires".to_string()),
        requirements: RequirementSet {
            budget_total: Some(10_000.0),
            required_lead_time_days: Some(21),
            required_items: vec![RequiredItem {
                name: "14\" laptop".to_string(),
                quantity: 20,
                specs: [
                    ("ram".to_string(), serde_json::Value::from("16GB")),
                    ("storage".to_string(), serde_json::Value::from("512GB SSD")),
                ]
                .into_iter()
                .collect(),
            }],
            required_warranty_months: Some(12),
            payment_net_days: Some(30),
            ..RequirementSet::default()
        },
    }
}

fn vendor(name: &str, email: &str) -> VendorDraft {
    VendorDraft {
        name: name.to_string(),
        email: email.to_string(),
        contact_person: None,
        phone: None,
    }
}

fn offer(
    price: f64,
    lead_time: &str,
    warranty: &str,
    support: &str,
    matched: &[&str],
    missed: &[&str],
) -> ProposalData {
    ProposalData {
        pricing: Some(Pricing {
            total_price: Some(price),
            ..Pricing::default()
        }),
        delivery_details: Some(DeliveryDetails {
            lead_time: Some(lead_time.to_string()),
            ..DeliveryDetails::default()
        }),
        terms: Some(CommercialTerms {
            warranty: Some(warranty.to_string()),
            support_level: Some(support.to_string()),
            ..CommercialTerms::default()
        }),
        compliance: Some(ComplianceSummary {
            specs_matched: matched.iter().map(|spec| spec.to_string()).collect(),
            specs_not_matched: missed.iter().map(|spec| spec.to_string()).collect(),
            ..ComplianceSummary::default()
        }),
        summary: None,
    }
}

fn offer_a() -> ProposalData {
    offer(
        9_000.0,
        "2 weeks",
        "24 months",
        "24/7 premium support",
        &["16GB RAM", "512GB SSD"],
        &[],
    )
}

fn offer_b() -> ProposalData {
    offer(
        8_000.0,
        "4 weeks",
        "12 months",
        "standard",
        &["16GB RAM"],
        &["512GB SSD"],
    )
}

fn reply(data: &ProposalData) -> Result<InboundEmail, AppError> {
    Ok(InboundEmail {
        text: Some(serde_json::to_string(data)?),
        ..InboundEmail::default()
    })
}
