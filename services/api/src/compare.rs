use crate::infra::load_scoring_config;
use chrono::Utc;
use clap::{Args, ValueEnum};
use rfp_advisor::error::AppError;
use rfp_advisor::workflows::procurement::{
    compare_and_recommend, ComparisonResult, Proposal, ProposalData, ProposalId, ProposalStatus,
    RfpId, ScoringEngine, VendorId,
};
use serde::Deserialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// JSON file with `{ "rfpId"?, "proposals": [...] }`; `-` reads stdin
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ComparisonInput {
    #[serde(default)]
    pub(crate) rfp_id: Option<RfpId>,
    pub(crate) proposals: Vec<ProposalInput>,
}

/// One vendor's offer; proposal sections sit beside the vendor fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProposalInput {
    pub(crate) vendor_name: String,
    #[serde(default)]
    pub(crate) vendor_id: Option<VendorId>,
    #[serde(flatten)]
    pub(crate) data: ProposalData,
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let raw = if args.input.as_os_str() == "-" {
        io::read_to_string(io::stdin())?
    } else {
        std::fs::read_to_string(&args.input)?
    };

    let engine = ScoringEngine::new(load_scoring_config()?);
    let result = compare_input(&engine, load_input(raw.as_bytes())?);
    let stdout = io::stdout();
    render(&result, args.format, &mut stdout.lock())
}

pub(crate) fn load_input<R: Read>(reader: R) -> Result<ComparisonInput, AppError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Rank the offers in file order, which stands in for receipt order.
pub(crate) fn compare_input(engine: &ScoringEngine, input: ComparisonInput) -> ComparisonResult {
    let rfp_id = input
        .rfp_id
        .unwrap_or_else(|| RfpId("rfp-local".to_string()));
    let received_at = Utc::now();

    let proposals: Vec<Proposal> = input
        .proposals
        .into_iter()
        .enumerate()
        .map(|(index, offer)| Proposal {
            id: ProposalId(format!("proposal-{:06}", index + 1)),
            rfp_id: rfp_id.clone(),
            vendor_id: offer
                .vendor_id
                .unwrap_or_else(|| VendorId(format!("vendor-{:06}", index + 1))),
            vendor_name: offer.vendor_name,
            raw_body: None,
            data: offer.data,
            scores: None,
            status: ProposalStatus::Parsed,
            received_at,
        })
        .collect();

    compare_and_recommend(engine, &rfp_id, &proposals)
}

pub(crate) fn render<W: Write>(
    result: &ComparisonResult,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, result).map_err(io::Error::from)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => result.write_csv(out)?,
        OutputFormat::Table => render_table(result, out)?,
    }
    Ok(())
}

pub(crate) fn render_table<W: Write>(result: &ComparisonResult, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Comparison for {} ({} proposals)",
        result.rfp_id, result.total_proposals
    )?;
    if let Some(message) = &result.message {
        writeln!(out, "{message}")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<4} {:<24} {:>10} {:>6} {:>9} {:>9} {:>8}",
        "#", "Vendor", "Price", "Price", "Delivery", "Warranty", "Overall"
    )?;
    for ranked in &result.proposals {
        let price = ranked
            .total_price
            .map(|price| format!("{price:.0}"))
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            out,
            "{:<4} {:<24} {:>10} {:>6} {:>9} {:>9} {:>8}",
            ranked.rank,
            ranked.vendor_name,
            price,
            ranked.scores.price_score,
            ranked.scores.delivery_score,
            ranked.scores.compliance_score,
            ranked.scores.overall
        )?;
    }

    if let Some(recommendation) = &result.recommendation {
        writeln!(out, "\nRecommendation: {}", recommendation.decision)?;
        for alternative in &recommendation.alternatives {
            writeln!(
                out,
                "  - {} ({}): {}",
                alternative.vendor_name, alternative.score, alternative.why_consider
            )?;
        }
    }
    Ok(())
}
