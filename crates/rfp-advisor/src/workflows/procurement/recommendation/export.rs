use std::io::Write;

use super::ComparisonResult;

const HEADER: [&str; 11] = [
    "rank",
    "vendor",
    "proposal_id",
    "total_price",
    "lead_time",
    "warranty",
    "price_score",
    "delivery_score",
    "warranty_score",
    "support_score",
    "overall",
];

impl ComparisonResult {
    /// Write the ranked table as CSV, one row per proposal in rank order.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(HEADER)?;

        for ranked in &self.proposals {
            let scores = &ranked.scores;
            csv_writer.write_record([
                ranked.rank.to_string(),
                ranked.vendor_name.clone(),
                ranked.proposal_id.to_string(),
                ranked
                    .total_price
                    .map(|price| price.to_string())
                    .unwrap_or_default(),
                ranked.lead_time.clone().unwrap_or_default(),
                ranked.warranty.clone().unwrap_or_default(),
                scores.price_score.to_string(),
                scores.delivery_score.to_string(),
                scores.compliance_score.to_string(),
                scores.support_score.to_string(),
                scores.overall.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
