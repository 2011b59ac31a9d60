use crate::application::engine::MonthSnapshot;
use crate::application::report::{Comparison, SimulationResult};
use crate::error::Result;
use std::io::Write;

/// Placeholder shown instead of a month count for plans that never pay off.
pub const NEVER: &str = "never";

/// Separator used when the payoff order is flattened into one cell.
pub const ORDER_SEPARATOR: &str = "|";

/// Writes simulation output as CSV tables, each introduced by its own header.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);
        Self { writer }
    }

    pub fn write_results(&mut self, results: &[SimulationResult]) -> Result<()> {
        self.writer.write_record([
            "strategy",
            "months",
            "total_interest",
            "converged",
            "payoff_order",
        ])?;
        for result in results {
            let months = if result.converged {
                result.months_to_payoff.to_string()
            } else {
                NEVER.to_string()
            };
            self.writer.write_record([
                result.strategy.name().to_string(),
                months,
                result.total_interest_paid.to_string(),
                result.converged.to_string(),
                result.payoff_order.join(ORDER_SEPARATOR),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the verdict as the winning strategy's name, or `equivalent`.
    pub fn write_comparison(
        &mut self,
        a: &SimulationResult,
        b: &SimulationResult,
        comparison: &Comparison,
    ) -> Result<()> {
        let verdict = comparison
            .winner(a, b)
            .map(|winner| winner.strategy.name())
            .unwrap_or("equivalent");

        self.writer
            .write_record(["verdict", "faster_by_months", "cheaper_by"])?;
        self.writer.write_record([
            verdict.to_string(),
            comparison.faster_by.to_string(),
            comparison.cheaper_by.to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }

    /// One row per month with the closing balance of every debt.
    pub fn write_schedule(
        &mut self,
        result: &SimulationResult,
        labels: &[String],
        schedule: &[MonthSnapshot],
    ) -> Result<()> {
        let mut header = vec!["strategy".to_string(), "month".to_string()];
        header.extend(labels.iter().cloned());
        header.push("interest".to_string());
        header.push("paid".to_string());
        self.writer.write_record(&header)?;

        for snapshot in schedule {
            let mut row = vec![
                result.strategy.name().to_string(),
                snapshot.month.to_string(),
            ];
            row.extend(snapshot.balances.iter().map(ToString::to_string));
            row.push(snapshot.interest.to_string());
            row.push(snapshot.paid.to_string());
            self.writer.write_record(&row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
