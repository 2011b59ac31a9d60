use crate::application::engine::MonthSnapshot;
use crate::application::report::{Comparison, SimulationResult};
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Everything one CLI invocation produced, in a single JSON document.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub results: &'a [SimulationResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<&'a Comparison>,
    /// Month-by-month balances keyed by strategy name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub schedules: BTreeMap<&'static str, &'a [MonthSnapshot]>,
}

impl JsonReport<'_> {
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        serde_json::to_writer_pretty(sink, self)?;
        Ok(())
    }
}
