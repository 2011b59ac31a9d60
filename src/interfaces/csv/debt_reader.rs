use crate::domain::validation::RawDebt;
use crate::error::{PayoffError, Result};
use std::io::Read;

/// Reads raw debt rows from a CSV source.
///
/// Expects a `label,balance,rate,minimum` header. Cells are kept as text so
/// the validator decides what counts as a number; short rows are allowed and
/// their missing cells read as empty.
pub struct DebtReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DebtReader<R> {
    /// Creates a new `DebtReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rows.
    pub fn debts(self) -> impl Iterator<Item = Result<RawDebt>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayoffError::from))
    }
}
