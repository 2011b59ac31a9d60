#![allow(dead_code)]

use debtpayoff::domain::debt::Debt;
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

/// Writes a debts CSV with the standard header followed by `rows`.
pub fn debts_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "label,balance,rate,minimum").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// CreditCard / PersonalLoan / BikeEMI, the reference three-debt scenario.
pub fn reference_debts() -> Vec<Debt> {
    vec![
        Debt::new(1, "CreditCard", dec!(60000), dec!(36), dec!(2500)),
        Debt::new(2, "PersonalLoan", dec!(120000), dec!(14), dec!(3500)),
        Debt::new(3, "BikeEMI", dec!(30000), dec!(12), dec!(1500)),
    ]
}
