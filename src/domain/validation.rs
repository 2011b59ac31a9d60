//! Sanitizing boundary between free-text form input and the simulator.
//!
//! Nothing here fails: anything that does not read as a non-negative number
//! becomes zero.

use super::debt::{Debt, Money};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// One debt row exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDebt {
    #[serde(default, alias = "name")]
    pub label: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default, alias = "annual_rate_percent")]
    pub rate: Option<String>,
    #[serde(default, alias = "minimum_payment")]
    pub minimum: Option<String>,
}

impl RawDebt {
    pub fn new(label: &str, balance: &str, rate: &str, minimum: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            balance: Some(balance.to_string()),
            rate: Some(rate.to_string()),
            minimum: Some(minimum.to_string()),
        }
    }
}

/// Reads a free-text amount, falling back to zero.
///
/// Accepts surrounding whitespace, `,`/`_` digit separators and scientific
/// notation. Negative, non-numeric and out-of-range input yields zero.
pub fn sanitize_amount(raw: Option<&str>) -> Decimal {
    let Some(text) = raw else {
        return Decimal::ZERO;
    };
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    let parsed = Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned));
    match parsed {
        Ok(value) if value > Decimal::ZERO => value,
        _ => Decimal::ZERO,
    }
}

/// Turns raw rows and a raw extra budget into a well-formed debt set.
///
/// Ids follow input position (1-based); blank labels become `Debt <n>`.
pub fn normalize(raw_debts: &[RawDebt], raw_extra_budget: Option<&str>) -> (Vec<Debt>, Money) {
    let debts = raw_debts
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let id = index as u32 + 1;
            let label = raw
                .label
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Debt {id}"));

            Debt::new(
                id,
                label,
                sanitize_amount(raw.balance.as_deref()),
                sanitize_amount(raw.rate.as_deref()),
                sanitize_amount(raw.minimum.as_deref()),
            )
        })
        .collect();

    let extra = Money::new(sanitize_amount(raw_extra_budget));
    (debts, extra)
}
