use super::debt::Debt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy deciding which debt receives surplus cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Snowball: lowest current balance first.
    #[serde(rename = "snowball")]
    SmallestBalanceFirst,
    /// Avalanche: highest annual rate first.
    #[serde(rename = "avalanche")]
    HighestRateFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::SmallestBalanceFirst, Strategy::HighestRateFirst];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SmallestBalanceFirst => "snowball",
            Strategy::HighestRateFirst => "avalanche",
        }
    }

    /// Strict comparison so that the earlier debt keeps a tie.
    fn outranks(&self, candidate: &Debt, incumbent: &Debt) -> bool {
        match self {
            Strategy::SmallestBalanceFirst => candidate.balance < incumbent.balance,
            Strategy::HighestRateFirst => {
                candidate.annual_rate_percent > incumbent.annual_rate_percent
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of the debt that should receive surplus cash next.
///
/// Only debts with `balance > epsilon` are considered. Returns `None` when
/// every debt is cleared.
pub fn select_target(debts: &[Debt], strategy: Strategy, epsilon: Decimal) -> Option<usize> {
    let mut target: Option<usize> = None;
    for (index, debt) in debts.iter().enumerate() {
        if debt.is_cleared(epsilon) {
            continue;
        }
        match target {
            Some(current) if !strategy.outranks(debt, &debts[current]) => {}
            _ => target = Some(index),
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EPSILON: Decimal = dec!(0.01);

    fn sample() -> Vec<Debt> {
        vec![
            Debt::new(1, "CreditCard", dec!(60000), dec!(36), dec!(2500)),
            Debt::new(2, "PersonalLoan", dec!(120000), dec!(14), dec!(3500)),
            Debt::new(3, "BikeEMI", dec!(30000), dec!(12), dec!(1500)),
        ]
    }

    #[test]
    fn test_snowball_picks_smallest_balance() {
        assert_eq!(
            select_target(&sample(), Strategy::SmallestBalanceFirst, EPSILON),
            Some(2)
        );
    }

    #[test]
    fn test_avalanche_picks_highest_rate() {
        assert_eq!(
            select_target(&sample(), Strategy::HighestRateFirst, EPSILON),
            Some(0)
        );
    }

    #[test]
    fn test_cleared_debts_are_skipped() {
        let mut debts = sample();
        debts[2].balance = crate::domain::debt::Money::new(dec!(0.01));
        assert_eq!(
            select_target(&debts, Strategy::SmallestBalanceFirst, EPSILON),
            Some(0)
        );

        debts[0].balance = crate::domain::debt::Money::ZERO;
        assert_eq!(
            select_target(&debts, Strategy::HighestRateFirst, EPSILON),
            Some(1)
        );
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        let debts = vec![
            Debt::new(1, "A", dec!(500), dec!(18), dec!(10)),
            Debt::new(2, "B", dec!(500), dec!(18), dec!(10)),
        ];
        assert_eq!(
            select_target(&debts, Strategy::SmallestBalanceFirst, EPSILON),
            Some(0)
        );
        assert_eq!(
            select_target(&debts, Strategy::HighestRateFirst, EPSILON),
            Some(0)
        );
    }

    #[test]
    fn test_nothing_to_target() {
        assert_eq!(select_target(&[], Strategy::HighestRateFirst, EPSILON), None);

        let debts = vec![Debt::new(1, "Paid", dec!(0), dec!(18), dec!(10))];
        assert_eq!(
            select_target(&debts, Strategy::SmallestBalanceFirst, EPSILON),
            None
        );
    }

    #[test]
    fn test_strategy_serde_names() {
        assert_eq!(
            serde_json::to_string(&Strategy::SmallestBalanceFirst).unwrap(),
            "\"snowball\""
        );
        let parsed: Strategy = serde_json::from_str("\"avalanche\"").unwrap();
        assert_eq!(parsed, Strategy::HighestRateFirst);
        assert_eq!(Strategy::HighestRateFirst.to_string(), "avalanche");
    }
}
