use super::engine::SimulationState;
use crate::domain::debt::Money;
use crate::domain::strategy::Strategy;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub strategy: Strategy,
    /// Months simulated. Only a real payoff date when `converged` is true.
    pub months_to_payoff: u32,
    /// Rounded to the configured display precision.
    pub total_interest_paid: Money,
    /// Labels in the order the debts first reached a cleared balance.
    pub payoff_order: Vec<String>,
    /// False when the iteration cap was hit with money still owed.
    pub converged: bool,
}

/// Which of two compared results is preferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    A,
    B,
    Equivalent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Absolute difference in months.
    pub faster_by: u32,
    /// Absolute difference in total interest.
    pub cheaper_by: Money,
    pub verdict: Verdict,
}

impl Comparison {
    /// The preferred result, or `None` when they are equivalent.
    pub fn winner<'a>(
        &self,
        a: &'a SimulationResult,
        b: &'a SimulationResult,
    ) -> Option<&'a SimulationResult> {
        match self.verdict {
            Verdict::A => Some(a),
            Verdict::B => Some(b),
            Verdict::Equivalent => None,
        }
    }
}

/// Packages a finished run. The interest total is rounded here and only here.
pub fn aggregate(state: SimulationState, strategy: Strategy, precision: u32) -> SimulationResult {
    SimulationResult {
        strategy,
        months_to_payoff: state.months,
        total_interest_paid: state.total_interest.round_dp(precision),
        payoff_order: state.payoff_order,
        converged: state.converged,
    }
}

/// Ranks two results: fewer months first, then lower interest.
///
/// Interest totals within `epsilon` of each other count as equal. A plan that
/// pays off always beats one that does not; two plans that never pay off
/// are equivalent.
pub fn compare(a: &SimulationResult, b: &SimulationResult, epsilon: Decimal) -> Comparison {
    let faster_by = a.months_to_payoff.abs_diff(b.months_to_payoff);
    let cheaper_by = a.total_interest_paid.abs_diff(b.total_interest_paid);

    let verdict = match (a.converged, b.converged) {
        (true, false) => Verdict::A,
        (false, true) => Verdict::B,
        (false, false) => Verdict::Equivalent,
        (true, true) => match a.months_to_payoff.cmp(&b.months_to_payoff) {
            Ordering::Less => Verdict::A,
            Ordering::Greater => Verdict::B,
            Ordering::Equal if cheaper_by.value() <= epsilon => Verdict::Equivalent,
            Ordering::Equal if a.total_interest_paid < b.total_interest_paid => Verdict::A,
            Ordering::Equal => Verdict::B,
        },
    };

    Comparison {
        faster_by,
        cheaper_by,
        verdict,
    }
}
