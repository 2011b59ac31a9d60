use super::report::{SimulationResult, aggregate};
use crate::config::SimulationConfig;
use crate::domain::debt::{Debt, Money};
use crate::domain::strategy::{Strategy, select_target};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// Working state of one run. Owns a private copy of the caller's debts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub debts: Vec<Debt>,
    /// Completed monthly cycles.
    pub months: u32,
    /// Full-precision interest accumulator.
    pub total_interest: Money,
    pub payoff_order: Vec<String>,
    pub converged: bool,
}

impl SimulationState {
    fn new(debts: &[Debt]) -> Self {
        Self {
            debts: debts.to_vec(),
            months: 0,
            total_interest: Money::ZERO,
            payoff_order: Vec::new(),
            converged: false,
        }
    }

    fn all_cleared(&self, epsilon: Decimal) -> bool {
        self.debts.iter().all(|debt| debt.is_cleared(epsilon))
    }
}

/// Balances at the end of one simulated month, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSnapshot {
    /// 1-based month number.
    pub month: u32,
    pub balances: Vec<Money>,
    pub interest: Money,
    pub paid: Money,
}

/// Tracks which debts have already been reported as paid off.
struct PayoffTracker {
    recorded: Vec<bool>,
}

impl PayoffTracker {
    /// Debts that start out cleared never enter the payoff order.
    fn new(debts: &[Debt], epsilon: Decimal) -> Self {
        Self {
            recorded: debts.iter().map(|debt| debt.is_cleared(epsilon)).collect(),
        }
    }

    fn observe(&mut self, state: &mut SimulationState, index: usize, epsilon: Decimal) {
        let debt = &state.debts[index];
        if self.recorded[index] || !debt.is_cleared(epsilon) {
            return;
        }
        self.recorded[index] = true;
        debug!(
            month = state.months + 1,
            debt = %debt.label,
            "Debt paid off"
        );
        state.payoff_order.push(debt.label.clone());
    }
}

/// Month-by-month repayment simulator.
///
/// Each call works on its own copy of the input, so one engine can be shared
/// freely and runs never observe each other.
#[derive(Debug, Clone, Default)]
pub struct PayoffEngine {
    config: SimulationConfig,
}

impl PayoffEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the simulation to payoff or to the configured month cap.
    pub fn simulate(
        &self,
        debts: &[Debt],
        extra_monthly: Money,
        strategy: Strategy,
    ) -> SimulationResult {
        let state = self.run(debts, extra_monthly, strategy, None);
        aggregate(state, strategy, self.config.display_precision)
    }

    /// Like [`simulate`](Self::simulate), also returning one snapshot per month.
    pub fn simulate_with_schedule(
        &self,
        debts: &[Debt],
        extra_monthly: Money,
        strategy: Strategy,
    ) -> (SimulationResult, Vec<MonthSnapshot>) {
        let mut schedule = Vec::new();
        let state = self.run(debts, extra_monthly, strategy, Some(&mut schedule));
        (
            aggregate(state, strategy, self.config.display_precision),
            schedule,
        )
    }

    fn run(
        &self,
        debts: &[Debt],
        extra_monthly: Money,
        strategy: Strategy,
        mut schedule: Option<&mut Vec<MonthSnapshot>>,
    ) -> SimulationState {
        let epsilon = self.config.epsilon;
        let extra_monthly = extra_monthly.max(Money::ZERO);
        let mut state = SimulationState::new(debts);
        let mut tracker = PayoffTracker::new(&state.debts, epsilon);

        loop {
            if state.all_cleared(epsilon) {
                state.converged = true;
                break;
            }
            if state.months >= self.config.max_months {
                warn!(
                    strategy = %strategy,
                    max_months = self.config.max_months,
                    "Plan does not pay off within the month cap"
                );
                break;
            }

            let Some((interest, paid)) =
                self.step(&mut state, &mut tracker, extra_monthly, strategy)
            else {
                warn!(
                    strategy = %strategy,
                    month = state.months + 1,
                    "Balances outgrew the decimal range; stopping"
                );
                break;
            };
            state.months += 1;

            if let Some(schedule) = schedule.as_deref_mut() {
                schedule.push(MonthSnapshot {
                    month: state.months,
                    balances: state.debts.iter().map(|debt| debt.balance).collect(),
                    interest,
                    paid,
                });
            }
        }

        debug!(
            strategy = %strategy,
            months = state.months,
            total_interest = %state.total_interest,
            converged = state.converged,
            "Simulation finished"
        );
        state
    }

    /// One calendar month: interest, minimums, then the surplus waterfall.
    ///
    /// Returns the month's interest and payments, or `None` on decimal overflow.
    fn step(
        &self,
        state: &mut SimulationState,
        tracker: &mut PayoffTracker,
        extra_monthly: Money,
        strategy: Strategy,
    ) -> Option<(Money, Money)> {
        let epsilon = self.config.epsilon;

        let mut interest = Money::ZERO;
        for debt in state.debts.iter_mut() {
            interest = interest.checked_add(debt.accrue_interest()?)?;
        }
        state.total_interest = state.total_interest.checked_add(interest)?;

        let mut paid = Money::ZERO;
        for index in 0..state.debts.len() {
            let debt = &mut state.debts[index];
            let minimum = debt.minimum_payment;
            paid += debt.pay(minimum);
            tracker.observe(state, index, epsilon);
        }

        // The pool is the extra budget alone; minimums were settled above.
        let mut pool = extra_monthly;
        while pool.value() > epsilon {
            let Some(target) = select_target(&state.debts, strategy, epsilon) else {
                break;
            };
            let chunk = state.debts[target].pay(pool);
            pool -= chunk;
            paid += chunk;
            tracker.observe(state, target, epsilon);
        }

        Some((interest, paid))
    }
}

/// Simulates with the default configuration (1000-month cap, 0.01 epsilon).
pub fn simulate(debts: &[Debt], extra_monthly: Money, strategy: Strategy) -> SimulationResult {
    PayoffEngine::default().simulate(debts, extra_monthly, strategy)
}
