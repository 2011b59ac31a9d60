use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

const ONE_HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// A monetary amount in currency units.
///
/// Wraps `rust_decimal::Decimal` so balances, payments and interest never go
/// through binary floating point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to `dp` decimal places, midpoint away from zero.
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn abs_diff(self, other: Self) -> Self {
        Self((self.0 - other.0).abs())
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

/// Prints without trailing zeros (`700`, not `700.0000`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A single debt as seen by the simulator.
///
/// Callers hand the engine a slice of these; the engine clones it and only
/// ever mutates its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// 1-based position in the caller's input.
    pub id: u32,
    pub label: String,
    /// Outstanding principal plus accrued interest.
    pub balance: Money,
    /// Nominal annual rate, e.g. `36` for 36% p.a.
    pub annual_rate_percent: Decimal,
    /// Contractual monthly floor.
    pub minimum_payment: Money,
}

impl Debt {
    /// Builds a debt, clamping negative amounts and rates to zero.
    pub fn new(
        id: u32,
        label: impl Into<String>,
        balance: Decimal,
        annual_rate_percent: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            balance: Money::new(balance.max(Decimal::ZERO)),
            annual_rate_percent: annual_rate_percent.max(Decimal::ZERO),
            minimum_payment: Money::new(minimum_payment.max(Decimal::ZERO)),
        }
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / ONE_HUNDRED / MONTHS_PER_YEAR
    }

    pub fn is_cleared(&self, epsilon: Decimal) -> bool {
        self.balance.value() <= epsilon
    }

    /// Adds one month of interest to the balance and returns the amount added.
    ///
    /// Returns `None` if the balance no longer fits the decimal range.
    pub fn accrue_interest(&mut self) -> Option<Money> {
        if self.balance.value() <= Decimal::ZERO {
            return Some(Money::ZERO);
        }
        let interest = Money::new(self.balance.value().checked_mul(self.monthly_rate())?);
        self.balance = self.balance.checked_add(interest)?;
        Some(interest)
    }

    /// Pays up to `amount` towards the balance; returns what was actually paid.
    pub fn pay(&mut self, amount: Money) -> Money {
        let paid = amount.min(self.balance).max(Money::ZERO);
        self.balance -= paid;
        paid
    }
}
