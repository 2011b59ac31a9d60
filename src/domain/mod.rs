//! Domain types: debts, money, the sanitizing validator and the
//! surplus-targeting strategies.

pub mod debt;
pub mod strategy;
pub mod validation;
