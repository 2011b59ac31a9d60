pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod interfaces;
pub mod logger;

pub use application::engine::{MonthSnapshot, PayoffEngine, simulate};
pub use application::report::{Comparison, SimulationResult, Verdict, compare};
pub use config::SimulationConfig;
pub use domain::debt::{Debt, Money};
pub use domain::strategy::{Strategy, select_target};
pub use domain::validation::{RawDebt, normalize};
