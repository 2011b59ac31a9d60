//! Application layer: the monthly simulation loop and result aggregation.
//!
//! `PayoffEngine` is the entry point. It consumes a sanitized debt set, runs
//! it under one `Strategy` and hands back an immutable `SimulationResult`.

pub mod engine;
pub mod report;
