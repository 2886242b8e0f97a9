//! Headless driver for lesson-core.
//!
//! Loads content through `lesson-content`, plays lessons with a greedy policy
//! and reports the outcome of each run as JSON.

pub mod config;
pub mod logging;
pub mod runner;

pub use config::SimConfig;
pub use runner::{SimReport, Simulation};
