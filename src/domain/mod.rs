//! Core domain types and logic.

pub mod trade;
pub mod normalize;
pub mod dataset;
pub mod selector;
pub mod performance;
pub mod simulation;
pub mod config_validation;
pub mod error;
