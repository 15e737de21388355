//! pairsim — pairs trading profit simulator.
//!
//! Hexagonal architecture: selection and performance logic in [`domain`],
//! port traits in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
