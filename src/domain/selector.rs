//! Trade selection by pair and instrument.
//!
//! Narrows the full trade table to one pair's trades, keeping source order.
//! The optional instrument filter restricts which pairs are candidates.

use crate::domain::error::PairsimError;
use crate::domain::trade::{SelectedTrade, TradeRecord};
use std::collections::HashSet;

/// Label used for the pass-through instrument filter.
pub const ALL_INSTRUMENTS: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstrumentFilter {
    All,
    Instrument(String),
}

impl InstrumentFilter {
    /// Parses a user-supplied filter; blank input and `All` (any case) mean no filter.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_INSTRUMENTS) {
            InstrumentFilter::All
        } else {
            InstrumentFilter::Instrument(trimmed.to_string())
        }
    }

    pub fn matches(&self, trade: &TradeRecord) -> bool {
        match self {
            InstrumentFilter::All => true,
            InstrumentFilter::Instrument(name) => trade.involves(name),
        }
    }
}

impl std::fmt::Display for InstrumentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstrumentFilter::All => write!(f, "{}", ALL_INSTRUMENTS),
            InstrumentFilter::Instrument(name) => write!(f, "{}", name),
        }
    }
}

/// Returns the trades of `pair_id` in source order, renumbered from 0.
pub fn select(trades: &[TradeRecord], pair_id: &str) -> Result<Vec<SelectedTrade>, PairsimError> {
    let selected: Vec<SelectedTrade> = trades
        .iter()
        .filter(|t| t.pair_id == pair_id)
        .enumerate()
        .map(|(position, trade)| SelectedTrade {
            position,
            trade: trade.clone(),
        })
        .collect();

    if selected.is_empty() {
        return Err(PairsimError::EmptySelection {
            filter: format!("pair '{}'", pair_id),
        });
    }

    log::debug!("selected {} trades for pair '{}'", selected.len(), pair_id);
    Ok(selected)
}

/// Distinct pair ids admitted by `filter`, in first-seen order.
pub fn candidate_pairs(
    trades: &[TradeRecord],
    filter: &InstrumentFilter,
) -> Result<Vec<String>, PairsimError> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for trade in trades.iter().filter(|t| filter.matches(t)) {
        if seen.insert(trade.pair_id.as_str()) {
            pairs.push(trade.pair_id.clone());
        }
    }

    if pairs.is_empty() {
        return Err(PairsimError::EmptySelection {
            filter: format!("instrument filter '{}'", filter),
        });
    }
    Ok(pairs)
}

/// Distinct instruments: first-seen over the first leg, then over the second.
pub fn instruments(trades: &[TradeRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let first_legs = trades.iter().map(|t| t.instrument_1.as_str());
    let second_legs = trades.iter().map(|t| t.instrument_2.as_str());

    first_legs
        .chain(second_legs)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Selects a pair after checking it is admitted by the instrument filter.
///
/// With no explicit pair the first candidate is used.
pub fn select_filtered(
    trades: &[TradeRecord],
    filter: &InstrumentFilter,
    pair_id: Option<&str>,
) -> Result<(String, Vec<SelectedTrade>), PairsimError> {
    let candidates = candidate_pairs(trades, filter)?;

    let pair = match pair_id {
        Some(p) => {
            if !candidates.iter().any(|c| c == p) {
                return Err(PairsimError::EmptySelection {
                    filter: format!("pair '{}' with instrument filter '{}'", p, filter),
                });
            }
            p.to_string()
        }
        None => candidates[0].clone(),
    };

    let selected = select(trades, &pair)?;
    Ok((pair, selected))
}
