//! Closed trade records for a pair strategy.

use chrono::NaiveDateTime;

/// Separator used when a pair identifier is built from its two instruments.
pub const PAIR_SEPARATOR: &str = " - ";

/// One realized trade of a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub pair_id: String,
    pub instrument_1: String,
    pub instrument_2: String,
    pub date: NaiveDateTime,
    pub net_return: f64,
}

impl TradeRecord {
    pub fn involves(&self, instrument: &str) -> bool {
        self.instrument_1 == instrument || self.instrument_2 == instrument
    }

    pub fn is_win(&self) -> bool {
        self.net_return > 0.0
    }
}

/// A trade picked out of the full table, with its dense position inside the
/// selection. Display numbering is `position + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTrade {
    pub position: usize,
    pub trade: TradeRecord,
}

impl SelectedTrade {
    pub fn trade_number(&self) -> usize {
        self.position + 1
    }
}

pub fn pair_id(instrument_1: &str, instrument_2: &str) -> String {
    format!("{}{}{}", instrument_1, PAIR_SEPARATOR, instrument_2)
}
