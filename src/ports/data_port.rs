//! Trade data access port trait.

use crate::domain::error::PairsimError;
use crate::domain::trade::TradeRecord;

/// Source of the full, normalized trade table.
pub trait TradeDataPort {
    /// Loads every trade in source order.
    fn load_trades(&self) -> Result<Vec<TradeRecord>, PairsimError>;

    /// Human-readable origin of the data, used in log and error messages.
    fn describe(&self) -> String;
}
