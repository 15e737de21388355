//! Explicitly managed trade dataset cache.
//!
//! The full trade table is loaded through a [`TradeDataPort`] on first use and
//! shared as an immutable snapshot until [`DatasetProvider::invalidate`] is
//! called. Failed loads are not cached.

use crate::domain::error::PairsimError;
use crate::domain::trade::TradeRecord;
use crate::ports::data_port::TradeDataPort;
use std::sync::{Arc, Mutex, PoisonError};

pub type TradeSnapshot = Arc<[TradeRecord]>;

pub struct DatasetProvider<P: TradeDataPort> {
    port: P,
    cached: Mutex<Option<TradeSnapshot>>,
}

impl<P: TradeDataPort> DatasetProvider<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            cached: Mutex::new(None),
        }
    }

    /// Returns the cached table, loading it if nothing is cached.
    pub fn snapshot(&self) -> Result<TradeSnapshot, PairsimError> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(snapshot) = cached.as_ref() {
            log::debug!("using cached trade table from {}", self.port.describe());
            return Ok(Arc::clone(snapshot));
        }

        let trades = self.port.load_trades()?;
        log::info!("loaded {} trades from {}", trades.len(), self.port.describe());
        let snapshot: TradeSnapshot = trades.into();
        *cached = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drops the cached table; the next [`snapshot`](Self::snapshot) reloads.
    pub fn invalidate(&self) {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if cached.take().is_some() {
            log::debug!("invalidated trade table from {}", self.port.describe());
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}
