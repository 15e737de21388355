//! CSV trade file adapter and trade log export.

use crate::domain::error::PairsimError;
use crate::domain::normalize::normalize_headers;
use crate::domain::performance::PerformanceReport;
use crate::domain::trade::TradeRecord;
use crate::ports::data_port::TradeDataPort;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvTradeAdapter {
    path: PathBuf,
}

impl CsvTradeAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn data_unavailable(&self, reason: impl ToString) -> PairsimError {
        PairsimError::DataUnavailable {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl TradeDataPort for CsvTradeAdapter {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, PairsimError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.data_unavailable(e))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| PairsimError::Schema {
                reason: format!("unreadable header row: {}", e),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let columns = normalize_headers(&headers)?;
        log::debug!("resolved columns for {}: {:?}", self.path.display(), columns);

        let mut trades = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let row = index + 1;
            let record = result.map_err(|e| PairsimError::MalformedRecord {
                row,
                column: "*".into(),
                reason: format!("CSV parse error: {}", e),
            })?;
            let fields: Vec<&str> = record.iter().collect();
            trades.push(columns.parse_row(&fields, row)?);
        }

        Ok(trades)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Serialize)]
struct TradeLogRow<'a> {
    #[serde(rename = "Trade #")]
    trade_number: usize,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Stock1")]
    instrument_1: &'a str,
    #[serde(rename = "Stock2")]
    instrument_2: &'a str,
    #[serde(rename = "Net Return")]
    net_return: f64,
    #[serde(rename = "Cumulative Return")]
    cumulative_return: f64,
    #[serde(rename = "Trade Profit")]
    trade_profit: f64,
    #[serde(rename = "Equity")]
    equity: f64,
}

/// Writes the enriched trade sequence as CSV, one row per trade.
pub fn write_trade_log(report: &PerformanceReport, path: &Path) -> Result<(), PairsimError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::Writer::from_path(path).map_err(csv_to_io)?;
    for enriched in &report.trades {
        let trade = &enriched.selected.trade;
        wtr.serialize(TradeLogRow {
            trade_number: enriched.selected.trade_number(),
            date: trade.date.format("%Y-%m-%d").to_string(),
            instrument_1: &trade.instrument_1,
            instrument_2: &trade.instrument_2,
            net_return: trade.net_return,
            cumulative_return: enriched.cumulative_return,
            trade_profit: enriched.trade_profit,
            equity: enriched.equity,
        })
        .map_err(csv_to_io)?;
    }
    wtr.flush()?;

    log::info!("wrote {} trade log rows to {}", report.trades.len(), path.display());
    Ok(())
}

fn csv_to_io(err: csv::Error) -> PairsimError {
    PairsimError::Io(std::io::Error::other(err.to_string()))
}
