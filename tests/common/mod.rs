#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use pairsim::domain::error::PairsimError;
use pairsim::domain::simulation::SimulationConfig;
use pairsim::domain::selector::InstrumentFilter;
pub use pairsim::domain::trade::{pair_id, SelectedTrade, TradeRecord};
use pairsim::ports::data_port::TradeDataPort;
use std::cell::Cell;
use std::path::PathBuf;

pub struct MockTradePort {
    pub trades: Vec<TradeRecord>,
    pub error: Option<String>,
    pub loads: Cell<usize>,
}

impl MockTradePort {
    pub fn new(trades: Vec<TradeRecord>) -> Self {
        Self {
            trades,
            error: None,
            loads: Cell::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            trades: Vec::new(),
            error: Some(reason.to_string()),
            loads: Cell::new(0),
        }
    }
}

impl TradeDataPort for MockTradePort {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, PairsimError> {
        self.loads.set(self.loads.get() + 1);
        match &self.error {
            Some(reason) => Err(PairsimError::DataUnavailable {
                path: "mock".into(),
                reason: reason.clone(),
            }),
            None => Ok(self.trades.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".into()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn make_trade(a: &str, b: &str, day: u32, net_return: f64) -> TradeRecord {
    TradeRecord {
        pair_id: pair_id(a, b),
        instrument_1: a.to_string(),
        instrument_2: b.to_string(),
        date: date(2024, 1, day),
        net_return,
    }
}

pub fn make_selection(returns: &[f64]) -> Vec<SelectedTrade> {
    returns
        .iter()
        .enumerate()
        .map(|(i, &r)| SelectedTrade {
            position: i,
            trade: TradeRecord {
                pair_id: pair_id("KO", "PEP"),
                instrument_1: "KO".into(),
                instrument_2: "PEP".into(),
                date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
                net_return: r,
            },
        })
        .collect()
}

/// Two pairs interleaved, with KO - PEP carrying the 0.05 / -0.02 / 0.03 sequence.
pub fn sample_table() -> Vec<TradeRecord> {
    vec![
        make_trade("KO", "PEP", 2, 0.05),
        make_trade("XOM", "CVX", 3, 0.01),
        make_trade("KO", "PEP", 9, -0.02),
        make_trade("XOM", "CVX", 10, -0.04),
        make_trade("KO", "PEP", 16, 0.03),
    ]
}

pub fn sample_config(report_path: PathBuf) -> SimulationConfig {
    SimulationConfig {
        trades_file: PathBuf::from("unused.csv"),
        investment: 100_000.0,
        pair: Some("KO - PEP".into()),
        instrument_filter: InstrumentFilter::All,
        report_path,
        template_path: None,
    }
}

pub const TRADES_CSV: &str = "Stock1,Stock2,Entry Date,Exit Date,Net Return\n\
    KO,PEP,2024-01-01,2024-01-02,0.05\n\
    XOM,CVX,2024-01-02,2024-01-03,0.01\n\
    KO,PEP,2024-01-05,2024-01-09,-0.02\n\
    XOM,CVX,2024-01-06,2024-01-10,-0.04\n\
    KO,PEP,2024-01-12,2024-01-16,0.03\n";
