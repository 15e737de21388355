//! Simulation parameters and the select → compute pipeline.

use crate::domain::dataset::DatasetProvider;
use crate::domain::error::PairsimError;
use crate::domain::performance::{self, PerformanceReport};
use crate::domain::selector::{self, InstrumentFilter};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::TradeDataPort;
use std::path::PathBuf;

pub const DEFAULT_INVESTMENT: f64 = 100_000.0;
pub const DEFAULT_REPORT_PATH: &str = "report.typ";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub trades_file: PathBuf,
    pub investment: f64,
    pub pair: Option<String>,
    pub instrument_filter: InstrumentFilter,
    pub report_path: PathBuf,
    pub template_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub pair_id: String,
    pub instrument_filter: InstrumentFilter,
    pub report: PerformanceReport,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn build_simulation_config(config: &dyn ConfigPort) -> Result<SimulationConfig, PairsimError> {
    let trades_file = non_blank(config.get_string("data", "trades_file")).ok_or_else(|| {
        PairsimError::ConfigMissing {
            section: "data".into(),
            key: "trades_file".into(),
        }
    })?;

    let investment = config
        .get_double("simulation", "investment")
        .map_err(|reason| PairsimError::ConfigInvalid {
            section: "simulation".into(),
            key: "investment".into(),
            reason,
        })?
        .unwrap_or(DEFAULT_INVESTMENT);

    let instrument_filter = non_blank(config.get_string("simulation", "instrument"))
        .map(|s| InstrumentFilter::parse(&s))
        .unwrap_or(InstrumentFilter::All);

    Ok(SimulationConfig {
        trades_file: PathBuf::from(trades_file),
        investment,
        pair: non_blank(config.get_string("simulation", "pair")),
        instrument_filter,
        report_path: non_blank(config.get_string("report", "output"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
        template_path: non_blank(config.get_string("report", "template_path")).map(PathBuf::from),
    })
}

/// Selects the configured pair from the provider's current snapshot and
/// computes its performance. Invalid investments fail before any data is
/// touched.
pub fn run_simulation<P: TradeDataPort>(
    provider: &DatasetProvider<P>,
    config: &SimulationConfig,
) -> Result<SimulationOutcome, PairsimError> {
    performance::validate_investment(config.investment)?;

    let trades = provider.snapshot()?;
    let (pair_id, selected) =
        selector::select_filtered(&trades, &config.instrument_filter, config.pair.as_deref())?;
    let report = performance::compute(&selected, config.investment)?;

    Ok(SimulationOutcome {
        pair_id,
        instrument_filter: config.instrument_filter.clone(),
        report,
    })
}
