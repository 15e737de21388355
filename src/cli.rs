//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{self, CsvTradeAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::typst_report::tables::{format_money, format_pct};
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::config_validation::validate_simulation_config;
use crate::domain::dataset::DatasetProvider;
use crate::domain::error::PairsimError;
use crate::domain::performance::validate_investment;
use crate::domain::selector::{self, InstrumentFilter};
use crate::domain::simulation::{build_simulation_config, run_simulation, SimulationConfig, SimulationOutcome};
use crate::ports::data_port::TradeDataPort;
use crate::ports::report_port::{ReportPort, ReportSubject};

#[derive(Parser, Debug)]
#[command(name = "pairsim", about = "Pairs trading profit simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate an investment in one pair and write a report
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        pair: Option<String>,
        #[arg(long)]
        instrument: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        investment: Option<f64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List pairs, optionally only those involving an instrument
    Pairs {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        instrument: Option<String>,
    },
    /// List instruments appearing in the trade data
    Instruments {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct SimulationOverrides {
    pub pair: Option<String>,
    pub instrument: Option<String>,
    pub investment: Option<f64>,
    pub output: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            pair,
            instrument,
            investment,
            output,
            export,
        } => run_simulate(
            &config,
            SimulationOverrides {
                pair,
                instrument,
                investment,
                output,
            },
            export.as_deref(),
        ),
        Command::Pairs { config, instrument } => run_pairs(&config, instrument.as_deref()),
        Command::Instruments { config } => run_instruments(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: PairsimError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(fail)
}

/// Builds the simulation config from the file, then applies overrides.
pub fn resolve_simulation_config(
    adapter: &FileConfigAdapter,
    overrides: SimulationOverrides,
) -> Result<SimulationConfig, PairsimError> {
    let mut config = build_simulation_config(adapter)?;

    if let Some(pair) = overrides.pair.filter(|p| !p.trim().is_empty()) {
        config.pair = Some(pair.trim().to_string());
    }
    if let Some(instrument) = overrides.instrument {
        config.instrument_filter = InstrumentFilter::parse(&instrument);
    }
    if let Some(investment) = overrides.investment {
        config.investment = investment;
    }
    if let Some(output) = overrides.output {
        config.report_path = output;
    }

    Ok(config)
}

fn provider_for(config: &FileConfigAdapter) -> Result<DatasetProvider<CsvTradeAdapter>, PairsimError> {
    let sim = build_simulation_config(config)?;
    Ok(DatasetProvider::new(CsvTradeAdapter::new(sim.trades_file)))
}

fn run_simulate(
    config_path: &Path,
    overrides: SimulationOverrides,
    export_path: Option<&Path>,
) -> ExitCode {
    // Stage 1: Load and validate config
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_simulation_config(&adapter) {
        return fail(e);
    }

    // Stage 2: Apply command-line overrides
    let sim_config = match resolve_simulation_config(&adapter, overrides) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    // Stages 3-6: Data dependent pipeline
    let provider = DatasetProvider::new(CsvTradeAdapter::new(sim_config.trades_file.clone()));
    let report_port = TypstReportAdapter::new(sim_config.template_path.clone());

    match run_simulation_pipeline(&provider, &sim_config, &report_port, export_path) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

pub fn run_simulation_pipeline<P: TradeDataPort>(
    provider: &DatasetProvider<P>,
    config: &SimulationConfig,
    report_port: &dyn ReportPort,
    export_path: Option<&Path>,
) -> Result<SimulationOutcome, PairsimError> {
    // Stage 3: Select and compute
    eprintln!(
        "Simulating {} investment (instrument filter: {})",
        format_money(config.investment),
        config.instrument_filter
    );
    let outcome = run_simulation(provider, config)?;

    // Stage 4: Print console summary to stderr
    print_summary(&outcome);

    // Stage 5: Generate report
    let subject = ReportSubject {
        pair_id: outcome.pair_id.clone(),
        instrument_filter: outcome.instrument_filter.to_string(),
    };
    let output = config.report_path.display().to_string();
    report_port.write(&outcome.report, &subject, &output)?;
    eprintln!("\nReport written to: {}", output);

    // Stage 6: Optional trade log export
    if let Some(path) = export_path {
        csv_adapter::write_trade_log(&outcome.report, path)?;
        eprintln!("Trade log written to: {}", path.display());
    }

    Ok(outcome)
}

fn print_summary(outcome: &SimulationOutcome) {
    let summary = &outcome.report.summary;
    eprintln!("\n=== Results for {} ===", outcome.pair_id);
    eprintln!(
        "Net Profit:            {} ({})",
        format_money(summary.total_profit_value),
        format_pct(summary.total_return_pct)
    );
    eprintln!("Final Portfolio Value: {}", format_money(summary.final_equity));
    eprintln!("Win Rate:              {}", format_pct(summary.win_rate));
    eprintln!("Total Trades:          {}", summary.trade_count);
}

fn run_pairs(config_path: &Path, instrument: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let provider = match provider_for(&adapter) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    let filter = match instrument {
        Some(i) => InstrumentFilter::parse(i),
        None => match build_simulation_config(&adapter) {
            Ok(c) => c.instrument_filter,
            Err(e) => return fail(e),
        },
    };

    let result = provider
        .snapshot()
        .and_then(|trades| selector::candidate_pairs(&trades, &filter));
    match result {
        Ok(pairs) => {
            for pair in &pairs {
                println!("{}", pair);
            }
            eprintln!("{} pairs found", pairs.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_instruments(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let provider = match provider_for(&adapter) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    match provider.snapshot() {
        Ok(trades) => {
            let names = selector::instruments(&trades);
            for name in &names {
                println!("{}", name);
            }
            eprintln!("{} instruments found", names.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        return fail(e);
    }

    let resolved = build_simulation_config(&adapter)
        .and_then(|config| validate_investment(config.investment).map(|_| config));
    match resolved {
        Ok(config) => {
            eprintln!("  trades_file: {}", config.trades_file.display());
            eprintln!("  investment:  {}", format_money(config.investment));
            eprintln!(
                "  pair:        {}",
                config.pair.as_deref().unwrap_or("(first candidate)")
            );
            eprintln!("  instrument:  {}", config.instrument_filter);
            eprintln!("  report:      {}", config.report_path.display());
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
