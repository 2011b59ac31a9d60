use clap::{Parser, ValueEnum};
use debtpayoff::application::engine::{MonthSnapshot, PayoffEngine};
use debtpayoff::application::report::{SimulationResult, compare};
use debtpayoff::config::SimulationConfig;
use debtpayoff::domain::strategy::Strategy;
use debtpayoff::domain::validation::normalize;
use debtpayoff::interfaces::csv::debt_reader::DebtReader;
use debtpayoff::interfaces::csv::report_writer::ReportWriter;
use debtpayoff::interfaces::json::JsonReport;
use debtpayoff::logger;
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Snowball,
    Avalanche,
    Both,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Snowball => vec![Strategy::SmallestBalanceFirst],
            StrategyArg::Avalanche => vec![Strategy::HighestRateFirst],
            StrategyArg::Both => Strategy::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debts CSV file with a `label,balance,rate,minimum` header
    input: PathBuf,

    /// Extra monthly budget above the sum of minimum payments
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    extra: String,

    /// Repayment strategy to simulate
    #[arg(long, value_enum, default_value_t = StrategyArg::Both)]
    strategy: StrategyArg,

    /// Hard cap on simulated months (overrides the config file)
    #[arg(long)]
    max_months: Option<u32>,

    /// TOML file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Also print the month-by-month balances
    #[arg(long)]
    schedule: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path).into_diagnostic()?,
        None => SimulationConfig::default(),
    };
    if let Some(max_months) = cli.max_months {
        config = config.with_max_months(max_months);
    }

    // Read and sanitize debts
    let file = File::open(&cli.input).into_diagnostic()?;
    let mut raw_debts = Vec::new();
    for row in DebtReader::new(file).debts() {
        match row {
            Ok(raw) => raw_debts.push(raw),
            Err(e) => eprintln!("Error reading debt: {}", e),
        }
    }
    let (debts, extra) = normalize(&raw_debts, Some(cli.extra.as_str()));
    let labels: Vec<String> = debts.iter().map(|debt| debt.label.clone()).collect();

    // Each strategy runs on its own blocking task with its own copy of the debts
    let engine = PayoffEngine::new(config);
    let handles: Vec<_> = cli
        .strategy
        .strategies()
        .into_iter()
        .map(|strategy| {
            let engine = engine.clone();
            let debts = debts.clone();
            let with_schedule = cli.schedule;
            tokio::task::spawn_blocking(move || {
                if with_schedule {
                    engine.simulate_with_schedule(&debts, extra, strategy)
                } else {
                    (engine.simulate(&debts, extra, strategy), Vec::new())
                }
            })
        })
        .collect();

    let mut results: Vec<SimulationResult> = Vec::new();
    let mut schedules: Vec<Vec<MonthSnapshot>> = Vec::new();
    for handle in handles {
        let (result, schedule) = handle.await.into_diagnostic()?;
        results.push(result);
        schedules.push(schedule);
    }

    for result in results.iter().filter(|result| !result.converged) {
        eprintln!(
            "WARNING: {} plan never pays off under current minimums (stopped after {} months).",
            result.strategy, result.months_to_payoff
        );
    }

    let comparison = match results.as_slice() {
        [a, b] => Some(compare(a, b, engine.config().epsilon)),
        _ => None,
    };

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => {
            let mut writer = ReportWriter::new(stdout.lock());
            writer.write_results(&results).into_diagnostic()?;
            if let (Some(comparison), [a, b]) = (&comparison, results.as_slice()) {
                writer.write_comparison(a, b, comparison).into_diagnostic()?;
            }
            if cli.schedule {
                for (result, schedule) in results.iter().zip(&schedules) {
                    writer
                        .write_schedule(result, &labels, schedule)
                        .into_diagnostic()?;
                }
            }
        }
        OutputFormat::Json => {
            let schedules: BTreeMap<&'static str, &[MonthSnapshot]> = if cli.schedule {
                results
                    .iter()
                    .zip(&schedules)
                    .map(|(result, schedule)| (result.strategy.name(), schedule.as_slice()))
                    .collect()
            } else {
                BTreeMap::new()
            };
            let report = JsonReport {
                results: &results,
                comparison: comparison.as_ref(),
                schedules,
            };
            report.write_to(stdout.lock()).into_diagnostic()?;
            println!();
        }
    }

    Ok(())
}
