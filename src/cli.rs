//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::backtest::{BacktestConfig, BacktestResult, run_backtest};
use crate::domain::config_validation::{build_backtest_config, build_strategy_config};
use crate::domain::error::Error;
use crate::domain::metrics::MetricsReport;
use crate::domain::strategy::{StrategyConfig, generate};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "longflat", about = "Long/flat strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over a CSV price file
    Backtest {
        /// CSV file with `date` and `close` columns
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
        /// Write the equity curve as an SVG chart
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Signal rule: ma_cross or momentum
    #[arg(long)]
    pub rule: Option<String>,
    #[arg(long = "short")]
    pub short_window: Option<usize>,
    #[arg(long = "long")]
    pub long_window: Option<usize>,
    #[arg(long)]
    pub lookback: Option<usize>,
    #[arg(long, allow_negative_numbers = true)]
    pub initial_capital: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub risk_free_rate: Option<f64>,
}

/// Config view that answers from the overrides first, then the file.
pub struct LayeredConfig<'a> {
    base: Option<&'a dyn ConfigPort>,
    values: Vec<(&'static str, &'static str, String)>,
}

impl<'a> LayeredConfig<'a> {
    pub fn new(base: Option<&'a dyn ConfigPort>, overrides: &Overrides) -> Self {
        let candidates = [
            ("strategy", "rule", overrides.rule.clone()),
            ("strategy", "short_window", overrides.short_window.map(|v| v.to_string())),
            ("strategy", "long_window", overrides.long_window.map(|v| v.to_string())),
            ("strategy", "lookback", overrides.lookback.map(|v| v.to_string())),
            (
                "backtest",
                "initial_capital",
                overrides.initial_capital.map(|v| v.to_string()),
            ),
            (
                "backtest",
                "risk_free_rate",
                overrides.risk_free_rate.map(|v| v.to_string()),
            ),
        ];
        let values = candidates
            .into_iter()
            .filter_map(|(section, key, value)| value.map(|v| (section, key, v)))
            .collect();
        Self { base, values }
    }
}

impl ConfigPort for LayeredConfig<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.values
            .iter()
            .find(|(s, k, _)| *s == section && *k == key)
            .map(|(_, _, v)| v.clone())
            .or_else(|| self.base.and_then(|b| b.get_string(section, key)))
    }
}

/// Fully validated inputs for one backtest run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub strategy: StrategyConfig,
    pub backtest: BacktestConfig,
    pub chart_path: Option<PathBuf>,
}

pub fn resolve_settings(
    config: &dyn ConfigPort,
    chart_override: Option<PathBuf>,
) -> Result<RunSettings, Error> {
    let strategy = build_strategy_config(config)?;
    let backtest = build_backtest_config(config)?;
    let chart_path = chart_override.or_else(|| {
        config
            .get_string("report", "chart_path")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    });
    Ok(RunSettings {
        strategy,
        backtest,
        chart_path,
    })
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Backtest {
            data,
            config,
            overrides,
            chart,
        } => run_backtest_command(&data, config.as_ref(), &overrides, chart),
        Command::Validate { config } => run_validate(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, Error> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

fn run_backtest_command(
    data_path: &PathBuf,
    config_path: Option<&PathBuf>,
    overrides: &Overrides,
    chart: Option<PathBuf>,
) -> Result<(), Error> {
    // Stage 1: Load and validate config before touching any data
    let file_config = config_path.map(load_config).transpose()?;
    let layered = LayeredConfig::new(
        file_config.as_ref().map(|c| c as &dyn ConfigPort),
        overrides,
    );
    let settings = resolve_settings(&layered, chart)?;
    info!("Strategy: {}", settings.strategy);

    // Stages 2-5: Load, signal, backtest, metrics
    let source = data_path.display().to_string();
    let (_, report) = run_pipeline(
        &CsvAdapter::new(),
        &SvgChartAdapter::new(),
        &source,
        &settings,
    )?;

    print!("{}", format_summary(&report));
    Ok(())
}

/// Load → signal → backtest → metrics, then the optional chart.
///
/// Chart failures are logged and do not fail the run.
pub fn run_pipeline(
    data_port: &dyn DataPort,
    chart_port: &dyn ChartPort,
    source: &str,
    settings: &RunSettings,
) -> Result<(BacktestResult, MetricsReport), Error> {
    info!("Loading prices from {}", source);
    let prices = data_port.load_series(source)?;
    info!("Loaded {} observations", prices.len());

    let signal = generate(&prices, &settings.strategy)?;
    let result = run_backtest(&prices, &signal, settings.backtest.initial_capital)?;
    let report = MetricsReport::compute(&result, settings.backtest.risk_free_rate);

    if let Some(path) = &settings.chart_path {
        match chart_port.render_equity(&result.equity_curve, path) {
            Ok(()) => info!("Chart written to {}", path.display()),
            Err(e) => warn!("Plotting skipped: {}", e),
        }
    }

    Ok((result, report))
}

pub fn format_summary(report: &MetricsReport) -> String {
    format!(
        "===== Backtest Summary =====\n\
         Annualized Return : {:.2}%\n\
         Annualized Vol    : {:.2}%\n\
         Sharpe Ratio      : {:.2}\n\
         Max Drawdown      : {:.2}%\n",
        report.annualized_return * 100.0,
        report.annualized_vol * 100.0,
        report.sharpe_ratio,
        report.max_drawdown * 100.0,
    )
}

fn run_validate(config_path: &PathBuf) -> Result<(), Error> {
    let config = load_config(config_path)?;
    let settings = resolve_settings(&config, None)?;

    println!("Strategy:        {}", settings.strategy);
    println!("Initial capital: {:.2}", settings.backtest.initial_capital);
    println!("Risk-free rate:  {}", settings.backtest.risk_free_rate);
    if let Some(path) = &settings.chart_path {
        println!("Chart path:      {}", path.display());
    }
    println!("\nConfiguration is valid.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_backtest_flags() {
        let cli = Cli::try_parse_from([
            "longflat",
            "backtest",
            "--data",
            "prices.csv",
            "--short",
            "3",
            "--long",
            "5",
            "--initial-capital",
            "-100",
        ])
        .unwrap();
        match cli.command {
            Command::Backtest {
                data, overrides, ..
            } => {
                assert_eq!(data, PathBuf::from("prices.csv"));
                assert_eq!(overrides.short_window, Some(3));
                assert_eq!(overrides.long_window, Some(5));
                assert_eq!(overrides.initial_capital, Some(-100.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn overrides_take_precedence() {
        let file =
            FileConfigAdapter::from_string("[strategy]\nshort_window = 2\nlong_window = 8\n")
                .unwrap();
        let overrides = Overrides {
            long_window: Some(4),
            ..Overrides::default()
        };
        let layered = LayeredConfig::new(Some(&file), &overrides);
        assert_eq!(layered.get_usize("strategy", "short_window").unwrap(), Some(2));
        assert_eq!(layered.get_usize("strategy", "long_window").unwrap(), Some(4));
    }

    #[test]
    fn invalid_override_rejected_before_run() {
        let overrides = Overrides {
            short_window: Some(3),
            long_window: Some(2),
            ..Overrides::default()
        };
        let layered = LayeredConfig::new(None, &overrides);
        let err = resolve_settings(&layered, None).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn chart_path_from_config() {
        let file = FileConfigAdapter::from_string("[report]\nchart_path = out.svg\n").unwrap();
        let settings = resolve_settings(&file, None).unwrap();
        assert_eq!(settings.chart_path, Some(PathBuf::from("out.svg")));

        let settings = resolve_settings(&file, Some(PathBuf::from("cli.svg"))).unwrap();
        assert_eq!(settings.chart_path, Some(PathBuf::from("cli.svg")));
    }

    #[test]
    fn summary_format() {
        let report = MetricsReport {
            annualized_return: 0.1234,
            annualized_vol: 0.0567,
            sharpe_ratio: 1.234,
            max_drawdown: -0.0456,
        };
        assert_eq!(
            format_summary(&report),
            "===== Backtest Summary =====\n\
             Annualized Return : 12.34%\n\
             Annualized Vol    : 5.67%\n\
             Sharpe Ratio      : 1.23\n\
             Max Drawdown      : -4.56%\n"
        );
    }
}
