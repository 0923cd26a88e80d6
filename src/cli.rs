//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_holdings_adapter::CsvHoldingsAdapter;
use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::table_report_adapter::{
    TableReportAdapter, DEFAULT_CURRENCY, NEEDS_CORRECTION,
};
use crate::domain::config_validation::{
    validate_config, validate_price_config, validate_report_config, REPORT_FORMATS,
};
use crate::domain::error::FolioError;
use crate::domain::holding::HoldingField;
use crate::domain::portfolio::Portfolio;
use crate::domain::valuation::{valuate, Valuation};
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stockfolio", about = "Stock portfolio tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Value holdings against a price sheet
    Valuate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(short, long)]
        prices: Option<PathBuf>,
        #[arg(short, long)]
        format: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Add a holding
    Add {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        ticker: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
        #[arg(long, allow_hyphen_values = true)]
        buy_price: String,
    },
    /// Change the quantity or buy price of a holding
    Update {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        field: HoldingField,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Remove a holding
    Remove {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
        #[arg(long)]
        ticker: String,
    },
    /// List holdings as stored
    List {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        holdings: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// A single change to the stored holdings.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Add {
        ticker: String,
        quantity: String,
        buy_price: String,
    },
    Update {
        ticker: String,
        field: HoldingField,
        value: String,
    },
    Remove {
        ticker: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Valuate {
            config,
            holdings,
            prices,
            format,
            output,
        } => run_valuate(
            config.as_ref(),
            holdings.as_ref(),
            prices.as_ref(),
            format.as_deref(),
            output.as_ref(),
        ),
        Command::Add {
            config,
            holdings,
            ticker,
            quantity,
            buy_price,
        } => run_edit(
            config.as_ref(),
            holdings.as_ref(),
            Edit::Add {
                ticker,
                quantity,
                buy_price,
            },
        ),
        Command::Update {
            config,
            holdings,
            ticker,
            field,
            value,
        } => run_edit(
            config.as_ref(),
            holdings.as_ref(),
            Edit::Update {
                ticker,
                field,
                value,
            },
        ),
        Command::Remove {
            config,
            holdings,
            ticker,
        } => run_edit(config.as_ref(), holdings.as_ref(), Edit::Remove { ticker }),
        Command::List { config, holdings } => run_list(config.as_ref(), holdings.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FolioError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<Option<FileConfigAdapter>, ExitCode> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p).map(Some)
        }
        None => Ok(None),
    }
}

/// `--holdings` wins over `[portfolio] holdings`.
pub fn resolve_holdings_path(
    holdings_override: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> Result<PathBuf, FolioError> {
    if let Some(p) = holdings_override {
        return Ok(p.clone());
    }
    config
        .and_then(|c| c.get_string("portfolio", "holdings"))
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| FolioError::ConfigMissing {
            section: "portfolio".into(),
            key: "holdings".into(),
        })
}

pub fn build_price_adapter(
    config: Option<&dyn ConfigPort>,
    prices_override: Option<&PathBuf>,
) -> Result<CsvPriceAdapter, FolioError> {
    match config {
        Some(c) => CsvPriceAdapter::from_config(c, prices_override),
        None => prices_override
            .cloned()
            .map(CsvPriceAdapter::new)
            .ok_or_else(|| FolioError::ConfigMissing {
                section: "prices".into(),
                key: "source".into(),
            }),
    }
}

/// Pick the report writer. `format_override` wins over `[report] format`.
pub fn build_report(
    config: Option<&dyn ConfigPort>,
    format_override: Option<&str>,
) -> Result<Box<dyn ReportPort>, FolioError> {
    let format = match format_override {
        Some(f) => f.trim().to_lowercase(),
        None => config
            .map(|c| c.get_string_or("report", "format", "table"))
            .unwrap_or_else(|| "table".to_string())
            .trim()
            .to_lowercase(),
    };
    let currency = config
        .map(|c| c.get_string_or("report", "currency", DEFAULT_CURRENCY))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    match format.as_str() {
        "table" => Ok(Box::new(TableReportAdapter::new(&currency))),
        "csv" => Ok(Box::new(CsvReportAdapter::new())),
        other => Err(FolioError::ConfigInvalid {
            section: "report".into(),
            key: "format".into(),
            reason: format!(
                "unknown format '{}' (expected one of: {})",
                other,
                REPORT_FORMATS.join(", ")
            ),
        }),
    }
}

/// Load holdings, take one price snapshot, value, and write the report.
pub fn run_valuate_pipeline(
    holdings_port: &dyn HoldingsPort,
    price_port: &dyn PricePort,
    report: &dyn ReportPort,
    out: &mut dyn Write,
) -> Result<Valuation, FolioError> {
    let portfolio = holdings_port.load()?;
    let prices = price_port.snapshot()?;
    let valuation = valuate(&portfolio, &prices);
    report.write(&valuation, out)?;
    Ok(valuation)
}

/// Apply one edit and persist it. Returns whether the portfolio changed;
/// nothing is written when it did not.
pub fn apply_edit(holdings_port: &dyn HoldingsPort, edit: &Edit) -> Result<bool, FolioError> {
    let mut portfolio = holdings_port.load()?;
    let changed = match edit {
        Edit::Add {
            ticker,
            quantity,
            buy_price,
        } => portfolio.add_holding(ticker, quantity, buy_price),
        Edit::Update {
            ticker,
            field,
            value,
        } => portfolio.update_holding(ticker, *field, value),
        Edit::Remove { ticker } => portfolio.remove_holding(ticker).is_some(),
    };
    if changed {
        holdings_port.save(&portfolio)?;
    }
    Ok(changed)
}

fn run_valuate(
    config_path: Option<&PathBuf>,
    holdings_path: Option<&PathBuf>,
    prices_path: Option<&PathBuf>,
    format: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_ref = config.as_ref().map(|c| c as &dyn ConfigPort);

    if let Some(c) = config_ref {
        if let Err(e) = validate_price_config(c).and_then(|()| validate_report_config(c)) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let setup = resolve_holdings_path(holdings_path, config_ref).and_then(|h| {
        let prices = build_price_adapter(config_ref, prices_path)?;
        let report = build_report(config_ref, format)?;
        Ok((CsvHoldingsAdapter::new(h), prices, report))
    });
    let (holdings_port, price_port, report) = match setup {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut buf = Vec::new();
    let result = run_valuate_pipeline(&holdings_port, &price_port, report.as_ref(), &mut buf)
        .and_then(|valuation| write_report(output_path, &buf).map(|()| valuation));

    match result {
        Ok(valuation) => {
            let missing = valuation.unavailable_tickers();
            eprintln!("Valued {} holdings", valuation.rows.len());
            if !missing.is_empty() {
                eprintln!("warning: no current price for {}", missing.join(", "));
            }
            if let Some(p) = output_path {
                eprintln!("Report written to: {}", p.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Write a fully rendered report. The output file is only touched once
/// rendering has succeeded.
fn write_report(output_path: Option<&PathBuf>, report: &[u8]) -> Result<(), FolioError> {
    match output_path {
        Some(p) => fs::write(p, report)?,
        None => io::stdout().lock().write_all(report)?,
    }
    Ok(())
}

fn open_holdings(
    config_path: Option<&PathBuf>,
    holdings_path: Option<&PathBuf>,
) -> Result<CsvHoldingsAdapter, ExitCode> {
    let config = load_optional_config(config_path)?;
    let config_ref = config.as_ref().map(|c| c as &dyn ConfigPort);
    resolve_holdings_path(holdings_path, config_ref)
        .map(CsvHoldingsAdapter::new)
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })
}

fn run_edit(config_path: Option<&PathBuf>, holdings_path: Option<&PathBuf>, edit: Edit) -> ExitCode {
    let adapter = match open_holdings(config_path, holdings_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match apply_edit(&adapter, &edit) {
        Ok(true) => {
            eprintln!("Saved {}", adapter.path().display());
            ExitCode::SUCCESS
        }
        Ok(false) => {
            match &edit {
                Edit::Add { ticker, .. } => {
                    eprintln!("{} is already held or empty, portfolio unchanged", ticker.trim())
                }
                Edit::Update { ticker, .. } | Edit::Remove { ticker } => {
                    eprintln!("{} is not held, portfolio unchanged", ticker.trim())
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list(config_path: Option<&PathBuf>, holdings_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match open_holdings(config_path, holdings_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let portfolio = match adapter.load() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if portfolio.is_empty() {
        eprintln!("No holdings in {}", adapter.path().display());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = write_listing(&portfolio, &mut io::stdout().lock()) {
        let err = FolioError::from(e);
        eprintln!("error: {err}");
        return (&err).into();
    }
    eprintln!("{} holdings", portfolio.len());
    ExitCode::SUCCESS
}

/// One line per holding as stored, raw text kept for fields that did not
/// parse and flagged for correction.
pub fn write_listing(portfolio: &Portfolio, out: &mut dyn Write) -> io::Result<()> {
    for holding in portfolio.holdings() {
        write!(
            out,
            "{}\tqty={}\tbuy={}",
            holding.ticker, holding.quantity, holding.buy_price
        )?;
        if !(holding.quantity.is_parsed() && holding.buy_price.is_parsed()) {
            write!(out, "  {}", NEEDS_CORRECTION)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!(
        "  holdings: {}",
        adapter.get_string("portfolio", "holdings").unwrap_or_default()
    );
    eprintln!(
        "  prices:   {} (ticker column {}, price column {})",
        adapter.get_string("prices", "source").unwrap_or_default(),
        adapter.get_int("prices", "ticker_column", 0),
        adapter.get_int("prices", "price_column", 1),
    );
    eprintln!(
        "  report:   {}",
        adapter.get_string_or("report", "format", "table")
    );
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
