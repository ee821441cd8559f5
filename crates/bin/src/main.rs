//! bizval CLI binary.
//!
//! Screens listed companies and values them from scraped annual statements.

mod paths;

use bizval::data::{BiznesradarSource, Blacklist, DataSource, GoogleFinanceSource};
use bizval::output::ExportFormat;
use bizval::{
    GF_TICKERS_FILE, GPW_TICKERS_FILE, Preset, ScreenConfig, Screener, TickerList, appraise,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bizval")]
#[command(about = "bizval: fundamental valuation and screening of listed companies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Screen a ticker list and write the ranked report
    Screen(ScreenArgs),

    /// Print every metric and valuation for one company
    Value {
        /// Company ticker
        ticker: String,

        /// Data provider
        #[arg(long, value_enum, default_value = "primary")]
        source: SourceKind,

        /// Snapshot directory (default: platform data dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Years of history the metrics look back
        #[arg(long, default_value = "5")]
        years: usize,

        /// Discount rate
        #[arg(long, default_value = "0.065")]
        discount_rate: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage the blacklist
    Blacklist {
        /// Blacklist file (default: platform data dir)
        #[arg(long)]
        path: Option<PathBuf>,

        #[command(subcommand)]
        action: BlacklistAction,
    },
}

#[derive(Debug, Args)]
struct ScreenArgs {
    /// Data provider
    #[arg(long, value_enum, default_value = "primary")]
    source: SourceKind,

    /// Snapshot directory (default: platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Ticker list, a JSON array of symbols
    #[arg(long)]
    tickers: Option<PathBuf>,

    /// Blacklist file
    #[arg(long)]
    blacklist: Option<PathBuf>,

    /// Ignore the blacklist
    #[arg(long)]
    no_blacklist: bool,

    /// Directory the report is written to
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Report name prefix (default: gpw or gf, by source)
    #[arg(long)]
    tag: Option<String>,

    /// JSON screening configuration; overrides --preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Threshold preset: default, gpw or gf (default: by source)
    #[arg(long)]
    preset: Option<Preset>,

    /// Pause between companies in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value = "csv")]
    format: ReportFormat,
}

#[derive(Debug, Subcommand)]
enum BlacklistAction {
    /// Add a ticker
    Add {
        /// Ticker to exclude from future runs
        ticker: String,
    },

    /// List blacklisted tickers
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// biznesradar.pl snapshots
    Primary,
    /// Google Finance snapshots
    Secondary,
}

impl SourceKind {
    const fn provider(self) -> &'static str {
        match self {
            Self::Primary => "biznesradar",
            Self::Secondary => "googlefinance",
        }
    }

    const fn tickers_file(self) -> &'static str {
        match self {
            Self::Primary => GPW_TICKERS_FILE,
            Self::Secondary => GF_TICKERS_FILE,
        }
    }

    const fn preset(self) -> Preset {
        match self {
            Self::Primary => Preset::Gpw,
            Self::Secondary => Preset::Gf,
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Primary => "gpw",
            Self::Secondary => "gf",
        }
    }

    fn open(self, data_dir: Option<PathBuf>) -> Box<dyn DataSource> {
        let dir = data_dir.unwrap_or_else(|| paths::default_data_dir(self.provider()));
        match self {
            Self::Primary => Box::new(BiznesradarSource::new(dir)),
            Self::Secondary => Box::new(GoogleFinanceSource::new(dir)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Csv,
    Json,
}

impl From<ReportFormat> for ExportFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Csv => Self::Csv,
            ReportFormat::Json => Self::PrettyJson,
        }
    }
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen(args) => screen(args)?,
        Commands::Value {
            ticker,
            source,
            data_dir,
            years,
            discount_rate,
            json,
        } => value(&ticker, source, data_dir, years, discount_rate, json)?,
        Commands::Blacklist { path, action } => {
            manage_blacklist(path.unwrap_or_else(paths::default_blacklist_path), action)?;
        }
    }

    Ok(())
}

fn screen_config(args: &ScreenArgs) -> Result<ScreenConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ScreenConfig::load(path)?,
        None => args.preset.unwrap_or(args.source.preset()).config(),
    };
    if let Some(delay_ms) = args.delay_ms {
        config.request_delay_ms = delay_ms;
    }
    Ok(config)
}

fn screen(args: ScreenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = screen_config(&args)?;
    let tickers_path = args
        .tickers
        .unwrap_or_else(|| paths::default_tickers_path(args.source.tickers_file()));
    let tickers = TickerList::load(&tickers_path)?;
    let blacklist = if args.no_blacklist {
        Blacklist::disabled()
    } else {
        Blacklist::load(args.blacklist.unwrap_or_else(paths::default_blacklist_path))?
    };
    let tag = args.tag.unwrap_or_else(|| args.source.tag().to_string());
    let out_dir = args.out_dir.unwrap_or_else(paths::default_out_dir);

    info!(
        "Screening {} tickers from {} ({} blacklisted)",
        tickers.as_slice().len(),
        tickers_path.display(),
        blacklist.len()
    );

    let screener = Screener::new(args.source.open(args.data_dir), config);
    let preparation = screener.prepare(tickers.as_slice(), &blacklist);

    let pb = ProgressBar::new(preparation.companies.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let batch = screener.run_prepared(preparation, |symbol| {
        pb.set_message(symbol.to_string());
        pb.inc(1);
    });
    pb.finish_with_message(format!("Evaluated {} companies", batch.results.len()));

    let report = batch.report(&tag);
    let path = report.write_to_dir(&out_dir, args.format.into())?;

    println!("{}", report.to_ascii_table());
    println!("{}", batch.summary);
    println!("Report written to {}", path.display());

    Ok(())
}

fn value(
    ticker: &str,
    source: SourceKind,
    data_dir: Option<PathBuf>,
    years: usize,
    discount_rate: f64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ticker = ticker.to_uppercase();
    let source = source.open(data_dir);
    let model = ScreenConfig::default().model;
    let appraisal = appraise(source.as_ref(), &ticker, years, discount_rate, &model)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&appraisal)?);
    } else {
        println!("{appraisal}");
    }

    Ok(())
}

fn manage_blacklist(
    path: PathBuf,
    action: BlacklistAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut blacklist = Blacklist::load(path)?;

    match action {
        BlacklistAction::Add { ticker } => {
            let ticker = ticker.to_uppercase();
            if blacklist.add(&ticker)? {
                println!("Added {ticker} to {}", blacklist.path().display());
            } else {
                println!("{ticker} is already blacklisted");
            }
        }
        BlacklistAction::List => {
            if blacklist.is_empty() {
                println!("Blacklist is empty");
            }
            for ticker in blacklist.entries() {
                println!("{ticker}");
            }
        }
    }

    Ok(())
}
