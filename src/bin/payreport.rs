//! CLI binary for settlement-payreport.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ReportConfig` and prints or writes the report.

use anyhow::{Context, Result};
use clap::Parser;
use settlement_payreport::pipeline::rate;
use settlement_payreport::{
    build_report, convert, report, write_report, PayReport, ReportConfig, ReportFormat,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the Markdown pay report (default rate: 24 cents/mile)
  payreport settlement.pdf

  # Driver rate from a one-line rate file, report written to a folder
  payreport settlement.pdf --rate-file rate.txt -o reports/

  # Explicit rate, JSON model instead of Markdown
  payreport settlement.pdf --rate 26 --json

  # Already-extracted text (no pdfium needed)
  payreport --text settlement.txt

  # Refuse to produce a report whose trip rows do not line up
  payreport settlement.pdf --strict

ENVIRONMENT VARIABLES:
  PAYREPORT_RATE        Rate in cents per mile
  PAYREPORT_RATE_FILE   Path to the one-line rate file
  PAYREPORT_OUTPUT_DIR  Folder to write the report into
  PDFIUM_LIB_PATH       Directory containing libpdfium (else the system library)
  RUST_LOG              Overrides the log filter (e.g. settlement_payreport=debug)
"#;

/// Turn a driver settlement PDF into a per-trip pay report.
#[derive(Parser, Debug)]
#[command(
    name = "payreport",
    version,
    about = "Turn a driver settlement PDF into a per-trip pay report",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Settlement PDF (or a text file with --text).
    input: PathBuf,

    /// Write the report into this folder as "<driver> <period>.md" instead of stdout.
    #[arg(short, long, env = "PAYREPORT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Rate in cents per mile.
    #[arg(long, env = "PAYREPORT_RATE", conflicts_with = "rate_file")]
    rate: Option<u32>,

    /// One-line file holding the rate; an empty file means the default (24).
    #[arg(long, env = "PAYREPORT_RATE_FILE")]
    rate_file: Option<PathBuf>,

    /// Fee in whole dollars per pickup.
    #[arg(long, env = "PAYREPORT_PICKUP_FEE", default_value_t = 5)]
    pickup_fee: i64,

    /// HST percentage applied to mileage pay.
    #[arg(long, env = "PAYREPORT_HST_PERCENT", default_value_t = 13,
          value_parser = clap::value_parser!(u32).range(0..=100))]
    hst_percent: u32,

    /// Treat INPUT as already-extracted UTF-8 text.
    #[arg(long)]
    text: bool,

    /// PDF user password for encrypted settlements.
    #[arg(long, env = "PAYREPORT_PASSWORD")]
    password: Option<String>,

    /// Fail when trip blocks and pickup/mileage columns differ in length.
    #[arg(long, env = "PAYREPORT_STRICT")]
    strict: bool,

    /// Output the JSON report model instead of Markdown.
    #[arg(long, env = "PAYREPORT_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAYREPORT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PAYREPORT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli).await?;

    // ── Run conversion ───────────────────────────────────────────────────
    let report = if cli.text {
        let text = tokio::fs::read_to_string(&cli.input)
            .await
            .with_context(|| format!("Failed to read settlement text from {:?}", cli.input))?;
        build_report(&text, &config).context("Conversion failed")?
    } else {
        convert(&cli.input, &config)
            .await
            .context("Conversion failed")?
    };

    // ── Output ───────────────────────────────────────────────────────────
    let written = if let Some(ref dir) = cli.output_dir {
        Some(
            write_report(&report, dir, &config)
                .await
                .context("Failed to write report")?,
        )
    } else {
        let body = report::render(&report, config.format).context("Failed to render report")?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(body.as_bytes())
            .context("Failed to write to stdout")?;
        None
    };

    if !cli.quiet {
        print_summary(&report, written.as_ref());
    }

    Ok(())
}

/// Map CLI args to `ReportConfig`.
async fn build_config(cli: &Cli) -> Result<ReportConfig> {
    let rate = match (cli.rate, &cli.rate_file) {
        (Some(r), _) => r,
        (None, Some(path)) => rate::read_rate_file(path)
            .await
            .context("Failed to load driver rate")?,
        (None, None) => settlement_payreport::config::DEFAULT_RATE_CENTS,
    };

    let mut builder = ReportConfig::builder()
        .rate(rate)
        .pickup_fee(cli.pickup_fee)
        .hst_percent(cli.hst_percent)
        .strict_alignment(cli.strict)
        .format(if cli.json {
            ReportFormat::Json
        } else {
            ReportFormat::Markdown
        });

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }

    builder.build().context("Invalid configuration")
}

/// One or two status lines on stderr.
fn print_summary(report: &PayReport, written: Option<&PathBuf>) {
    let target = written
        .map(|p| format!("  →  {}", bold(&p.display().to_string())))
        .unwrap_or_default();

    match report {
        PayReport::Empty => {
            eprintln!("{} Nothing found in the settlement{}", yellow("⚠"), target);
        }
        PayReport::Settlement(s) => {
            eprintln!(
                "{} {}  {} trips  {} miles  final pay ${}{}",
                green("✔"),
                bold(&s.driver_name),
                s.trips.len(),
                s.totals.total_miles,
                s.totals.final_pay,
                target,
            );
            if !s.alignment.is_aligned() {
                eprintln!(
                    "   {} {}",
                    yellow("⚠ trip rows misaligned:"),
                    dim(&format!(
                        "{} trips, {} pickup counts, {} mileages",
                        s.alignment.trip_blocks, s.alignment.pickup_counts, s.alignment.mileages
                    )),
                );
            }
        }
    }
}
