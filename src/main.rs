//! CLI entry point for the GNSS signal labeler.
//!
//! Provides subcommands for labeling an observation table, summarizing an
//! already-labeled table, and checking a single observation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gnss_signal_labeler::chart::{ChartRenderer, SvgBarChart, TextBarChart};
use gnss_signal_labeler::classifier::classify;
use gnss_signal_labeler::output::{print_json, print_pretty, write_labeled};
use gnss_signal_labeler::parser::{read_labels, read_observations};
use gnss_signal_labeler::summary::{LabelSummary, SummaryReport};
use gnss_signal_labeler::Observation;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gnss_signal_labeler")]
#[command(about = "Rule-based LOS / MP / NLOS labeling of GNSS observations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label every observation in a CSV file and write the labeled table
    Label {
        /// CSV with signal_strength, elevation_angle, pseudorange_rate, range_acceleration
        #[arg(value_name = "INPUT", default_value = "PRN9_INPUTS_6_S1_Ocean.csv")]
        input: PathBuf,

        /// Destination CSV for the labeled table
        #[arg(short, long, default_value = "gnss_labeled_ocean_data.csv")]
        output: PathBuf,

        #[command(flatten)]
        presentation: Presentation,
    },
    /// Report the label distribution of an already-labeled CSV file
    Summarize {
        /// CSV containing a label column
        #[arg(value_name = "INPUT", default_value = "gnss_labeled_ocean_data.csv")]
        input: PathBuf,

        #[command(flatten)]
        presentation: Presentation,
    },
    /// Classify a single observation
    Check {
        /// C/N0 in dB
        #[arg(long, allow_hyphen_values = true)]
        signal_strength: f64,

        /// Degrees above the horizon
        #[arg(long, allow_hyphen_values = true)]
        elevation_angle: f64,

        /// m/s
        #[arg(long, allow_hyphen_values = true)]
        pseudorange_rate: f64,

        /// m/s²
        #[arg(long, allow_hyphen_values = true)]
        range_acceleration: f64,
    },
}

#[derive(clap::Args)]
struct Presentation {
    /// Export the distribution chart as SVG instead of printing it
    #[arg(long, value_name = "SVG")]
    chart: Option<PathBuf>,

    /// Width of the text bar chart in characters
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(1..=500))]
    width: u16,

    /// Also log the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/gnss_signal_labeler.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gnss_signal_labeler.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Label {
            input,
            output,
            presentation,
        } => label(&input, &output, &presentation)?,
        Commands::Summarize {
            input,
            presentation,
        } => {
            let labels = read_labels(&input)?;
            present(&input, LabelSummary::from_labels(&labels), &presentation)?;
        }
        Commands::Check {
            signal_strength,
            elevation_angle,
            pseudorange_rate,
            range_acceleration,
        } => {
            let observation = Observation::new(
                signal_strength,
                elevation_angle,
                pseudorange_rate,
                range_acceleration,
            );
            let label = classify(&observation);
            info!(?observation, %label, "Observation classified");
            println!("{label}");
        }
    }

    Ok(())
}

/// Labels `input`, writes it to `output` and presents the distribution.
///
/// A failed write does not hide the computed distribution, and it is the
/// error reported even when presenting fails as well.
fn label(input: &Path, output: &Path, presentation: &Presentation) -> Result<()> {
    let table = read_observations(input)?;
    let labeled = table.label();
    info!(rows = labeled.len(), "Observations labeled");

    let written = write_labeled(output, &labeled);
    if let Err(e) = &written {
        error!(error = %e, "Failed to persist labeled table");
    }

    let presented = present(input, labeled.summary(), presentation);
    written?;
    presented
}

/// Prints the count report and renders the distribution chart.
fn present(source: &Path, summary: LabelSummary, presentation: &Presentation) -> Result<()> {
    print!("\n{}", summary.report());

    let mut renderer: Box<dyn ChartRenderer> = match &presentation.chart {
        Some(path) => Box::new(SvgBarChart::new(path)),
        None => Box::new(TextBarChart::new(std::io::stdout(), usize::from(presentation.width))),
    };
    renderer.render(&summary)?;

    let report = SummaryReport::new(&source.display().to_string(), summary);
    print_pretty(&report);
    if presentation.json {
        print_json(&report)?;
    }

    info!(total = summary.total(), "Summary complete");
    Ok(())
}
