use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::time::Duration;

use takeout_resolve::{ResolverConfig, TitleResolver};

#[derive(Parser)]
#[command(name = "take-out-pocket-csv")]
#[command(about = "Convert a Pocket export HTML file into CSV, fetching titles for untitled bookmarks")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Pocket export HTML file
    export_html: PathBuf,

    /// Output CSV file name
    output_csv: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC for log timestamps and added dates instead of local time
    #[arg(long)]
    utc: bool,

    /// Skip title fetching; untitled bookmarks keep their URL as title
    #[arg(long)]
    offline: bool,

    /// Total time allowed for each title fetch
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    timeout_secs: u64,

    /// Pause between starting successive title fetches
    #[arg(long, default_value_t = 300, value_name = "MS")]
    launch_delay_ms: u64,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // Wrong arguments are not a failure: explain and do nothing
            print_usage(&e);
            return Ok(());
        }
    };

    init_logging(&cli.log_level, cli.utc);
    run(cli).await
}

fn print_usage(err: &clap::Error) {
    let rendered = err.render().to_string();
    if let Some(reason) = rendered.lines().next() {
        println!("{reason}");
    }
    println!("Error: You must specify a Pocket export HTML file and an output file name.");
    println!("============================ USAGE ================================");
    println!("{}", Cli::command().render_usage());
}

fn init_logging(log_level: &LogLevel, utc: bool) {
    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let html = takeout_extract::read_export(&cli.export_html)?;

    let mut bookmarks = if cli.utc {
        takeout_extract::extract_bookmarks_in(&html, &chrono::Utc)
    } else {
        takeout_extract::extract_bookmarks(&html)
    };
    let placeholders = bookmarks.iter().filter(|b| b.title_is_placeholder()).count();
    tracing::info!(
        path = %cli.export_html.display(),
        bookmarks = bookmarks.len(),
        untitled = placeholders,
        "Extracted bookmarks"
    );

    if cli.offline {
        tracing::info!("Offline, skipping title resolution");
    } else if placeholders > 0 {
        let resolver = TitleResolver::new(ResolverConfig {
            timeout: Duration::from_secs(cli.timeout_secs),
            launch_delay: Duration::from_millis(cli.launch_delay_ms),
            ..ResolverConfig::default()
        })?;
        let summary = resolver.resolve_all(&mut bookmarks).await;
        tracing::info!(
            attempted = summary.attempted,
            resolved = summary.resolved,
            unresolved = summary.unresolved,
            "Resolved titles"
        );
    }

    takeout_csv::write_bookmarks_to_path(&cli.output_csv, &bookmarks)?;

    Ok(())
}
