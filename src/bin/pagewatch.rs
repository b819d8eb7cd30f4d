use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, fmt};

use pagewatch::config::CheckConfig;
use pagewatch::checker::PageChecker;
use pagewatch::version::VERSION;

#[derive(Parser, Debug)]
#[command(author, version = VERSION, about = "Content-verification checker for a single static page", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the full run report as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily("logs", "pagewatch.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in file
        .json();

    // Log to stderr: human-readable format. Keeps stdout clean for --json.
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    // Default to `info` level if RUST_LOG is not set.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging();
    info!(version = VERSION, "Starting pagewatch...");

    let config = match CheckConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Critical error loading configuration. Exiting.");
            std::process::exit(2);
        }
    };

    let checker = match PageChecker::new(config) {
        Ok(checker) => checker,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client. Exiting.");
            std::process::exit(2);
        }
    };

    info!(target_url = %checker.config().target_url, "Running page checks.");
    let report = checker.run_all().await;

    for outcome in &report.outcomes {
        if outcome.successful {
            info!(
                check = %outcome.kind,
                response_time_ms = ?outcome.response_time_ms,
                details = %outcome.details,
                "Check passed."
            );
        } else {
            warn!(check = %outcome.kind, details = %outcome.details, "Check failed.");
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => error!(error = %e, "Failed to serialize the run report."),
        }
    }

    if !report.all_passed() {
        let failed = report.failed().count();
        warn!(failed, total = report.outcomes.len(), "Some checks failed.");
        std::process::exit(1);
    }
    info!("All checks passed.");
}
