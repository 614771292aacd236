use clap::Parser;
use libpulse_watch::{config::Config, validate_endpoints, Monitor};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "upmon")]
#[command(about = "HTTP endpoint availability monitor", long_about = None)]
struct Args {
    /// Path to the TOML config file with the endpoint list
    config: PathBuf,

    /// Enable debug-level logging (equivalent to RUST_LOG=debug)
    #[arg(long, short = 'd')]
    debug: bool,

    /// Append logs to this file in addition to stdout
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // The appender guard must outlive both loops, so it stays bound
    // here for the life of the process.
    let (file_layer, _guard) = match &args.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config.display(), error = %e, "could not load configuration");
            std::process::exit(1);
        }
    };

    let endpoints = validate_endpoints(config.endpoints);
    info!(endpoints = endpoints.len(), "starting availability monitor");

    let monitor = Monitor::new(endpoints, config.monitor);

    let reporter = monitor.clone();
    tokio::spawn(async move {
        reporter.run_reporter().await;
    });

    monitor.run_dispatch().await;
    Ok(())
}
