use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tripchat::core::config::{self, CliOverrides, TripchatConfig};
use tripchat::history::HttpHistorySource;
use tripchat::tui;

#[derive(Parser)]
#[command(name = "tripchat", about = "Group chat for a shared trip")]
struct Args {
    /// History endpoint (overrides TRIPCHAT_HISTORY_URL and the config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Chat title shown in the top bar
    #[arg(short, long)]
    title: Option<String>,

    /// Where to write the log
    #[arg(long, default_value = "tripchat.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        TripchatConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint,
            title: args.title,
        },
    );
    let source = HttpHistorySource::new(
        &resolved.history_endpoint,
        Duration::from_secs(resolved.request_timeout_secs),
    )
    .map_err(|e| {
        log::error!("Cannot start: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    log::info!("Tripchat starting up against {}", source.endpoint());

    tui::run(resolved, Arc::new(source))
}
