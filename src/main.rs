use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "aprs-router",
    version,
    about = "APRS iGate/digipeater router: gates RF packets to APRS-IS, digipeats and beacons"
)]
struct Cli {
    /// Station configuration file (default: $APRS_ROUTER_CONFIG or ./station.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Route TNC2 packets read from stdin, printing RF and APRS-IS egress to stdout
    Run {
        /// Scheduler tick in milliseconds; the router handles one packet per tick
        #[arg(long, default_value_t = 50)]
        tick_ms: u64,
        /// Serve Prometheus metrics on this port
        #[arg(long)]
        metrics_port: Option<u16>,
    },
    /// Load and validate the station configuration
    CheckConfig,
    /// Print the beacon packet built from the station configuration
    Beacon,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    aprs_router::log_format::init_logging(std::io::stderr().is_terminal());

    let config_path = cli
        .config
        .unwrap_or_else(aprs_router::station_config::station_config_path);

    match cli.command {
        Commands::Run {
            tick_ms,
            metrics_port,
        } => commands::handle_run(&config_path, tick_ms, metrics_port).await,
        Commands::CheckConfig => commands::handle_check_config(&config_path),
        Commands::Beacon => commands::handle_beacon(&config_path),
    }
}
