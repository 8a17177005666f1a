//! CLI for meteolab: the school greenhouse weather station, simulated.

mod commands;
mod tui;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "meteolab")]
#[command(about = "meteolab: greenhouse weather station dashboard")]
#[command(version = meteolab_core::VERSION)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// JSON config file (defaults apply to every missing key)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Live feed period in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    refresh_ms: Option<u64>,

    /// Seed for reproducible history and live feed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Clamp the live walk to plausible bounds instead of letting it drift
    #[arg(long, global = true)]
    clamp: bool,

    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Live interactive greenhouse dashboard (TUI)
    Monitor {
        /// Directory for snapshot exports (key: s)
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },

    /// Print the generated sensor history, oldest day first
    History {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Stream the live current reading to stdout
    Watch {
        /// Stop after this many feed ticks (default: until Ctrl+C)
        #[arg(long)]
        ticks: Option<u64>,

        /// Emit one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// List student hypotheses and the research journal
    Hypotheses {
        /// Filter by status
        #[arg(long, value_parser = ["pending", "verified", "refuted"])]
        status: Option<String>,
    },

    /// Show the project timeline and evaluation
    Timeline,

    /// Start the HTTP JSON API
    Server {
        /// Port to listen on
        #[arg(long, default_value = "8060")]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Write to this path instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let overrides = commands::ConfigOverrides {
        path: cli.global.config.as_deref(),
        refresh_ms: cli.global.refresh_ms,
        seed: cli.global.seed,
        clamp: cli.global.clamp,
    };

    match cli.command {
        Commands::Monitor { export_dir } => commands::monitor::run(&overrides, export_dir),
        Commands::History { json } => commands::history::run(&overrides, json),
        Commands::Watch { ticks, json } => commands::watch::run(&overrides, ticks, json),
        Commands::Hypotheses { status } => commands::catalog::hypotheses(status.as_deref()),
        Commands::Timeline => commands::catalog::timeline(),
        Commands::Server { port, host } => commands::server::run(&overrides, &host, port),
        Commands::Config { output } => commands::config::run(&overrides, output.as_deref()),
    }
}
