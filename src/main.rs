mod batch;
mod cli;
mod reporting;
mod session;
mod sqlmap;
mod targets;

use batch::context::Context;
use batch::engine::Engine;
use cli::args::Cli;
use anyhow::Context as _;
use clap::{CommandFactory, Parser};
use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const BANNER: &str = r#"
   ____   ___  _     ____    _  _____ ____ _   _
  / ___| / _ \| |   | __ )  / \|_   _/ ___| | | |
  \___ \| | | | |   |  _ \ / _ \ | || |   | |_| |
   ___) | |_| | |___| |_) / ___ \| || |___|  _  |
  |____/ \__\_\_____|____/_/   \_\_| \____|_| |_|

  Batch sqlmap driver with CSV result summaries
"#;

fn print_banner() {
    println!("\x1b[36m{}\x1b[0m", BANNER); // Cyan color
    println!("    Version : {}\n", env!("CARGO_PKG_VERSION"));
}

/// Log to stderr, and to `--log-file` as well when given.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let show_help = args.iter().any(|a| a == "--help" || a == "-h");
    let no_banner = args.iter().any(|a| a == "--no-banner");

    // Banner goes above the help text unless --no-banner
    if show_help && !no_banner {
        print_banner();
        Cli::command().print_long_help()?;
        println!();
        return Ok(());
    }

    let cli = Cli::parse();

    if !cli.no_banner && !cli.quiet {
        print_banner();
    }

    init_tracing(&cli)?;

    let ctx = Context::from_cli(cli)?;
    let engine = Engine::new(ctx)?;
    engine.run().await?;

    Ok(())
}
