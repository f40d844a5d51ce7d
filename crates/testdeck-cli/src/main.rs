use clap::{Parser, Subcommand};

use testdeck_core::{seed_tests, Dashboard, SimConfig};

mod tui;

#[derive(Parser)]
#[command(name = "testdeck")]
#[command(about = "Simulated test-management dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Tui {
        /// Seed the run simulation for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Start with an empty registry instead of the seed inventory
        #[arg(long)]
        empty: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (seed, empty) = match cli.command {
        Some(Commands::Tui { seed, empty }) => (seed, empty),
        None => (None, false),
    };

    let config = SimConfig::load();
    let tests = if empty { Vec::new() } else { seed_tests() };
    let dashboard = match seed {
        Some(seed) => Dashboard::seeded(tests, config, seed),
        None => Dashboard::new(tests, config),
    };

    tui::run(dashboard).await
}
