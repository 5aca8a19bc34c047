mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "speckle",
    about = "Image intensity and gradient engine for digital image correlation"
)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and intensity statistics
    Info(commands::info::InfoArgs),
    /// Gaussian-filter an image
    Filter(commands::filter::FilterArgs),
    /// Compute x/y intensity gradients and write them as .rawi
    Gradients(commands::gradients::GradientsArgs),
    /// Print or save the default parameter file
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Filter(args) => commands::filter::run(args),
        Commands::Gradients(args) => commands::gradients::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
