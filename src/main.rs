//! Interactive 2D plane: add points, query neighbours, cluster and classify.

use clap::Parser;
use plano::console::{Command, Console};
use plano::render::{Viewport, Window};
use plano::{Dataset, Palette, SessionParams};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// 2D point plane with k-NN queries and k-means clustering
#[derive(Parser)]
#[command(name = "plano")]
#[command(version)]
#[command(about = "Interactive 2D point plane: distance, k-NN and k-means clustering")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Seed for k-means++ initialisation
    #[arg(long, default_value_t = plano::cluster::DEFAULT_SEED)]
    seed: u64,

    /// Maximum number of Lloyd iterations
    #[arg(long, default_value_t = plano::cluster::DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Group symbols; the count bounds the number of clusters
    #[arg(long, default_value = "o#@S%&V?ZW")]
    symbols: String,

    /// Canvas width in characters
    #[arg(long, default_value_t = 63)]
    width: usize,

    /// Canvas height in characters
    #[arg(long, default_value_t = 29)]
    height: usize,

    /// Run the demo walkthrough before reading commands
    #[arg(long)]
    demo: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let params = SessionParams {
        seed: cli.seed,
        max_iter: cli.max_iter,
        palette: Palette::new(cli.symbols.chars())?,
    };
    let viewport = Viewport::new(Window::default(), cli.width, cli.height)?;
    info!(seed = params.seed, max_iter = params.max_iter, "starting session");

    let stdout = std::io::stdout();
    let mut console = Console::new(Dataset::with_params(params), viewport, stdout.lock());
    if cli.demo {
        console.execute(Command::Demo)?;
    }
    console.run(std::io::stdin().lock())?;
    Ok(())
}
