use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a fixed-size grid")]
struct Cli {
    /// Board width in pixels
    #[arg(long, default_value = "600")]
    width: u32,

    /// Board height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Side length of one grid cell in pixels
    #[arg(long, default_value = "20")]
    cell_size: u32,

    /// Number of body parts the snake starts with
    #[arg(long, default_value = "6")]
    initial_length: usize,

    /// Milliseconds between game ticks
    #[arg(long, default_value = "90")]
    delay_ms: u64,

    /// Seed for apple placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken over by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            board_width: self.width,
            board_height: self.height,
            cell_size: self.cell_size,
            initial_body_parts: self.initial_length,
            tick_delay_ms: self.delay_ms,
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config();
    config.validate().context("Invalid board configuration")?;

    let mut human_mode = HumanMode::new(config, cli.seed);
    human_mode.run().await?;

    Ok(())
}
