use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::logging::init_tracing;
use grid_snake::modes::PlayMode;
use grid_snake::InitError;
use tracing::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a wrapping grid, steered by clicks or keys")]
struct Cli {
    /// JSON config file; command line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Largest x coordinate (derived from the terminal size when omitted)
    #[arg(long)]
    width: Option<i32>,

    /// Largest y coordinate (derived from the terminal size when omitted)
    #[arg(long)]
    height: Option<i32>,

    /// Board cells per grid node when deriving the grid from the terminal
    #[arg(long)]
    node_size: Option<u32>,

    /// Milliseconds between steps
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; the terminal is busy drawing the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig, InitError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if self.width.is_some() {
            config.grid_width = self.width;
        }
        if self.height.is_some() {
            config.grid_height = self.height;
        }
        if let Some(node_size) = self.node_size {
            config.node_size = node_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    info!(?config, "application start");

    let mut play_mode = PlayMode::new(config);
    let result = play_mode.run().await;

    info!("application stop");
    result
}
