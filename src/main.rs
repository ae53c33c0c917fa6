mod config;
mod engine;
mod game;
mod input;
mod logging;
mod session;
mod snake;
mod term;
mod ticker;

use anyhow::{Context, Result};
use clap::Parser;

use config::{Cli, GameConfig};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = GameConfig::try_from(&cli).context("Invalid game configuration")?;
    tracing::info!(?config, "starting snake");

    let mut game = game::SnakeGame::new(&config)?;
    // The game loop returns once the player quits
    game.run()
}
