use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Result};
use clap::Parser;

use crate::snake::GridInt;

pub const DEFAULT_GRID_SIZE: GridInt = 20;
pub const DEFAULT_TICK_MS: u64 = 150;

// The initial snake spans rows N/2..=N/2+2, so smaller boards can't hold it
const MIN_GRID_SIZE: GridInt = 5;
const MAX_GRID_SIZE: GridInt = 40;

#[derive(Parser, Debug)]
#[command(name = "snake")]
#[command(version, about = "Classic grid snake for the terminal")]
pub struct Cli {
    /// Side length of the square board, in cells
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: GridInt,

    /// Milliseconds between two game steps
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_size: GridInt,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl TryFrom<&Cli> for GameConfig {
    type Error = anyhow::Error;

    fn try_from(cli: &Cli) -> Result<Self> {
        ensure!(
            (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&cli.grid_size),
            "grid size must be between {} and {}, got {}",
            MIN_GRID_SIZE, MAX_GRID_SIZE, cli.grid_size
        );
        ensure!(cli.tick_ms > 0, "tick interval must be at least 1 ms");

        Ok(GameConfig {
            grid_size: cli.grid_size,
            tick_interval: Duration::from_millis(cli.tick_ms),
            seed: cli.seed,
        })
    }
}
