use anyhow::{Context, Result, ensure};
use clap::Parser;
use grid_snake::game::{GameConfig, Grid};
use grid_snake::modes::{GridLayout, HumanMode};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// YAML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Size the grid from a window in pixels, e.g. 640x480
    #[arg(long, value_parser = parse_window, conflicts_with_all = ["width", "height"])]
    window: Option<(u32, u32)>,

    /// Pixels per grid cell, used with --window
    #[arg(long)]
    block_size: Option<u32>,

    /// Logic ticks per second
    #[arg(long)]
    tps: Option<u32>,

    /// Initial snake length
    #[arg(long)]
    length: Option<usize>,

    /// Go straight into play
    #[arg(long)]
    skip_instructions: bool,

    /// Fit the grid to the whole terminal
    #[arg(long)]
    fullscreen: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_window(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = width
        .trim()
        .parse()
        .map_err(|err| format!("invalid width '{width}': {err}"))?;
    let height = height
        .trim()
        .parse()
        .map_err(|err| format!("invalid height '{height}': {err}"))?;
    Ok((width, height))
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(block_size) = self.block_size {
            config.block_size_px = block_size;
        }
        if let Some((width_px, height_px)) = self.window {
            let block = config.block_size_px;
            ensure!(block > 0, "block size must be positive");
            ensure!(
                width_px >= block && height_px >= block,
                "window {width_px}x{height_px} is smaller than one {block}px block"
            );
            let grid = Grid::from_surface(width_px, height_px, block);
            config.grid_cols = grid.cols();
            config.grid_rows = grid.rows();
        }
        if let Some(width) = self.width {
            config.grid_cols = width;
        }
        if let Some(height) = self.height {
            config.grid_rows = height;
        }
        if let Some(tps) = self.tps {
            config.ticks_per_second = tps;
        }
        if let Some(length) = self.length {
            config.initial_snake_length = length;
        }
        if self.skip_instructions {
            config.show_instructions = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    let layout = if cli.fullscreen {
        GridLayout::FillTerminal
    } else {
        GridLayout::Fixed
    };

    let mut human_mode = HumanMode::new(config, layout);
    human_mode.run().await?;

    Ok(())
}
