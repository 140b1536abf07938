//! Headless match-3 runner (default binary).
//!
//! Builds a playable field, lets a move policy play it for a number of moves,
//! then prints the final board and score. No rendering, input or timers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::SeedableRng;

use match3::config::AppConfig;
use match3::core::{GameField, SimpleRng};
use match3::engine::{autoplay, Policy};

#[derive(Debug, Parser)]
#[command(author, version, about = "Play a match-3 board with an automated move policy")]
struct Cli {
    /// TOML config file (missing file means defaults)
    #[arg(long, value_name = "FILE", default_value = "match3.toml")]
    config: PathBuf,

    /// Seed for board generation and refill
    #[arg(long)]
    seed: Option<u32>,

    /// Board edge length
    #[arg(long, value_name = "N")]
    size: Option<usize>,

    /// Number of distinct elements
    #[arg(long, value_name = "K")]
    elements: Option<u8>,

    /// Maximum number of moves to play
    #[arg(long, value_name = "N")]
    moves: Option<u32>,

    /// Move policy
    #[arg(long, value_enum, ignore_case = true)]
    policy: Option<Policy>,

    /// Regenerate dead boards instead of stopping
    #[arg(long)]
    reshuffle: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    apply_overrides(&mut config, &cli);
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "seed {}, {}x{} board, {} elements, policy {}",
        seed,
        config.field.size,
        config.field.size,
        config.field.num_elements,
        config.play.policy.as_str()
    );

    let mut field = GameField::new(config.field, SimpleRng::new(seed))
        .context("generating a playable board")?;
    info!("initial board:\n{}", field.board());

    let mut rng = rand::rngs::StdRng::seed_from_u64(u64::from(seed));
    let summary = autoplay(&mut field, &config.play, &mut rng, &mut ())?;
    info!(
        "played {} move(s), {} cascade(s), {} reshuffle(s), stopped: {:?}",
        summary.moves_played, summary.cascades, summary.reshuffles, summary.stop
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&field.snapshot())?);
    } else {
        println!("{}", field.board());
        println!("score: {}", field.score());
    }
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(size) = cli.size {
        config.field.size = size;
    }
    if let Some(elements) = cli.elements {
        config.field.num_elements = elements;
    }
    if let Some(moves) = cli.moves {
        config.play.max_moves = moves;
    }
    if let Some(policy) = cli.policy {
        config.play.policy = policy;
    }
    if cli.reshuffle {
        config.play.reshuffle = true;
    }
}
