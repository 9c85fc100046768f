use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use greedy_snake::game::WorldConfig;
use greedy_snake::modes::{RandomConfig, RandomMode};
use greedy_snake::rl::{InferenceBackend, SnakeEnvironment, default_device};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "greedy_snake")]
#[command(version, about = "Greedy snake grid world for reinforcement learning")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "random")]
    mode: Mode,

    /// JSON world configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length, border included
    #[arg(long)]
    world_size: Option<usize>,

    /// Seed for food placement and random actions
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to play in random mode
    #[arg(long, default_value = "100")]
    episodes: usize,

    /// Step cap per episode in random mode
    #[arg(long, default_value = "10000")]
    max_steps: u64,

    /// Log progress every N episodes
    #[arg(long, default_value = "10")]
    log_frequency: usize,

    /// Print the grid when done
    #[arg(long)]
    show_grid: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play episodes with uniformly random actions
    Random,
    /// Reset one world and print its state
    Inspect,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let world_config = build_world_config(&cli)?;

    match cli.mode {
        Mode::Random => run_random(&cli, world_config),
        Mode::Inspect => run_inspect(world_config),
    }
}

fn build_world_config(cli: &Cli) -> Result<WorldConfig> {
    let mut config = match &cli.config {
        Some(path) => WorldConfig::from_json_file(path)?,
        None => WorldConfig::default(),
    };

    if let Some(world_size) = cli.world_size {
        config.world_size = world_size;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate().context("Invalid world configuration")?;
    Ok(config)
}

fn run_random(cli: &Cli, world_config: WorldConfig) -> Result<()> {
    let config = RandomConfig {
        episodes: cli.episodes,
        max_steps_per_episode: cli.max_steps,
        log_frequency: cli.log_frequency,
        world_config,
    };

    let mut mode = RandomMode::new(config).context("Failed to create random mode")?;
    let summary = mode.run().format_summary();

    println!("{}", "=".repeat(60));
    println!("{summary}");
    println!("{}", "=".repeat(60));

    if cli.show_grid {
        print!("{}", mode.world().grid());
    }

    Ok(())
}

fn run_inspect(world_config: WorldConfig) -> Result<()> {
    let env = SnakeEnvironment::<InferenceBackend>::new(world_config, default_device())
        .context("Failed to create environment")?;
    let world = env.world();
    let info = world.info();

    print!("{}", info.grid);
    println!("Snake: {:?}", info.snake);
    println!("Food: {:?}", info.food);
    println!("Heading: {:?}", world.heading());
    println!("Features: {:?}", world.features());
    println!(
        "Tensor shapes: features {:?}, grid {:?}, frames {:?}",
        env.get_observation().shape().dims,
        env.grid_observation().shape().dims,
        env.stacked_frames().shape().dims
    );
    println!(
        "Info: {}",
        serde_json::to_string(&info).context("Failed to serialize world info")?
    );

    Ok(())
}
