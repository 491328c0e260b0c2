use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use worldgen::{GeneratorConfig, MapDocument, generate_with_retries};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of rooms to generate
    #[arg(short, long)]
    rooms: i64,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML file with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Regenerate with a derived seed this many times when growth stalls
    #[arg(long, default_value_t = 1)]
    retries: u32,
    #[arg(long)]
    pretty: bool,
}

impl Args {
    /// The first attempt plus one per retry.
    fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

#[derive(Serialize)]
struct Output {
    seed: u64,
    attempt: u32,
    fingerprint: u64,
    map: MapDocument,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let world = generate_with_retries(args.rooms, args.seed, args.attempts(), &config)
        .with_context(|| {
            format!("Failed to generate {} rooms from seed {}", args.rooms, args.seed)
        })?;
    info!(
        "generated {} rooms ({}x{}) with seed {} on attempt {}",
        world.map.len(),
        world.map.width(),
        world.map.height(),
        world.seed,
        world.attempt
    );

    let output = Output {
        seed: world.seed,
        attempt: world.attempt,
        fingerprint: world.map.fingerprint(),
        map: world.map.to_document(),
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to serialize map")?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_rooms_is_given() {
        let args = Args::try_parse_from(["worldgen-cli", "--rooms", "12"]).expect("valid args");
        assert_eq!(args.rooms, 12);
        assert_eq!(args.seed, 42);
        assert_eq!(args.retries, 1);
        assert!(args.config.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn retries_count_extra_attempts_after_the_first() {
        let parse = |retries: &str| {
            Args::try_parse_from(["worldgen-cli", "--rooms", "8", "--retries", retries])
                .expect("valid args")
                .attempts()
        };
        assert_eq!(parse("0"), 1);
        assert_eq!(parse("3"), 4);
        assert_eq!(parse(&u32::MAX.to_string()), u32::MAX);

        let defaults = Args::try_parse_from(["worldgen-cli", "--rooms", "8"]).expect("valid args");
        assert_eq!(defaults.attempts(), 2);
    }

    #[test]
    fn negative_room_counts_parse_and_are_left_to_the_generator() {
        let args = Args::try_parse_from(["worldgen-cli", "--rooms=-5"]).expect("valid args");
        assert_eq!(args.rooms, -5);
    }

    #[test]
    fn rooms_is_required() {
        assert!(Args::try_parse_from(["worldgen-cli", "--seed", "3"]).is_err());
    }
}
