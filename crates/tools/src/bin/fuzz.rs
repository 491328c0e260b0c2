use anyhow::{Result, bail};
use clap::Parser;
use log::{info, warn};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use worldgen::{BacktrackPolicy, GeneratorConfig, WorldMapGenerator, validate};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
    #[arg(short, long, default_value_t = 300)]
    max_rooms: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let limit = GeneratorConfig::default().max_rooms;
    let max_rooms = u64::from(args.max_rooms.max(1)).min(limit as u64);

    let mut stalls = 0_u32;
    let mut violations = 0_u32;
    for run in 0..args.runs {
        let map_seed = rng.next_u64();
        let rooms = 1 + (rng.next_u64() % max_rooms) as i64;
        let backtrack = if rng.next_u32() & 1 == 0 {
            BacktrackPolicy::Reroll
        } else {
            BacktrackPolicy::Exhausted
        };
        let config = GeneratorConfig { backtrack, ..Default::default() };

        match WorldMapGenerator::seeded_with_config(map_seed, config).generate(rooms) {
            Ok(map) => {
                if map.len() != rooms as usize {
                    warn!("run {run}: asked for {rooms} rooms, got {}", map.len());
                    violations += 1;
                } else if let Err(violation) = validate(&map) {
                    warn!("run {run}: seed={map_seed} rooms={rooms} {backtrack:?}: {violation}");
                    violations += 1;
                }
            }
            Err(err) if err.is_stalled() => stalls += 1,
            Err(err) => {
                warn!("run {run}: seed={map_seed} rooms={rooms}: {err}");
                violations += 1;
            }
        }
    }

    info!("{} runs, {stalls} stalled, {violations} invariant violations", args.runs);
    if violations > 0 {
        bail!("{violations} generated maps broke invariants");
    }
    Ok(())
}
