use anyhow::{Context, Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use roomgraph::{DungeonConfig, PathBias, check_layout, generate};
use std::path::PathBuf;
use tools::DungeonConfigFile;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of layouts to generate
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
    /// Upper bound for the randomized room count
    #[arg(long, default_value_t = 40)]
    max_rooms: usize,
    /// Base configuration; room count and path bias are still randomized per run
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let base = match &args.config {
        Some(path) => {
            DungeonConfigFile::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?
                .dungeon
        }
        None => DungeonConfig::default(),
    };

    println!("Starting layout fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut failures = 0_u32;
    let mut gapped = 0_u32;
    let mut stranded_rooms = 0_usize;
    for _ in 0..args.runs {
        let run_seed = rng.next_u64();
        let rooms = 1 + (rng.next_u64() as usize % args.max_rooms.max(1));
        let path_bias =
            if rng.next_u64() % 2 == 0 { PathBias::Rightward } else { PathBias::Leftward };
        let config = base.clone().with_room_count(rooms).with_path_bias(path_bias);

        let layout = generate(config.clone(), run_seed)
            .with_context(|| format!("Generation failed for run seed {run_seed}"))?;

        let violations = check_layout(&layout, &config);
        if !violations.is_empty() {
            failures += 1;
            println!("run seed {run_seed} ({rooms} rooms, {path_bias:?}):");
            for violation in &violations {
                println!("  {violation}");
            }
        }

        let gaps = layout.topology_gaps();
        if !gaps.is_empty() {
            gapped += 1;
            stranded_rooms += gaps.stranded_rooms;
        }
    }

    println!(
        "{gapped} of {} layouts left topology gaps ({stranded_rooms} stranded rooms)",
        args.runs
    );
    if failures > 0 {
        bail!("{failures} layouts violated structural invariants");
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
