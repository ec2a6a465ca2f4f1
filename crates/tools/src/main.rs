use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use roomgraph::{
    DungeonConfig, DungeonLayout, NullPresenter, PathBias, Presenter, RoomGraphBuilder, RoomReady,
};
use std::path::PathBuf;
use tools::{DungeonConfigFile, PreviewPresenter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
    Preview,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Total rooms including the seed room. Overrides the config file.
    #[arg(short, long)]
    rooms: Option<usize>,
    /// TOML file with a `[dungeon]` table
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Grow the dungeon to the west instead of the east
    #[arg(long)]
    leftward: bool,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
    /// Print the generation log after the layout
    #[arg(long)]
    log: bool,
}

fn load_config(args: &Args) -> Result<DungeonConfig> {
    let mut config = match &args.config {
        Some(path) => {
            DungeonConfigFile::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?
                .dungeon
        }
        None => DungeonConfig::default(),
    };
    if let Some(rooms) = args.rooms {
        config.target_room_count = rooms;
    }
    if args.leftward {
        config.path_bias = PathBias::Leftward;
    }
    Ok(config)
}

fn print_summary(layout: &DungeonLayout) {
    for room in layout.rooms_in_generation_order() {
        let mut tags = Vec::new();
        if room.is_branch {
            tags.push("branch");
        }
        if room.stranded {
            tags.push("stranded");
        }
        println!(
            "room {:>3} at ({}, {}) entrance {:?} doors {} {}",
            room.sequence_index,
            room.origin.x,
            room.origin.y,
            room.entrance,
            room.door_count(),
            tags.join(",")
        );
    }

    let gaps = layout.topology_gaps();
    println!(
        "Topology gaps: {} unconsumed origins, {} stranded rooms",
        gaps.unconsumed_origins, gaps.stranded_rooms
    );
    println!("Fingerprint: {:016x}", layout.fingerprint());
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let mut builder = RoomGraphBuilder::from_seed(config, args.seed)
        .with_context(|| "Rejected dungeon configuration")?;

    let layout = match args.format {
        OutputFormat::Preview => {
            let mut preview = PreviewPresenter::new(args.seed);
            // The seed room already exists in the level, so the builder never hands it over.
            if let Some(seed_room) = builder.rooms().first() {
                preview.draw_room(&RoomReady::new(seed_room.clone()));
            }
            let layout = builder.build(&mut preview).with_context(|| "Generation failed")?;
            print!("{}", preview.render());
            if !preview.skipped().is_empty() {
                println!("Stranded rooms not drawn: {:?}", preview.skipped());
            }
            layout
        }
        OutputFormat::Summary => {
            let layout = builder.build(&mut NullPresenter).with_context(|| "Generation failed")?;
            print_summary(&layout);
            layout
        }
        OutputFormat::Json => {
            let layout = builder.build(&mut NullPresenter).with_context(|| "Generation failed")?;
            let json = serde_json::to_string_pretty(&layout)
                .with_context(|| "Failed to serialize layout")?;
            println!("{json}");
            layout
        }
    };

    if args.log {
        for event in &layout.log {
            println!("{event:?}");
        }
    }

    Ok(())
}
