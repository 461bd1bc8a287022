use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;

use building_generator::ascii;
use building_generator::building::{AxisRatioMode, TileKind};
use building_generator::config::GenerationConfig;
use building_generator::export;
use building_generator::seeds::BuildingSeeds;

#[derive(Parser, Debug)]
#[command(name = "building_generator")]
#[command(about = "Generate building interiors with binary space partitioning")]
struct Args {
    /// Width of the building in tiles
    #[arg(short = 'W', long)]
    width: Option<i64>,

    /// Height of the building in tiles
    #[arg(short = 'H', long)]
    height: Option<i64>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compare aspect ratios with real division instead of integer division
    #[arg(long)]
    exact_ratio: bool,

    /// Number of buildings to generate, each from the next derived seed
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// Export the texture to PNG
    #[arg(short, long)]
    output: Option<String>,

    /// Pixels per tile in the PNG export
    #[arg(long, default_value = "1")]
    scale: u32,

    /// Export an ASCII layout file
    #[arg(long)]
    ascii: Option<String>,

    /// Export the tile grid as JSON
    #[arg(long)]
    json: Option<String>,

    /// Print the layout to stdout
    #[arg(long)]
    print: bool,
}

/// Path for regeneration `index`: the first keeps the given name, later
/// ones get a `_<index>` suffix before the extension.
fn indexed_path(path: &str, index: usize) -> String {
    if index == 0 {
        return path.to_string();
    }
    let p = Path::new(path);
    let stem = p.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match p.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    p.with_file_name(name).to_string_lossy().to_string()
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.exact_ratio {
        config.split.ratio_mode = AxisRatioMode::Exact;
    }

    let seeds = match config.seed {
        Some(seed) => BuildingSeeds::from_master(seed),
        None => BuildingSeeds::default(),
    };

    println!("Generating with seed: {}", seeds.master);
    println!("Building size: {}x{}", config.width, config.height);

    for index in 0..args.count.max(1) {
        let seed = seeds.regeneration(index);
        let mut rng = seeds.rng(index);
        let building = config.generate(&mut rng)?;

        println!(
            "Building {} (seed {}): {} leaves, {} rooms, {} wall tiles",
            index,
            seed,
            building.tree().len(),
            building.rooms().count(),
            building.count_kind(TileKind::Wall)
        );

        if args.print {
            print!("{}", ascii::render_ascii(&building.tiles));
        }
        if let Some(path) = &args.output {
            let path = indexed_path(path, index);
            export::export_png(&building.tiles, &path, args.scale)?;
            println!("  Texture saved to {}", path);
        }
        if let Some(path) = &args.ascii {
            let path = indexed_path(path, index);
            ascii::export_ascii(&building, seed, &path)?;
            println!("  Layout saved to {}", path);
        }
        if let Some(path) = &args.json {
            let path = indexed_path(path, index);
            export::export_json(&building, &path)?;
            println!("  Tile data saved to {}", path);
        }
    }

    Ok(())
}
