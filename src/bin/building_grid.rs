//! Debug tool for eyeballing layout variety
//! Renders a grid of regenerations from one master seed, top row with
//! truncating aspect ratios and bottom row with exact ones.

use building_generator::building::{AxisRatioMode, Building, SplitParams};
use building_generator::seeds::BuildingSeeds;
use clap::Parser;
use image::{ImageBuffer, Rgb, RgbImage};

#[derive(Parser, Debug)]
#[command(name = "building_grid")]
#[command(about = "Render a comparison grid of generated buildings")]
struct Args {
    /// Master seed
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Building width in tiles
    #[arg(short = 'W', long, default_value = "64")]
    width: i64,

    /// Building height in tiles
    #[arg(short = 'H', long, default_value = "48")]
    height: i64,

    /// Buildings per row
    #[arg(long, default_value = "4")]
    cols: usize,

    /// Pixels per tile
    #[arg(long, default_value = "4")]
    scale: u32,

    /// Output image path
    #[arg(short, long, default_value = "building_grid.png")]
    output: String,
}

const PADDING: u32 = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let seeds = BuildingSeeds::from_master(args.seed);
    println!("Generating building comparison grid ({})...", seeds);

    let modes = [AxisRatioMode::Truncating, AxisRatioMode::Exact];
    let mut images: Vec<RgbImage> = Vec::new();

    for mode in modes {
        let params = SplitParams {
            ratio_mode: mode,
            ..Default::default()
        };
        for index in 0..args.cols.max(1) {
            // Same seed per column so the rows differ only by ratio mode
            let mut rng = seeds.rng(index);
            let building = Building::generate(0, 0, args.width, args.height, &params, &mut rng)?;
            println!("  {:?} #{}: {} rooms", mode, index, building.rooms().count());
            images.push(building.render_texture());
        }
    }

    let grid = create_grid(&images, args.cols.max(1), modes.len(), args.scale.max(1));
    grid.save(&args.output)?;
    println!("Saved {}", args.output);
    Ok(())
}

fn create_grid(images: &[RgbImage], cols: usize, rows: usize, scale: u32) -> RgbImage {
    if images.is_empty() {
        return ImageBuffer::new(1, 1);
    }

    let cell_width = images[0].width() * scale;
    let cell_height = images[0].height() * scale;

    let grid_width = (cell_width + PADDING) * cols as u32 + PADDING;
    let grid_height = (cell_height + PADDING) * rows as u32 + PADDING;

    let mut grid: RgbImage = ImageBuffer::from_pixel(grid_width, grid_height, Rgb([40, 40, 40]));

    for (idx, img) in images.iter().enumerate() {
        let col = idx % cols;
        let row = idx / cols;
        if row >= rows {
            break;
        }

        let x_offset = PADDING + col as u32 * (cell_width + PADDING);
        let y_offset = PADDING + row as u32 * (cell_height + PADDING);

        for y in 0..cell_height {
            for x in 0..cell_width {
                let pixel = img.get_pixel(x / scale, y / scale);
                grid.put_pixel(x_offset + x, y_offset + y, *pixel);
            }
        }
    }

    grid
}
