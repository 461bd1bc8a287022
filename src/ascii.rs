//! ASCII rendering and export for building layouts
//!
//! Rows are written top-down with grid row `y = height - 1` first, so the
//! text reads the same way as the rendered texture.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::building::{Building, Tile, TileKind};
use crate::tilemap::Tilemap;

/// Render the tile grid as one line of characters per row.
pub fn render_ascii(tiles: &Tilemap<Tile>) -> String {
    let mut output = String::with_capacity((tiles.width + 1) * tiles.height);
    for y in (0..tiles.height).rev() {
        for x in 0..tiles.width {
            output.push(tiles.get(x, y).kind.ascii_char());
        }
        output.push('\n');
    }
    output
}

/// Legend mapping characters to tile kinds.
pub fn tile_legend() -> String {
    let mut legend = String::from("=== LEGEND ===\n");
    for kind in TileKind::all() {
        legend.push_str(&format!("  {} {}\n", kind.ascii_char(), kind.display_name()));
    }
    legend
}

/// Write a building to a text file with header, map, legend and statistics.
pub fn export_ascii(building: &Building, seed: u64, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    let total = building.width * building.height;

    writeln!(file, "=== BUILDING GENERATOR LAYOUT ===")?;
    writeln!(file, "Seed: {}", seed)?;
    writeln!(file, "Origin: ({}, {})", building.x, building.y)?;
    writeln!(file, "Size: {}x{}", building.width, building.height)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP ===")?;
    write!(file, "{}", render_ascii(&building.tiles))?;
    writeln!(file)?;

    write!(file, "{}", tile_legend())?;
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    writeln!(file, "Leaves: {}", building.tree().len())?;
    writeln!(file, "Rooms: {}", building.rooms().count())?;
    for kind in TileKind::all() {
        let count = building.count_kind(*kind);
        let pct = 100.0 * count as f64 / total as f64;
        writeln!(file, "  {:12} {:>6} ({:>5.1}%)", kind.display_name(), count, pct)?;
    }

    Ok(())
}
