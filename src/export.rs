//! Texture and data export for building layouts

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::ser::{SerializeSeq, Serializer};

use crate::building::{Building, Tile, TileKind};
use crate::tilemap::Tilemap;

/// Render tiles to an image, one pixel per tile with the exact kind color.
/// Grid row `y = 0` is the bottom image row.
pub fn render_texture(tiles: &Tilemap<Tile>) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(tiles.width as u32, tiles.height as u32);

    for (x, y, tile) in tiles.iter() {
        let row = tiles.height - 1 - y;
        img.put_pixel(x as u32, row as u32, Rgb(tile.kind.color()));
    }

    img
}

/// Export the texture as a PNG, optionally enlarged by an integer factor.
/// Enlarging repeats pixels (nearest neighbour), never blends.
pub fn export_png(tiles: &Tilemap<Tile>, path: &str, scale: u32) -> Result<(), image::ImageError> {
    let img = render_texture(tiles);
    if scale <= 1 {
        return img.save(path);
    }

    let scaled = ImageBuffer::from_fn(img.width() * scale, img.height() * scale, |px, py| {
        *img.get_pixel(px / scale, py / scale)
    });
    scaled.save(path)
}

/// Serialize a tile grid as rows of tile kinds (row `y = 0` first).
pub fn serialize_tile_kinds<S: Serializer>(
    tiles: &Tilemap<Tile>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut rows = serializer.serialize_seq(Some(tiles.height))?;
    for y in 0..tiles.height {
        let row: Vec<TileKind> = (0..tiles.width).map(|x| tiles.get(x, y).kind).collect();
        rows.serialize_element(&row)?;
    }
    rows.end()
}

/// Export the building (footprint and tile kinds) as JSON.
pub fn export_json(building: &Building, path: &str) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), building)?;
    Ok(())
}
