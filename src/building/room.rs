//! Rectangular rooms stamped into the building grid

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileKind};
use crate::tilemap::Tilemap;

/// A room covering a terminal leaf. It owns no tiles; carving writes
/// straight into the shared grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Kind of the cell at room-local `(i, j)`. Only the left (`i == 0`)
    /// and bottom (`j == 0`) edges are walls; neighbouring rooms supply the
    /// opposite edges.
    pub fn local_kind(i: usize, j: usize) -> TileKind {
        if i == 0 || j == 0 {
            TileKind::Wall
        } else {
            TileKind::Empty
        }
    }

    /// Stamp the room into `tiles`, overwriting whatever was there.
    pub fn carve(&self, tiles: &mut Tilemap<Tile>) {
        for i in 0..self.width {
            for j in 0..self.height {
                let (x, y) = (self.x + i, self.y + j);
                tiles.set(x, y, Tile::new(x, y, Self::local_kind(i, j)));
            }
        }
    }
}
