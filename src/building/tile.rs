//! Tile classification for building grids

use serde::{Deserialize, Serialize};

/// Classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Open floor
    #[default]
    Empty,
    /// Interior wall carved by a room
    Wall,
    /// Corner of an interior wall (reserved, never carved)
    CornerWall,
    /// The ring around the whole building footprint
    OuterWall,
}

impl TileKind {
    pub fn all() -> &'static [TileKind] {
        &[
            TileKind::Empty,
            TileKind::Wall,
            TileKind::CornerWall,
            TileKind::OuterWall,
        ]
    }

    /// Texture color for this kind.
    pub fn color(&self) -> [u8; 3] {
        match self {
            TileKind::Empty => [255, 255, 255],
            TileKind::Wall => [0, 0, 0],
            TileKind::CornerWall => [255, 0, 0],
            TileKind::OuterWall => [0, 0, 255],
        }
    }

    pub fn ascii_char(&self) -> char {
        match self {
            TileKind::Empty => '.',
            TileKind::Wall => '#',
            TileKind::CornerWall => '+',
            TileKind::OuterWall => '@',
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TileKind::Empty => "Empty",
            TileKind::Wall => "Wall",
            TileKind::CornerWall => "Corner Wall",
            TileKind::OuterWall => "Outer Wall",
        }
    }
}

/// A grid cell. Carving replaces the whole tile, never just its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub kind: TileKind,
}

impl Tile {
    pub fn new(x: usize, y: usize, kind: TileKind) -> Self {
        Self { x, y, kind }
    }
}
