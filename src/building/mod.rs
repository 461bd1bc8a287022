//! Procedural building interiors
//!
//! A building footprint is partitioned with BSP ([`tree`]), a room is
//! stamped into every terminal leaf ([`room`]), and the whole footprint is
//! wrapped in an outer wall ring. The result is a dense [`Tilemap`] of
//! [`Tile`]s ready for rendering.
//!
//! Generation is single-threaded and runs to completion; regenerating means
//! building a new [`Building`] and dropping the old one.

pub mod params;
pub mod random;
pub mod room;
pub mod tile;
pub mod tree;

use std::fmt;

use image::RgbImage;
use serde::Serialize;

use crate::export;
use crate::tilemap::Tilemap;

pub use params::{AxisRatioMode, SplitParams, MIN_LEAF_SIZE};
pub use random::{OffsetPick, RandomSource, ScriptedSource};
pub use room::Room;
pub use tile::{Tile, TileKind};
pub use tree::{Leaf, LeafId, PartitionTree, Split, SplitAxis};

/// Reasons a building cannot be generated.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildingError {
    /// Width or height is zero or negative
    InvalidDimensions { width: i64, height: i64 },
    /// Split parameters the partitioner cannot run with
    InvalidParams(String),
}

impl fmt::Display for BuildingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingError::InvalidDimensions { width, height } => write!(
                f,
                "invalid building dimensions {}x{}: both must be positive",
                width, height
            ),
            BuildingError::InvalidParams(msg) => write!(f, "invalid split parameters: {}", msg),
        }
    }
}

impl std::error::Error for BuildingError {}

/// A generated building: its footprint, its classified tiles and the
/// partition that produced them.
#[derive(Clone, Debug, Serialize)]
pub struct Building {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    #[serde(serialize_with = "export::serialize_tile_kinds")]
    pub tiles: Tilemap<Tile>,
    #[serde(skip)]
    tree: PartitionTree,
}

impl Building {
    /// Generate a building with origin `(x, y)` and the given size.
    ///
    /// Sizes below twice the minimum leaf size are accepted and give a
    /// single room, most of which the outer ring then covers.
    pub fn generate<R: RandomSource + ?Sized>(
        x: i32,
        y: i32,
        width: i64,
        height: i64,
        params: &SplitParams,
        rng: &mut R,
    ) -> Result<Self, BuildingError> {
        if width <= 0 || height <= 0 {
            return Err(BuildingError::InvalidDimensions { width, height });
        }
        params.validate()?;

        let (w, h) = (width as usize, height as usize);
        let mut tiles = Tilemap::from_fn(w, h, |tx, ty| Tile::new(tx, ty, TileKind::Empty));
        let tree = PartitionTree::build(w, h, params.clone(), &mut tiles, rng);

        let mut building = Self {
            x,
            y,
            width: w,
            height: h,
            tiles,
            tree,
        };
        building.draw_outer_wall();

        log::info!(
            "Generated {}x{} building: {} leaves, {} rooms",
            w,
            h,
            building.tree.len(),
            building.tree.rooms().count()
        );
        Ok(building)
    }

    /// Reclassify the one-cell ring around the footprint as outer wall.
    fn draw_outer_wall(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tiles.is_border(x, y) {
                    self.tiles.set(x, y, Tile::new(x, y, TileKind::OuterWall));
                }
            }
        }
    }

    /// The partition this building was carved from.
    pub fn tree(&self) -> &PartitionTree {
        &self.tree
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.tree.rooms()
    }

    pub fn kind_at(&self, x: usize, y: usize) -> TileKind {
        self.tiles.get(x, y).kind
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|(_, _, t)| t.kind == kind).count()
    }

    /// Render the tiles to a texture, one pixel per tile.
    pub fn render_texture(&self) -> RgbImage {
        export::render_texture(&self.tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded(width: i64, height: i64, seed: u64) -> Building {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Building::generate(0, 0, width, height, &SplitParams::default(), &mut rng).unwrap()
    }

    fn room_at(building: &Building, x: usize, y: usize) -> Room {
        *building
            .rooms()
            .find(|r| r.contains(x, y))
            .expect("every cell lies in exactly one room")
    }

    #[test]
    fn test_grid_is_dense_with_coordinates() {
        for seed in 0..10 {
            let building = seeded(45, 33, seed);
            assert_eq!(building.tiles.width, 45);
            assert_eq!(building.tiles.height, 33);
            assert_eq!(building.tiles.len(), 45 * 33);
            for (x, y, tile) in building.tiles.iter() {
                assert_eq!((tile.x, tile.y), (x, y));
            }
            let total: usize = TileKind::all().iter().map(|k| building.count_kind(*k)).sum();
            assert_eq!(total, 45 * 33);
        }
    }

    #[test]
    fn test_outer_ring_always_outer_wall() {
        for (w, h) in [(2, 2), (3, 9), (16, 16), (40, 25), (100, 60)] {
            for seed in 0..5 {
                let building = seeded(w, h, seed);
                for (x, y, tile) in building.tiles.iter() {
                    let border = x == 0 || y == 0 || x + 1 == w as usize || y + 1 == h as usize;
                    assert_eq!(
                        tile.kind == TileKind::OuterWall,
                        border,
                        "{}x{} ({}, {})",
                        w,
                        h,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_interior_matches_room_pattern() {
        for seed in 0..20 {
            let building = seeded(64, 48, seed);
            for (x, y, tile) in building.tiles.iter() {
                if building.tiles.is_border(x, y) {
                    continue;
                }
                let room = room_at(&building, x, y);
                assert_eq!(tile.kind, Room::local_kind(x - room.x, y - room.y));
            }
            assert_eq!(building.count_kind(TileKind::CornerWall), 0);
        }
    }

    #[test]
    fn test_scripted_twenty_by_twenty() {
        // Every roll 0.3 (never skip, horizontal), offsets at the low end.
        let mut source = ScriptedSource::new(0.3, OffsetPick::Low);
        let building =
            Building::generate(0, 0, 20, 20, &SplitParams::default(), &mut source).unwrap();
        let tree = building.tree();

        let root = tree.leaf(tree.root());
        let split = root.split.unwrap();
        assert_eq!(split.axis, SplitAxis::Horizontal);
        let (low, high) = (tree.leaf(split.first), tree.leaf(split.second));
        assert_eq!((low.height, high.height), (8, 12));

        // 20x12 is too short to cut again and stays terminal.
        assert!(high.is_terminal());
        assert_eq!(high.room, Some(Room::new(0, 8, 20, 12)));

        // 20x8 is forced onto the vertical axis and splits once more.
        let low_split = low.split.unwrap();
        assert_eq!(low_split.axis, SplitAxis::Vertical);
        assert_eq!(tree.leaf(low_split.first).room, Some(Room::new(0, 0, 8, 8)));
        assert_eq!(tree.leaf(low_split.second).room, Some(Room::new(8, 0, 12, 8)));
        assert_eq!(tree.len(), 5);
        assert_eq!(building.rooms().count(), 3);

        // Interior walls: the left edge of the (8,0) room and the bottom
        // edge of the (0,8) room.
        for y in 1..8 {
            assert_eq!(building.kind_at(8, y), TileKind::Wall);
        }
        for x in 1..19 {
            assert_eq!(building.kind_at(x, 8), TileKind::Wall);
        }
        assert_eq!(building.count_kind(TileKind::Wall), 25);
        assert_eq!(building.count_kind(TileKind::OuterWall), 76);
        assert_eq!(building.kind_at(5, 5), TileKind::Empty);
        assert_eq!(building.kind_at(12, 4), TileKind::Empty);
        assert_eq!(building.kind_at(10, 15), TileKind::Empty);
    }

    #[test]
    fn test_scripted_twenty_by_twenty_midpoint() {
        // Offsets from the middle of each range: 10/10 cuts all the way down.
        let mut source = ScriptedSource::new(0.3, OffsetPick::Mid);
        let building =
            Building::generate(0, 0, 20, 20, &SplitParams::default(), &mut source).unwrap();
        let tree = building.tree();

        let split = tree.leaf(tree.root()).split.unwrap();
        assert_eq!((split.axis, split.offset), (SplitAxis::Horizontal, 10));

        // Both 20x10 halves are forced vertical and cut into 10x10 squares,
        // which are too small to split again.
        for half in [split.first, split.second] {
            let half_split = tree.leaf(half).split.unwrap();
            assert_eq!((half_split.axis, half_split.offset), (SplitAxis::Vertical, 10));
            assert!(tree.leaf(half_split.first).is_terminal());
            assert!(tree.leaf(half_split.second).is_terminal());
        }
        assert_eq!(tree.len(), 7);

        let mut rooms: Vec<Room> = building.rooms().copied().collect();
        rooms.sort_by_key(|r| (r.y, r.x));
        assert_eq!(
            rooms,
            vec![
                Room::new(0, 0, 10, 10),
                Room::new(10, 0, 10, 10),
                Room::new(0, 10, 10, 10),
                Room::new(10, 10, 10, 10),
            ]
        );

        for i in 1..19 {
            assert_eq!(building.kind_at(10, i), TileKind::Wall);
            assert_eq!(building.kind_at(i, 10), TileKind::Wall);
        }
        assert_eq!(building.count_kind(TileKind::Wall), 35);
        assert_eq!(building.count_kind(TileKind::OuterWall), 76);
        for (x, y) in [(5, 5), (15, 5), (5, 15), (15, 15)] {
            assert_eq!(building.kind_at(x, y), TileKind::Empty);
        }
    }

    #[test]
    fn test_seven_by_seven_never_splits() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let building = Building::generate(0, 0, 7, 7, &SplitParams::default(), &mut rng).unwrap();
        let tree = building.tree();

        assert_eq!(tree.len(), 1);
        let root = tree.leaf(tree.root());
        assert!(root.is_terminal());
        assert!(root.has_room);
        assert_eq!(root.room, Some(Room::new(0, 0, 7, 7)));

        // The room's wall edges sit on the border, so the ring covers them.
        assert_eq!(building.count_kind(TileKind::OuterWall), 24);
        assert_eq!(building.count_kind(TileKind::Wall), 0);
        for y in 1..6 {
            for x in 1..6 {
                assert_eq!(building.kind_at(x, y), TileKind::Empty);
            }
        }
    }

    #[test]
    fn test_single_cell_building() {
        let building = seeded(1, 1, 0);
        assert_eq!(building.kind_at(0, 0), TileKind::OuterWall);
        assert_eq!(building.rooms().count(), 1);
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let params = SplitParams::default();
        for (w, h) in [(0, 10), (10, 0), (-5, 10), (10, -1)] {
            let err = Building::generate(0, 0, w, h, &params, &mut rng).unwrap_err();
            assert_eq!(err, BuildingError::InvalidDimensions { width: w, height: h });
        }
    }

    #[test]
    fn test_invalid_params() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let params = SplitParams {
            skip_chance: -0.5,
            ..Default::default()
        };
        let err = Building::generate(0, 0, 30, 30, &params, &mut rng).unwrap_err();
        assert!(matches!(err, BuildingError::InvalidParams(_)));
        assert!(err.to_string().contains("skip_chance"));
    }

    #[test]
    fn test_origin_is_kept() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let building =
            Building::generate(-4, 12, 30, 20, &SplitParams::default(), &mut rng).unwrap();
        assert_eq!((building.x, building.y), (-4, 12));
        assert_eq!(building.tiles.get(0, 0).kind, TileKind::OuterWall);
    }

    #[test]
    fn test_regeneration_differs_across_seeds() {
        let a = seeded(80, 80, 1);
        let b = seeded(80, 80, 2);
        let differs = a
            .tiles
            .iter()
            .zip(b.tiles.iter())
            .any(|((_, _, ta), (_, _, tb))| ta.kind != tb.kind);
        assert!(differs);
    }
}
