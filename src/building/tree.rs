//! Binary space partition of a building footprint
//!
//! Leaves live in a flat arena owned by [`PartitionTree`]; parent and child
//! links are [`LeafId`] indices into it, so the tree has a single owner and
//! no reference cycles. Splitting is driven by a FIFO worklist: every leaf
//! gets exactly one split attempt, and the children of a successful split
//! are queued behind the leaves already waiting. Once the worklist drains,
//! rooms are carved into every terminal leaf.

use std::collections::VecDeque;

use super::params::SplitParams;
use super::random::RandomSource;
use super::room::Room;
use super::tile::Tile;
use crate::tilemap::Tilemap;

/// Index of a leaf inside its [`PartitionTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub usize);

/// Orientation of the cut. A horizontal split stacks the children
/// (heights add up); a vertical split places them side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

/// A completed split. Both children are created together or not at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    pub axis: SplitAxis,
    /// Extent of the first child along `axis`
    pub offset: usize,
    pub first: LeafId,
    pub second: LeafId,
}

/// A node of the partition.
#[derive(Clone, Debug)]
pub struct Leaf {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub parent: Option<LeafId>,
    pub split: Option<Split>,
    pub room: Option<Room>,
    pub has_room: bool,
    pub is_first_child: bool,
}

impl Leaf {
    fn new(x: usize, y: usize, width: usize, height: usize, parent: Option<LeafId>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            parent,
            split: None,
            room: None,
            has_room: false,
            is_first_child: false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.split.is_none()
    }

    pub fn first_child(&self) -> Option<LeafId> {
        self.split.map(|s| s.first)
    }

    pub fn second_child(&self) -> Option<LeafId> {
        self.split.map(|s| s.second)
    }

    fn extent(&self, axis: SplitAxis) -> usize {
        match axis {
            SplitAxis::Horizontal => self.height,
            SplitAxis::Vertical => self.width,
        }
    }
}

/// The partition of one building footprint.
#[derive(Clone, Debug)]
pub struct PartitionTree {
    leaves: Vec<Leaf>,
    params: SplitParams,
}

impl PartitionTree {
    /// A tree holding only the root leaf over `[0, width) × [0, height)`.
    pub fn new(width: usize, height: usize, params: SplitParams) -> Self {
        Self {
            leaves: vec![Leaf::new(0, 0, width, height, None)],
            params,
        }
    }

    /// Partition the footprint to its fixed point and carve a room into
    /// every terminal leaf of `tiles`.
    pub fn build<R: RandomSource + ?Sized>(
        width: usize,
        height: usize,
        params: SplitParams,
        tiles: &mut Tilemap<Tile>,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self::new(width, height, params);
        let splits = tree.split_all(rng);
        tree.create_rooms(tree.root(), tiles);
        log::debug!(
            "Partitioned {}x{} into {} leaves ({} splits)",
            width,
            height,
            tree.leaves.len(),
            splits
        );
        tree
    }

    pub fn root(&self) -> LeafId {
        LeafId(0)
    }

    pub fn leaf(&self, id: LeafId) -> &Leaf {
        &self.leaves[id.0]
    }

    /// All leaves in creation order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = LeafId> {
        (0..self.leaves.len()).map(LeafId)
    }

    pub fn children(&self, id: LeafId) -> Option<(LeafId, LeafId)> {
        self.leaf(id).split.map(|s| (s.first, s.second))
    }

    /// Distance from the root (the root is depth 0).
    pub fn depth(&self, id: LeafId) -> usize {
        let mut depth = 0;
        let mut current = self.leaf(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.leaf(parent).parent;
        }
        depth
    }

    pub fn terminal_leaves(&self) -> impl Iterator<Item = LeafId> + '_ {
        self.ids().filter(|id| self.leaf(*id).is_terminal())
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.leaves.iter().filter_map(|leaf| leaf.room.as_ref())
    }

    /// Attempt to bisect a leaf. Returns `true` if two children were created.
    ///
    /// Draw order per attempt: skip roll, axis roll, then the offset.
    pub fn split<R: RandomSource + ?Sized>(&mut self, id: LeafId, rng: &mut R) -> bool {
        let leaf = self.leaf(id);
        if !leaf.is_terminal() || leaf.width == 0 || leaf.height == 0 {
            return false;
        }
        let (x, y, width, height) = (leaf.x, leaf.y, leaf.width, leaf.height);

        let skip_roll = rng.roll();
        if skip_roll < self.params.skip_chance && self.depth(id) >= self.params.skip_exempt_depth {
            log::debug!("Leaf {} at ({}, {}) skipped its split", id.0, x, y);
            return false;
        }

        let mut axis = if rng.roll() < 0.5 {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        };
        let mode = self.params.ratio_mode;
        if mode.ratio(width, height) > self.params.max_aspect_ratio {
            axis = SplitAxis::Vertical;
        }
        if mode.ratio(height, width) > self.params.max_aspect_ratio {
            axis = SplitAxis::Horizontal;
        }

        let min = self.params.min_leaf_size;
        let extent = self.leaf(id).extent(axis);
        let Some(max) = extent.checked_sub(min).filter(|max| *max >= min) else {
            return false;
        };
        let offset = rng.range(min, max);

        let (first, second) = match axis {
            SplitAxis::Horizontal => (
                Leaf::new(x, y, width, offset, Some(id)),
                Leaf::new(x, y + offset, width, height - offset, Some(id)),
            ),
            SplitAxis::Vertical => (
                Leaf::new(x, y, offset, height, Some(id)),
                Leaf::new(x + offset, y, width - offset, height, Some(id)),
            ),
        };

        let first_id = self.push(first, true);
        let second_id = self.push(second, false);
        self.leaves[id.0].split = Some(Split {
            axis,
            offset,
            first: first_id,
            second: second_id,
        });

        log::debug!(
            "Split leaf {} ({}x{}) {:?} at {}",
            id.0,
            width,
            height,
            axis,
            offset
        );
        true
    }

    fn push(&mut self, mut leaf: Leaf, is_first_child: bool) -> LeafId {
        leaf.is_first_child = is_first_child;
        self.leaves.push(leaf);
        LeafId(self.leaves.len() - 1)
    }

    /// Split every terminal leaf, and the children those splits produce,
    /// until nothing is left to try. Returns the number of successful splits.
    pub fn split_all<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut pending: VecDeque<LeafId> = self.terminal_leaves().collect();
        let mut splits = 0;

        while let Some(id) = pending.pop_front() {
            if self.split(id, rng) {
                if let Some((first, second)) = self.children(id) {
                    pending.push_back(first);
                    pending.push_back(second);
                }
                splits += 1;
            }
        }

        splits
    }

    /// Give every terminal leaf under `id` a room covering its whole
    /// rectangle, carving it into `tiles`. Internal leaves drop any room.
    pub fn create_rooms(&mut self, id: LeafId, tiles: &mut Tilemap<Tile>) {
        match self.children(id) {
            Some((first, second)) => {
                let leaf = &mut self.leaves[id.0];
                leaf.has_room = false;
                leaf.room = None;

                for child in [first, second] {
                    if !self.leaf(child).has_room {
                        self.create_rooms(child, tiles);
                    }
                }
            }
            None => {
                let leaf = &mut self.leaves[id.0];
                let room = Room::new(leaf.x, leaf.y, leaf.width, leaf.height);
                room.carve(tiles);
                leaf.room = Some(room);
                leaf.has_room = true;
                log::debug!(
                    "Room {}x{} at ({}, {})",
                    room.width,
                    room.height,
                    room.x,
                    room.y
                );
            }
        }
    }
}
