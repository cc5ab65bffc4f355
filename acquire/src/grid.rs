use itertools::Itertools;
use crate::chain::{Chain, ChainTable};
use crate::tile::Tile;

pub const GRID_WIDTH: u8 = 12;
pub const GRID_HEIGHT: u8 = 9;
pub const NUM_TILES: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

/// A chain becomes safe from takeover once it grows past this size.
pub const SAFE_CHAIN_SIZE: u16 = 11;
pub const GAME_ENDING_CHAIN_SIZE: u16 = 41;

/// The board. Cells are stored in a fixed array so that cloning is a flat copy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    slots: [Slot; NUM_TILES],
    pub(crate) chain_sizes: ChainTable<u16>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Slot {
    /// No tile has been placed here.
    Empty,
    /// A tile is down but belongs to no chain yet.
    Undefined,
    Chain(Chain),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    pub fn is_in_bounds(&self) -> bool {
        self.x >= 0 &&
            self.y >= 0 &&
            self.x < GRID_WIDTH as i8 &&
            self.y < GRID_HEIGHT as i8
    }

    /// Returns a \[South,East,North,West\] array of points which are orthogonal neighbours to
    /// this point. Points may be out of bounds.
    pub fn orthogonal_neighbours(&self) -> [Point; 4] {
        [
            Point { x: self.x, y: self.y + 1 },
            Point { x: self.x + 1, y: self.y },
            Point { x: self.x, y: self.y - 1 },
            Point { x: self.x - 1, y: self.y },
        ]
    }
}

impl From<Tile> for Point {
    fn from(value: Tile) -> Self {
        value.pos()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            slots: [Slot::Empty; NUM_TILES],
            chain_sizes: Default::default(),
        }
    }

    pub fn get(&self, tile: Tile) -> Slot {
        self.slots[tile.index()]
    }

    /// Out of bounds points read as [`Slot::Empty`].
    pub fn get_pt(&self, pt: Point) -> Slot {
        match Tile::from_point(pt) {
            Some(tile) => self.get(tile),
            None => Slot::Empty,
        }
    }

    /// Writes a tile onto the board, keeping the chain size table in step.
    /// A placed tile never reverts to [`Slot::Empty`].
    pub fn place(&mut self, tile: Tile, slot: Slot) {
        debug_assert_ne!(slot, Slot::Empty, "cannot remove tile {tile} from the board");

        // if there was a chain in this slot,
        // update the count to reflect that it has been overwritten
        if let Slot::Chain(chain) = self.get(tile) {
            self.chain_sizes[&chain] -= 1;
        }

        self.slots[tile.index()] = slot;

        if let Slot::Chain(chain) = slot {
            self.chain_sizes[&chain] += 1;
        }
    }

    /// The in-bounds orthogonal neighbours of a tile.
    pub fn neighbouring_tiles(&self, tile: Tile) -> impl Iterator<Item = Tile> {
        tile.pos()
            .orthogonal_neighbours()
            .into_iter()
            .filter_map(Tile::from_point)
    }

    /// Returns a \[South,East,North,West\] array of grid slots which are orthogonal neighbours to
    /// the tile, out of bounds neighbours being empty.
    pub fn neighbours(&self, tile: Tile) -> [Slot; 4] {
        tile.pos().orthogonal_neighbours().map(|pt| self.get_pt(pt))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tile, Slot)> + '_ {
        Tile::all().map(|tile| (tile, self.get(tile)))
    }

    pub fn chain_size(&self, chain: Chain) -> u16 {
        self.chain_sizes.get(&chain)
    }

    pub fn chain_sizes(&self) -> &ChainTable<u16> {
        &self.chain_sizes
    }

    pub fn existing_chains(&self) -> Vec<Chain> {
        self.chain_sizes
            .iter()
            .filter(|(_, size)| *size > 0)
            .map(|(chain, _)| chain)
            .collect()
    }

    pub fn available_chains(&self) -> Vec<Chain> {
        self.chain_sizes
            .iter()
            .filter(|(_, size)| *size == 0)
            .map(|(chain, _)| chain)
            .collect()
    }

    pub fn num_available_chains(&self) -> usize {
        self.chain_sizes.0.iter().filter(|size| **size == 0).count()
    }

    pub fn is_safe(&self, chain: Chain) -> bool {
        self.chain_size(chain) >= SAFE_CHAIN_SIZE
    }

    /// True when at least one chain is on the board and every chain on it is safe.
    pub fn all_chains_are_safe(&self) -> bool {
        let existing = self.existing_chains();
        !existing.is_empty() && existing.iter().all(|chain| self.is_safe(*chain))
    }

    pub fn game_ending_chain_exists(&self) -> bool {
        self.chain_sizes.0.iter().any(|size| *size >= GAME_ENDING_CHAIN_SIZE)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the distinct hotel chains in the slice of slots
pub fn chains_in_slots(slots: &[Slot]) -> Vec<Chain> {
    slots.iter().filter_map(|slot| {
        match slot {
            Slot::Empty |
            Slot::Undefined => None,
            Slot::Chain(chain) => Some(*chain),
        }
    }).unique().collect()
}

pub fn has_undefined(slots: &[Slot]) -> bool {
    slots.iter().any(|slot| *slot == Slot::Undefined)
}
