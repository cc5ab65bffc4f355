//! Flood fills over connected tiles.
//!
//! Both traversals only ever walk placed tiles reachable from the root, so their cost is
//! proportional to the size of the region rather than the board.

use std::collections::VecDeque;
use ahash::HashSet;
use crate::chain::Chain;
use crate::grid::{Grid, Slot};
use crate::tile::Tile;

impl Grid {
    /// Relabels the connected region around `root` to the chain `root` is already labelled with.
    ///
    /// Undefined tiles and tiles of other chains are absorbed; the walk stops at empty cells and
    /// at tiles that already carry the root's chain. Chain sizes move with every relabelled tile.
    pub fn fill_chain(&mut self, root: Tile) {
        let Slot::Chain(chain) = self.get(root) else {
            debug_assert!(false, "cannot propagate from {root}, it is not part of a chain");
            return;
        };

        let mut stack: VecDeque<Tile> = VecDeque::from([root]);
        let mut visited: HashSet<Tile> = Default::default();

        while let Some(tile) = stack.pop_front() {
            if !visited.insert(tile) {
                continue;
            }

            match self.get(tile) {
                Slot::Empty => continue,
                Slot::Chain(existing) if existing == chain && tile != root => continue,
                Slot::Chain(existing) if existing == chain => {}
                Slot::Undefined | Slot::Chain(_) => self.place(tile, Slot::Chain(chain)),
            }

            stack.extend(self.neighbouring_tiles(tile).filter(|pt| !visited.contains(pt)));
        }
    }

    /// Counts the tiles connected to the first tile of `chain` found on the board.
    /// Returns zero when the chain is not on the board.
    pub fn count_chain(&self, chain: Chain) -> u16 {
        let Some((root, _)) = self.iter().find(|(_, slot)| *slot == Slot::Chain(chain)) else {
            return 0;
        };

        self.count_connected(root)
    }

    /// Counts the tiles of the root's chain connected to `root`, including `root`.
    pub fn count_connected(&self, root: Tile) -> u16 {
        let root_slot = self.get(root);
        if !matches!(root_slot, Slot::Chain(_)) {
            return 0;
        }

        let mut stack: VecDeque<Tile> = VecDeque::from([root]);
        let mut visited: HashSet<Tile> = Default::default();
        let mut count = 0;

        while let Some(tile) = stack.pop_front() {
            if !visited.insert(tile) || self.get(tile) != root_slot {
                continue;
            }

            count += 1;
            stack.extend(self.neighbouring_tiles(tile).filter(|pt| !visited.contains(pt)));
        }

        count
    }
}
