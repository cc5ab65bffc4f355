//! Values derived from the board and the players after every transition.

use itertools::Itertools;
use crate::chain::Chain;
use crate::grid::{chains_in_slots, has_undefined, Grid, Slot};
use crate::money;
use crate::player::Player;
use crate::tile::Tile;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Computed {
    /// Chains not on the board, which can still be founded.
    pub available_chains: Vec<Chain>,
    /// Chains on the board.
    pub active_chains: Vec<Chain>,
    /// Active chains from largest to smallest.
    pub chains_by_size: Vec<Chain>,
    /// The active chains tied for the largest size.
    pub largest_chains: Vec<Chain>,
    /// The tiles in the current player's hand that can be placed.
    pub legal_moves: Vec<Tile>,
    /// Indexed by player id.
    pub net_worth: Vec<u32>,
}

impl Computed {
    pub fn new(grid: &Grid, players: &[Player], current_player: &Player) -> Self {
        let available_chains = grid.available_chains();
        let active_chains = grid.existing_chains();

        // stable, so equal sizes stay in chain order
        let chains_by_size: Vec<Chain> = active_chains
            .iter()
            .copied()
            .sorted_by(|a, b| grid.chain_size(*b).cmp(&grid.chain_size(*a)))
            .collect();

        let largest_chains = match chains_by_size.first() {
            Some(largest) => {
                let size = grid.chain_size(*largest);
                chains_by_size
                    .iter()
                    .copied()
                    .take_while(|chain| grid.chain_size(*chain) == size)
                    .collect()
            }
            None => vec![],
        };

        let legal_moves = current_player.tiles
            .iter()
            .copied()
            .filter(|tile| is_legal_to_place(grid, *tile))
            .collect();

        let net_worth = players
            .iter()
            .map(|player| money::net_worth(player, grid))
            .collect();

        Self {
            available_chains,
            active_chains,
            chains_by_size,
            largest_chains,
            legal_moves,
            net_worth,
        }
    }
}

/// Whether a tile can be put down on the board as it stands.
///
/// A tile may not merge two or more safe chains, and may not touch a loose tile while every chain
/// is already on the board, whether it would found, grow or merge.
pub fn is_legal_to_place(grid: &Grid, tile: Tile) -> bool {
    if grid.get(tile) != Slot::Empty {
        return false;
    }

    let neighbours = grid.neighbours(tile);

    if has_undefined(&neighbours) && grid.num_available_chains() == 0 {
        return false;
    }

    let chains = chains_in_slots(&neighbours);
    chains.len() < 2 || chains.iter().filter(|chain| grid.is_safe(**chain)).count() < 2
}
