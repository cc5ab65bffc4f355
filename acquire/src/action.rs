use std::fmt::{Display, Formatter};
use itertools::Itertools;
use crate::chain::Chain;
use crate::PlayerId;
use crate::tile::Tile;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    PlaceTile(PlayerId, Tile),
    /// Offered only when none of the player's tiles can be placed.
    SkipPlacement(PlayerId),
    FoundChain(PlayerId, Chain),
    /// Breaks a tie between equally large chains in a merger.
    PickAcquirer(PlayerId, Chain),
    Merge {
        player_id: PlayerId,
        decision: MergeDecision,
    },
    DeclareGameEnd(PlayerId, bool),
    PurchaseStock(PlayerId, [BuyOption; 3]),
}

impl Action {
    pub fn player_id(&self) -> PlayerId {
        match self {
            Action::PlaceTile(player_id, _) |
            Action::SkipPlacement(player_id) |
            Action::FoundChain(player_id, _) |
            Action::PickAcquirer(player_id, _) |
            Action::Merge { player_id, .. } |
            Action::DeclareGameEnd(player_id, _) |
            Action::PurchaseStock(player_id, _) => *player_id,
        }
    }
}

/// What a player does with their shares in one absorbed chain. The sub-actions run in order and a
/// [`MergeSubAction::Hold`] ends the decision.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MergeDecision(pub [MergeSubAction; 2]);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MergeSubAction {
    Hold,
    /// Surrender this many absorbed shares for half as many acquirer shares.
    Trade(u8),
    Sell(u8),
}

impl MergeDecision {
    pub const HOLD: MergeDecision = MergeDecision([MergeSubAction::Hold, MergeSubAction::Hold]);

    /// The sub-actions that take effect, up to the first hold.
    pub fn effective(&self) -> impl Iterator<Item = MergeSubAction> + '_ {
        self.0.iter().copied().take_while(|sub| *sub != MergeSubAction::Hold)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum BuyOption {
    None,
    Chain(Chain),
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlaceTile(player_id, tile) => {
                write!(f, "Player {} places tile {}", player_id.0, tile)
            }

            Action::SkipPlacement(player_id) => {
                write!(f, "Player {} cannot place a tile", player_id.0)
            }

            Action::FoundChain(player_id, chain) => {
                write!(f, "Player {} founds {}", player_id.0, chain)
            }

            Action::PickAcquirer(player_id, chain) => {
                write!(f, "Player {} chooses {} as the merge winner", player_id.0, chain)
            }

            Action::Merge { player_id, decision } => {
                if decision.effective().next().is_none() {
                    return write!(f, "Player {} holds their stock", player_id.0);
                }

                let parts = decision.effective().map(|sub| match sub {
                    MergeSubAction::Hold => String::new(),
                    MergeSubAction::Trade(n) => format!("trades in {} for {}", n, n / 2),
                    MergeSubAction::Sell(n) => format!("sells {}", n),
                }).join(" and ");

                write!(f, "Player {} {}", player_id.0, parts)
            }

            Action::DeclareGameEnd(player_id, declare) => {
                if *declare {
                    write!(f, "Player {} chooses to end the game", player_id.0)
                } else {
                    write!(f, "Player {} chooses to prolong the game", player_id.0)
                }
            }

            Action::PurchaseStock(player_id, buys) => {
                if buys.iter().all(|buy| matches!(buy, BuyOption::None)) {
                    return write!(f, "Player {} does not buy any stock", player_id.0);
                }

                let bought = buys
                    .iter()
                    .filter_map(|buy| match buy {
                        BuyOption::None => None,
                        BuyOption::Chain(chain) => Some(*chain),
                    })
                    .counts()
                    .into_iter()
                    .sorted()
                    .map(|(chain, count)| format!("{} {}", count, chain))
                    .join(", ");

                write!(f, "Player {} buys {}", player_id.0, bought)
            }
        }
    }
}
