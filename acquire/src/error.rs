use thiserror::Error;
use crate::action::Action;
use crate::chain::Chain;
use crate::PlayerId;
use crate::stock::StockError;
use crate::tile::Tile;

/// An action that cannot be applied to the state it was offered to.
///
/// Every variant is a broken contract between action generation and application. The state the
/// action was applied to is never modified.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,
    #[error("action '{0}' does not belong to the current phase")]
    WrongPhase(Action),
    #[error("expected {expected:?} to act, not {actual:?}")]
    WrongActor {
        expected: PlayerId,
        actual: PlayerId,
    },
    #[error("tile {0} is not in the player's hand")]
    TileNotInHand(Tile),
    #[error("tile {0} cannot legally be placed")]
    IllegalPlacement(Tile),
    #[error("cannot skip a placement while legal placements exist")]
    LegalMovesAvailable,
    #[error("chain {0} is already on the board")]
    ChainUnavailable(Chain),
    #[error("chain {0} is not one of the largest chains in the merger")]
    NotTiedForLargest(Chain),
    #[error("chain {0} is not on the board")]
    ChainNotActive(Chain),
    #[error("the game cannot be ended yet")]
    CannotDeclareEnd,
    #[error("stock must be traded in pairs, got {0}")]
    OddTradeIn(u8),
    #[error("needed ${needed} but only ${available} is available")]
    InsufficientFunds {
        needed: u32,
        available: u32,
    },
    #[error(transparent)]
    Stock(#[from] StockError),
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum OptionsError {
    #[error("{0} players is not supported, there must be between 2 and 6")]
    PlayerCount(u8),
    #[error("a hand size of {0} is not supported, it must be between 1 and 6")]
    HandSize(u8),
    #[error("there must be at least one stock certificate per chain")]
    NoStock,
}
