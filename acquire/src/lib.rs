pub mod tile;
pub mod grid;
pub mod chain;
pub mod money;
pub mod stock;
pub mod player;
pub mod action;
pub mod computed;
pub mod error;
pub mod merger;
pub mod ai;
mod propagation;
mod placement;
mod purchase;

use std::fmt::{Debug, Display, Formatter};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

pub use action::{Action, BuyOption, MergeDecision, MergeSubAction};
pub use chain::Chain;
pub use computed::Computed;
pub use error::{ActionError, OptionsError};
pub use grid::{Grid, Slot};
pub use merger::MergerState;
pub use player::Player;
pub use stock::Stocks;
pub use tile::Tile;

/// A complete game. Applying an action never changes the game it is applied to, it produces a
/// new, independent successor, so snapshots can be explored freely.
#[derive(Clone, Debug)]
pub struct Acquire {
    phase: Phase,
    players: Vec<Player>,
    tiles: Vec<Tile>,
    stocks: Stocks,
    grid: Grid,
    current_player_id: PlayerId,
    turn: u16,
    step: u32,
    consecutive_skips: u8,
    last_placed_tile: Option<Tile>,
    will_end: bool,
    hand_size: u8,
    computed: Computed,
}

#[derive(Clone, Debug)]
pub struct Options {
    pub num_players: u8,
    pub hand_size: u8,
    pub num_stock: u8,
    pub starting_money: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            num_players: 4,
            hand_size: 6,
            num_stock: 25,
            starting_money: 6000,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(2..=6).contains(&self.num_players) {
            return Err(OptionsError::PlayerCount(self.num_players));
        }

        if !(1..=6).contains(&self.hand_size) {
            return Err(OptionsError::HandSize(self.hand_size));
        }

        if self.num_stock == 0 {
            return Err(OptionsError::NoStock);
        }

        Ok(())
    }
}

/// What the game is waiting for next.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    PlaceTile,
    PickChainToFound(FoundState),
    PickChainToMerge(MergerState),
    Merge(MergerState),
    DeclareGameEnd,
    PurchaseStock,
    GameOver,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FoundState {
    /// The tile that created the founding opportunity.
    pub tile: Tile,
}

impl Acquire {
    pub fn new<R: Rng>(rng: &mut R, options: &Options) -> Result<Self, OptionsError> {
        options.validate()?;

        let mut tiles: Vec<Tile> = Tile::all().collect();
        tiles.shuffle(rng);

        let players: Vec<Player> = (0..options.num_players).map(|id| {
            let mut player = Player::new(PlayerId(id), options.starting_money);
            player.tiles = tiles.split_off(tiles.len() - options.hand_size as usize);
            player
        }).collect();

        let mut game = Self {
            phase: Phase::PlaceTile,
            players,
            tiles,
            stocks: Stocks::new(options.num_stock),
            grid: Grid::new(),
            current_player_id: PlayerId(0),
            turn: 1,
            step: 0,
            consecutive_skips: 0,
            last_placed_tile: None,
            will_end: false,
            hand_size: options.hand_size,
            computed: Computed::default(),
        };

        game.recompute();

        Ok(game)
    }

    /// Every action the current actor may take. Deterministic for a given state.
    pub fn actions(&self) -> Vec<Action> {
        match &self.phase {
            Phase::PlaceTile => self.tile_placement_actions(),
            Phase::PickChainToFound(_) => self.chain_founding_actions(),
            Phase::PickChainToMerge(merger) => self.acquirer_selection_actions(merger),
            Phase::Merge(merger) => self.merge_actions(merger),
            Phase::DeclareGameEnd => self.game_end_actions(),
            Phase::PurchaseStock => self.stock_purchase_actions(),
            Phase::GameOver => vec![],
        }
    }

    /// Applies an action to a copy of this game and returns the copy.
    ///
    /// The random source is consumed only when a new turn begins with an unplayable hand and the
    /// hand has to be redrawn.
    pub fn apply_action<R: Rng>(&self, action: &Action, rng: &mut R) -> Result<Acquire, ActionError> {
        if self.is_terminal() {
            return Err(ActionError::GameOver);
        }

        let expected = self.current_actor();
        if action.player_id() != expected {
            return Err(ActionError::WrongActor {
                expected,
                actual: action.player_id(),
            });
        }

        let mut game = self.clone();

        debug!(step = game.step, turn = game.turn, %action, "applying action");

        let phase = std::mem::replace(&mut game.phase, Phase::PlaceTile);

        match (phase, action) {
            (Phase::PlaceTile, Action::PlaceTile(_, tile)) => game.place_tile(*tile)?,
            (Phase::PlaceTile, Action::SkipPlacement(_)) => game.skip_placement()?,
            (Phase::PickChainToFound(found), Action::FoundChain(_, chain)) => game.found_chain(found, *chain)?,
            (Phase::PickChainToMerge(merger), Action::PickAcquirer(_, chain)) => game.pick_acquirer(merger, *chain)?,
            (Phase::Merge(merger), Action::Merge { decision, .. }) => game.resolve_merge_decision(merger, *decision)?,
            (Phase::DeclareGameEnd, Action::DeclareGameEnd(_, declare)) => game.declare_game_end(*declare)?,
            (Phase::PurchaseStock, Action::PurchaseStock(_, buys)) => game.purchase_stock(buys, rng)?,
            _ => return Err(ActionError::WrongPhase(action.clone())),
        }

        game.step += 1;
        game.recompute();

        Ok(game)
    }

    /// The player who must act next. During a merger this is the player owed a decision on the
    /// absorbed chain, not necessarily the player whose turn it is.
    pub fn current_actor(&self) -> PlayerId {
        match &self.phase {
            Phase::Merge(merger) => merger
                .current_decision()
                .map(|(_, player_id)| player_id)
                .unwrap_or(self.current_player_id),
            _ => self.current_player_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The players with the most money. Meaningful once the game is over.
    pub fn winners(&self) -> Vec<PlayerId> {
        let Some(most_money) = self.players.iter().map(|player| player.money).max() else {
            return vec![];
        };

        self.players
            .iter()
            .filter(|player| player.money == most_money)
            .map(|player| player.id)
            .collect()
    }

    /// Players ordered by money, each with a rank. Equal money shares a rank and the following
    /// rank is skipped, so two players tied for first are followed by third.
    pub fn rankings(&self) -> Vec<(PlayerId, usize)> {
        let mut rankings: Vec<(PlayerId, usize)> = self.players
            .iter()
            .map(|player| {
                let richer = self.players.iter().filter(|other| other.money > player.money).count();
                (player.id, richer + 1)
            })
            .collect();

        rankings.sort_by_key(|(player_id, rank)| (*rank, *player_id));
        rankings
    }

    /// Whether the game may be declared over.
    pub fn can_end(&self) -> bool {
        self.grid.game_ending_chain_exists() ||
            self.grid.all_chains_are_safe() ||
            self.tiles.is_empty()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &Vec<Player> {
        &self.players
    }

    pub fn bank_stock(&self) -> &Stocks {
        &self.stocks
    }

    pub fn tiles_remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn computed(&self) -> &Computed {
        &self.computed
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.current_player_id
    }

    pub fn turn(&self) -> u16 {
        self.turn
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn will_end(&self) -> bool {
        self.will_end
    }

    pub fn last_placed_tile(&self) -> Option<Tile> {
        self.last_placed_tile
    }

    pub fn get_player_by_id(&self, player_id: PlayerId) -> &Player {
        &self.players[player_id.0 as usize]
    }

    fn get_player_by_id_mut(&mut self, player_id: PlayerId) -> &mut Player {
        &mut self.players[player_id.0 as usize]
    }

    fn next_player_id(&self) -> PlayerId {
        PlayerId((self.current_player_id.0 + 1) % self.players.len() as u8)
    }

    fn player_ids_in_order(&self, starting_player_id: PlayerId) -> Vec<PlayerId> {
        (0..self.players.len() as u8).map(|n| {
            PlayerId((starting_player_id.0 + n) % self.players.len() as u8)
        }).collect()
    }

    fn recompute(&mut self) {
        self.computed = Computed::new(
            &self.grid,
            &self.players,
            self.get_player_by_id(self.current_player_id),
        );
    }

    fn game_end_actions(&self) -> Vec<Action> {
        vec![
            Action::DeclareGameEnd(self.current_player_id, true),
            Action::DeclareGameEnd(self.current_player_id, false),
        ]
    }

    fn declare_game_end(&mut self, declare: bool) -> Result<(), ActionError> {
        if declare && !self.can_end() {
            return Err(ActionError::CannotDeclareEnd);
        }

        self.will_end = declare;
        self.phase = Phase::PurchaseStock;

        Ok(())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PlayerId(pub u8);

impl Debug for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("P_{}", self.0))
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}
