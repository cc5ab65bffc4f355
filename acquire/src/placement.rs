use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};
use crate::{Acquire, Action, ActionError, FoundState, Phase, PlayerId};
use crate::chain::Chain;
use crate::computed::is_legal_to_place;
use crate::grid::{chains_in_slots, has_undefined, Slot};
use crate::tile::Tile;

impl Acquire {
    pub(crate) fn tile_placement_actions(&self) -> Vec<Action> {
        if self.computed.legal_moves.is_empty() {
            return vec![Action::SkipPlacement(self.current_player_id)];
        }

        self.computed.legal_moves
            .iter()
            .map(|tile| Action::PlaceTile(self.current_player_id, *tile))
            .collect()
    }

    pub(crate) fn chain_founding_actions(&self) -> Vec<Action> {
        self.computed.available_chains
            .iter()
            .map(|chain| Action::FoundChain(self.current_player_id, *chain))
            .collect()
    }

    pub(crate) fn place_tile(&mut self, tile: Tile) -> Result<(), ActionError> {
        let player_id = self.current_player_id;

        if !self.get_player_by_id(player_id).has_tile(tile) {
            return Err(ActionError::TileNotInHand(tile));
        }

        if !is_legal_to_place(&self.grid, tile) {
            return Err(ActionError::IllegalPlacement(tile));
        }

        self.get_player_by_id_mut(player_id).remove_tile(tile)?;
        self.consecutive_skips = 0;
        self.last_placed_tile = Some(tile);

        let neighbours = self.grid.neighbours(tile);
        let chains = chains_in_slots(&neighbours);

        self.grid.place(tile, Slot::Undefined);

        match chains.len() {
            // the tile joins loose tiles together, a chain has to be picked
            0 if has_undefined(&neighbours) => {
                self.phase = Phase::PickChainToFound(FoundState { tile });
            }
            0 => self.finish_placement(),
            1 => {
                self.grid.place(tile, Slot::Chain(chains[0]));
                self.grid.fill_chain(tile);
                self.finish_placement();
            }
            _ => self.begin_merger(tile, chains),
        }

        Ok(())
    }

    pub(crate) fn skip_placement(&mut self) -> Result<(), ActionError> {
        if !self.computed.legal_moves.is_empty() {
            return Err(ActionError::LegalMovesAvailable);
        }

        self.consecutive_skips += 1;

        // nobody has been able to place a tile for a full round
        if self.consecutive_skips as usize >= self.players.len() {
            debug!(skips = self.consecutive_skips, "no player can place a tile");
            self.end_game();
            return Ok(());
        }

        self.finish_placement();
        Ok(())
    }

    pub(crate) fn found_chain(&mut self, found: FoundState, chain: Chain) -> Result<(), ActionError> {
        if self.grid.chain_size(chain) > 0 {
            return Err(ActionError::ChainUnavailable(chain));
        }

        self.grid.place(found.tile, Slot::Chain(chain));
        self.grid.fill_chain(found.tile);

        // the founder gets a share for free, if there are any left
        let player_id = self.current_player_id;
        if self.stocks.withdraw(chain, 1).is_ok() {
            self.get_player_by_id_mut(player_id).stocks.deposit(chain, 1);
        }

        debug!(%chain, size = self.grid.chain_size(chain), "chain founded");

        self.finish_placement();
        Ok(())
    }

    /// Moves on from a resolved placement to the end game declaration, if it is on offer, or to
    /// buying stock.
    pub(crate) fn finish_placement(&mut self) {
        self.phase = if !self.will_end && self.can_end() {
            Phase::DeclareGameEnd
        } else {
            Phase::PurchaseStock
        };
    }

    pub(crate) fn advance_turn<R: Rng>(&mut self, rng: &mut R) {
        self.current_player_id = self.next_player_id();
        self.turn += 1;
        self.phase = Phase::PlaceTile;

        if !self.has_legal_placement(self.current_player_id) {
            self.refresh_hand(self.current_player_id, rng);
        }
    }

    fn has_legal_placement(&self, player_id: PlayerId) -> bool {
        self.get_player_by_id(player_id)
            .tiles
            .iter()
            .any(|tile| is_legal_to_place(&self.grid, *tile))
    }

    /// Returns the player's hand to the bank, shuffles it, and deals a fresh hand.
    fn refresh_hand<R: Rng>(&mut self, player_id: PlayerId, rng: &mut R) {
        let returned = std::mem::take(&mut self.get_player_by_id_mut(player_id).tiles);
        trace!(player = %player_id, tiles = ?returned, "refreshing hand");

        self.tiles.extend(returned);
        self.tiles.shuffle(rng);

        for _ in 0..self.hand_size {
            if !self.draw_tile(player_id) {
                break;
            }
        }
    }

    /// Draws a tile from the bank into the player's hand if there is room for it and the bank is
    /// not empty. Returns whether a tile was drawn.
    pub(crate) fn draw_tile(&mut self, player_id: PlayerId) -> bool {
        if self.get_player_by_id(player_id).tiles.len() >= self.hand_size as usize {
            return false;
        }

        let Some(tile) = self.tiles.pop() else {
            return false;
        };

        self.get_player_by_id_mut(player_id).tiles.push(tile);
        true
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use crate::{tile, Acquire, Action, ActionError, FoundState, Options, Phase, PlayerId};
    use crate::chain::{Chain, CHAIN_ARRAY};
    use crate::grid::Slot;
    use crate::tile::Tile;

    fn game_test_instance() -> Acquire {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        Acquire::new(&mut rng, &Options::default()).unwrap()
    }

    #[test]
    fn test_place_lone_tile() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();
        game.players[0].tiles[0] = tile!("6E");
        game.recompute();

        let game = game.apply_action(&Action::PlaceTile(PlayerId(0), tile!("6E")), &mut rng).unwrap();

        assert_eq!(game.grid.get(tile!("6E")), Slot::Undefined);
        assert_eq!(game.phase, Phase::PurchaseStock);
        assert_eq!(game.players[0].tiles.len(), 5);
        assert_eq!(game.actions(), vec![Action::PurchaseStock(PlayerId(0), [crate::BuyOption::None; 3])]);
    }

    #[test]
    fn test_found_chain() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();
        game.grid.place(tile!("1A"), Slot::Undefined);
        game.grid.place(tile!("3A"), Slot::Undefined);
        game.players[0].tiles[0] = tile!("2A");
        game.recompute();

        let game = game.apply_action(&Action::PlaceTile(PlayerId(0), tile!("2A")), &mut rng).unwrap();
        assert_eq!(game.phase, Phase::PickChainToFound(FoundState { tile: tile!("2A") }));
        assert_eq!(game.actions().len(), 7);

        let game = game.apply_action(&Action::FoundChain(PlayerId(0), Chain::Continental), &mut rng).unwrap();

        assert_eq!(game.grid.chain_size(Chain::Continental), 3);
        assert_eq!(game.players[0].stocks.amount(Chain::Continental), 1);
        assert_eq!(game.stocks.amount(Chain::Continental), 24);
        assert_eq!(game.phase, Phase::PurchaseStock);
    }

    #[test]
    fn test_found_on_isolated_tile() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();
        game.grid.place(tile!("7G"), Slot::Undefined);
        game.phase = Phase::PickChainToFound(FoundState { tile: tile!("7G") });
        game.recompute();

        let founded = game.apply_action(&Action::FoundChain(PlayerId(0), Chain::Tower), &mut rng).unwrap();
        assert_eq!(founded.grid.chain_size(Chain::Tower), 1);
        assert_eq!(founded.players[0].stocks.amount(Chain::Tower), 1);

        // an empty bank grants nothing
        game.stocks.withdraw(Chain::Tower, 25).unwrap();
        let founded = game.apply_action(&Action::FoundChain(PlayerId(0), Chain::Tower), &mut rng).unwrap();
        assert_eq!(founded.grid.chain_size(Chain::Tower), 1);
        assert_eq!(founded.players[0].stocks.amount(Chain::Tower), 0);
    }

    #[test]
    fn test_cannot_found_active_chain() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();
        game.grid.place(tile!("1I"), Slot::Chain(Chain::Luxor));
        game.grid.place(tile!("7G"), Slot::Undefined);
        game.phase = Phase::PickChainToFound(FoundState { tile: tile!("7G") });
        game.recompute();

        assert_eq!(
            game.apply_action(&Action::FoundChain(PlayerId(0), Chain::Luxor), &mut rng).err(),
            Some(ActionError::ChainUnavailable(Chain::Luxor))
        );
    }

    #[test]
    fn test_growth() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();

        game.grid.place(tile!("4A"), Slot::Undefined);
        game.grid.place(tile!("3B"), Slot::Undefined);
        game.grid.place(tile!("1A"), Slot::Chain(Chain::Festival));
        game.grid.place(tile!("2A"), Slot::Chain(Chain::Festival));
        game.players[0].tiles[0] = tile!("3A");
        game.recompute();

        let game = game.apply_action(&Action::PlaceTile(PlayerId(0), tile!("3A")), &mut rng).unwrap();

        assert_eq!(game.grid.get(tile!("3A")), Slot::Chain(Chain::Festival));
        assert_eq!(game.grid.get(tile!("4A")), Slot::Chain(Chain::Festival));
        assert_eq!(game.grid.get(tile!("3B")), Slot::Chain(Chain::Festival));
        assert_eq!(game.grid.chain_size(Chain::Festival), 5);
    }

    #[test]
    fn test_illegal_placement_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();

        for (idx, chain) in CHAIN_ARRAY.iter().enumerate() {
            game.grid.place(Tile::new(idx as i8, 8), Slot::Chain(*chain));
        }
        game.grid.place(tile!("1A"), Slot::Undefined);
        game.players[0].tiles[0] = tile!("2A");
        game.recompute();

        assert!(!game.computed.legal_moves.contains(&tile!("2A")));
        assert_eq!(
            game.apply_action(&Action::PlaceTile(PlayerId(0), tile!("2A")), &mut rng).err(),
            Some(ActionError::IllegalPlacement(tile!("2A")))
        );
    }

    #[test]
    fn test_skip_when_stuck() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();

        for x in 0..11 {
            game.grid.place(Tile::new(x, 0), Slot::Chain(Chain::Tower));
            game.grid.place(Tile::new(x, 2), Slot::Chain(Chain::Imperial));
        }

        // every one of these would merge two safe chains
        let stuck: Vec<Tile> = (0..6).map(|x| Tile::new(x, 1)).collect();
        game.players[0].tiles = stuck.clone();
        game.recompute();

        assert_eq!(game.actions(), vec![Action::SkipPlacement(PlayerId(0))]);

        let game = game.apply_action(&Action::SkipPlacement(PlayerId(0)), &mut rng).unwrap();
        assert_eq!(game.consecutive_skips, 1);

        // both chains are safe, so the end may be declared
        assert_eq!(game.phase, Phase::DeclareGameEnd);
        assert_eq!(game.players[0].tiles, stuck);
    }

    #[test]
    fn test_everyone_skipping_ends_the_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();
        game.consecutive_skips = 3;
        game.players[0].tiles.clear();
        game.recompute();

        let game = game.apply_action(&Action::SkipPlacement(PlayerId(0)), &mut rng).unwrap();
        assert!(game.is_terminal());
    }

    #[test]
    fn test_stuck_hand_is_refreshed_at_turn_start() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut game = game_test_instance();

        for x in 0..11 {
            game.grid.place(Tile::new(x, 0), Slot::Chain(Chain::Tower));
            game.grid.place(Tile::new(x, 2), Slot::Chain(Chain::Imperial));
        }

        let stuck: Vec<Tile> = (0..6).map(|x| Tile::new(x, 1)).collect();
        game.tiles.retain(|t| !stuck.contains(t) && game.grid.get(*t) == Slot::Empty);
        for player in &mut game.players {
            player.tiles.retain(|t| !stuck.contains(t));
        }
        game.players[1].tiles = stuck.clone();
        game.phase = Phase::PurchaseStock;
        game.will_end = false;
        game.recompute();

        let tiles_before = game.tiles.len() + game.players[0].tiles.len() + game.players[1].tiles.len();
        let game = game
            .apply_action(&Action::PurchaseStock(PlayerId(0), [crate::BuyOption::None; 3]), &mut rng)
            .unwrap();

        assert_eq!(game.current_player_id, PlayerId(1));
        assert_eq!(game.players[1].tiles.len(), 6);
        assert_ne!(game.players[1].tiles, stuck);
        assert_eq!(game.tiles.len() + game.players[0].tiles.len() + game.players[1].tiles.len(), tiles_before);
    }

    #[test]
    fn test_draw_tile_respects_bank_and_hand() {
        let mut game = game_test_instance();

        assert!(!game.draw_tile(PlayerId(0)));

        game.players[0].tiles.pop();
        game.tiles.clear();
        assert!(!game.draw_tile(PlayerId(0)));
        assert_eq!(game.players[0].tiles.len(), 5);
    }
}
