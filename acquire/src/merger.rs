//! Resolution of a tile placed between two or more chains.
//!
//! The largest chain (picked by the placing player when several are equally large) absorbs the
//! others. Absorbed chains are handled one at a time from the largest down: the chain's
//! shareholder bonuses are paid, then every player holding its stock decides, in turn order from
//! the placing player, whether to hold, trade or sell. Only when every absorbed chain has been
//! handled is the merging tile labelled with the acquirer and the region filled.

use std::collections::VecDeque;
use itertools::Itertools;
use tracing::debug;
use crate::{Acquire, Action, ActionError, Phase, PlayerId};
use crate::action::{MergeDecision, MergeSubAction};
use crate::chain::Chain;
use crate::grid::Slot;
use crate::money::share_value;
use crate::tile::Tile;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergerState {
    /// The tile that triggered the merger. It stays undefined on the board until the merger is
    /// complete.
    pub tile: Tile,
    /// Every chain the tile touches.
    pub chains: Vec<Chain>,
    /// The chains sharing the largest size.
    pub tied_chains: Vec<Chain>,
    pub acquirer: Chain,
    /// Chains still to be absorbed, next first.
    pub absorptions: VecDeque<Absorption>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Absorption {
    pub chain: Chain,
    /// Players still owed a decision on this chain, next first.
    pub players: VecDeque<PlayerId>,
    pub bonus_paid: bool,
}

impl MergerState {
    /// The absorbed chain and the player whose decision is awaited.
    pub fn current_decision(&self) -> Option<(Chain, PlayerId)> {
        let absorption = self.absorptions.front()?;
        let player_id = absorption.players.front()?;
        Some((absorption.chain, *player_id))
    }
}

/// Every way of disposing of `held` shares of an absorbed chain when the bank has
/// `bank_acquirer` shares of the acquirer left to trade for.
pub fn merge_combinations(held: u8, bank_acquirer: u8) -> Vec<MergeDecision> {
    use MergeSubAction::*;

    let mut combinations = vec![MergeDecision::HOLD];

    for sell in 1..=held {
        combinations.push(MergeDecision([Sell(sell), Hold]));
    }

    let max_trades = u8::min(held / 2, bank_acquirer);
    for trades in 1..=max_trades {
        let traded = trades * 2;
        combinations.push(MergeDecision([Trade(traded), Hold]));

        for sell in 1..=held - traded {
            combinations.push(MergeDecision([Trade(traded), Sell(sell)]));
        }
    }

    combinations
}

impl Acquire {
    pub(crate) fn acquirer_selection_actions(&self, merger: &MergerState) -> Vec<Action> {
        merger.tied_chains
            .iter()
            .map(|chain| Action::PickAcquirer(self.current_player_id, *chain))
            .collect()
    }

    pub(crate) fn merge_actions(&self, merger: &MergerState) -> Vec<Action> {
        let Some((defunct_chain, player_id)) = merger.current_decision() else {
            return vec![];
        };

        let held = self.get_player_by_id(player_id).stocks.amount(defunct_chain);
        let bank_acquirer = self.stocks.amount(merger.acquirer);

        merge_combinations(held, bank_acquirer)
            .into_iter()
            .map(|decision| Action::Merge { player_id, decision })
            .collect()
    }

    pub(crate) fn begin_merger(&mut self, tile: Tile, mut chains: Vec<Chain>) {
        chains.sort();

        // sizes are taken before the merging tile joins anything
        let sizes: Vec<(Chain, u16)> = chains
            .iter()
            .map(|chain| (*chain, self.grid.count_chain(*chain)))
            .collect();

        debug_assert!(sizes.iter().all(|(chain, size)| self.grid.chain_size(*chain) == *size));

        let largest = sizes.iter().map(|(_, size)| *size).max().unwrap_or_default();
        let tied_chains: Vec<Chain> = sizes
            .iter()
            .filter(|(_, size)| *size == largest)
            .map(|(chain, _)| *chain)
            .collect();

        let merger = MergerState {
            tile,
            acquirer: tied_chains[0],
            chains,
            tied_chains,
            absorptions: VecDeque::new(),
        };

        if merger.tied_chains.len() > 1 {
            debug!(tied = ?merger.tied_chains, "merger needs a tiebreak");
            self.phase = Phase::PickChainToMerge(merger);
        } else {
            self.start_absorptions(merger);
        }
    }

    pub(crate) fn pick_acquirer(&mut self, mut merger: MergerState, chain: Chain) -> Result<(), ActionError> {
        if !merger.tied_chains.contains(&chain) {
            return Err(ActionError::NotTiedForLargest(chain));
        }

        merger.acquirer = chain;
        self.start_absorptions(merger);
        Ok(())
    }

    fn start_absorptions(&mut self, mut merger: MergerState) {
        let acquirer = merger.acquirer;

        merger.absorptions = merger.chains
            .iter()
            .copied()
            .filter(|chain| *chain != acquirer)
            .sorted_by(|a, b| self.grid.chain_size(*b).cmp(&self.grid.chain_size(*a)))
            .map(|chain| Absorption {
                chain,
                players: self.shareholders_in_order(chain),
                bonus_paid: false,
            })
            .collect();

        debug!(
            %acquirer,
            absorbed = ?merger.absorptions.iter().map(|a| a.chain).collect::<Vec<_>>(),
            "merger started"
        );

        self.advance_merger(merger);
    }

    /// Players holding stock in the chain, in turn order from the current player.
    fn shareholders_in_order(&self, chain: Chain) -> VecDeque<PlayerId> {
        self.player_ids_in_order(self.current_player_id)
            .into_iter()
            .filter(|player_id| self.get_player_by_id(*player_id).stocks.has_any(chain))
            .collect()
    }

    /// Pays out bonuses for the chain at the front of the queue and drops chains with nobody left
    /// to decide, until a decision is needed or the merger is complete.
    fn advance_merger(&mut self, mut merger: MergerState) {
        while let Some(absorption) = merger.absorptions.front_mut() {
            if !absorption.bonus_paid {
                absorption.bonus_paid = true;
                self.provide_bonuses(absorption.chain);
            }

            if !absorption.players.is_empty() {
                self.phase = Phase::Merge(merger);
                return;
            }

            merger.absorptions.pop_front();
        }

        self.complete_merger(merger);
    }

    fn complete_merger(&mut self, merger: MergerState) {
        self.grid.place(merger.tile, Slot::Chain(merger.acquirer));
        self.grid.fill_chain(merger.tile);

        debug!(
            acquirer = %merger.acquirer,
            size = self.grid.chain_size(merger.acquirer),
            "merger complete"
        );

        self.finish_placement();
    }

    pub(crate) fn resolve_merge_decision(&mut self, mut merger: MergerState, decision: MergeDecision) -> Result<(), ActionError> {
        let Some((defunct_chain, player_id)) = merger.current_decision() else {
            debug_assert!(false, "merge phase without a pending decision");
            self.advance_merger(merger);
            return Ok(());
        };

        let acquirer = merger.acquirer;
        let defunct_size = self.grid.chain_size(defunct_chain);

        for sub_action in decision.effective() {
            match sub_action {
                MergeSubAction::Hold => break,
                MergeSubAction::Trade(amount) => {
                    if amount == 0 || amount % 2 != 0 {
                        return Err(ActionError::OddTradeIn(amount));
                    }

                    self.stocks.withdraw(acquirer, amount / 2)?;

                    let player = self.get_player_by_id_mut(player_id);
                    player.stocks.withdraw(defunct_chain, amount)?;
                    player.stocks.deposit(acquirer, amount / 2);

                    self.stocks.deposit(defunct_chain, amount);
                }
                MergeSubAction::Sell(amount) => {
                    let player = self.get_player_by_id_mut(player_id);
                    player.stocks.withdraw(defunct_chain, amount)?;
                    player.money += share_value(defunct_chain, defunct_size, amount);

                    self.stocks.deposit(defunct_chain, amount);
                }
            }
        }

        if let Some(absorption) = merger.absorptions.front_mut() {
            absorption.players.pop_front();
        }

        self.advance_merger(merger);
        Ok(())
    }
}
