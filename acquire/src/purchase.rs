use itertools::Itertools;
use rand::Rng;
use tracing::debug;
use crate::{Acquire, Action, ActionError, BuyOption, Phase, PlayerId};
use crate::chain::{ChainTable, CHAIN_ARRAY};
use crate::money::{share_price, share_value};

impl Acquire {
    pub(crate) fn stock_purchase_actions(&self) -> Vec<Action> {
        self.purchasable_combinations(self.current_player_id)
            .into_iter()
            .map(|buy| Action::PurchaseStock(self.current_player_id, buy))
            .collect()
    }

    /// Every affordable way of buying up to three shares of chains on the board, as unordered
    /// combinations.
    pub(crate) fn purchasable_combinations(&self, purchasing_player_id: PlayerId) -> Vec<[BuyOption; 3]> {
        let remaining_money = self.get_player_by_id(purchasing_player_id).money;

        let buy_options = {
            let mut buy_option_chains: Vec<BuyOption> = self.grid.existing_chains()
                .iter()
                .sorted()
                .map(|chain| BuyOption::Chain(*chain))
                .collect();

            buy_option_chains.push(BuyOption::None);

            buy_option_chains
        };

        let mut chain_prices: ChainTable<u32> = ChainTable::default();
        for chain in &CHAIN_ARRAY {
            chain_prices.set(chain, share_price(*chain, self.grid.chain_size(*chain)))
        }

        // simulate buying each share of the combination against the
        // player's money and the bank's stock
        let can_buy = |buy_options: &[BuyOption; 3]| -> bool {
            let mut money = remaining_money;
            let mut stock = self.stocks.clone();

            for buy_option in buy_options {
                if let BuyOption::Chain(chain) = buy_option {
                    let cost = chain_prices.get(chain);

                    if money < cost || stock.withdraw(*chain, 1).is_err() {
                        return false;
                    }

                    money -= cost;
                }
            }

            true
        };

        let mut combinations = vec![];

        let num_buy_options = buy_options.len();
        for i in 0..num_buy_options {
            for j in i..num_buy_options {
                for k in j..num_buy_options {
                    let combination = [
                        buy_options[i],
                        buy_options[j],
                        buy_options[k]
                    ];

                    if can_buy(&combination) {
                        combinations.push(combination);
                    }
                }
            }
        }

        combinations
    }

    pub(crate) fn purchase_stock<R: Rng>(&mut self, buys: &[BuyOption; 3], rng: &mut R) -> Result<(), ActionError> {
        let player_id = self.current_player_id;

        for buy in buys {
            let BuyOption::Chain(chain) = buy else {
                continue;
            };

            let size = self.grid.chain_size(*chain);
            if size == 0 {
                return Err(ActionError::ChainNotActive(*chain));
            }

            self.stocks.withdraw(*chain, 1)?;

            let player = self.get_player_by_id_mut(player_id);
            player.pay(share_price(*chain, size))?;
            player.stocks.deposit(*chain, 1);
        }

        self.draw_tile(player_id);

        if self.will_end {
            self.end_game();
        } else {
            self.advance_turn(rng);
        }

        Ok(())
    }

    /// Pays every chain's shareholder bonuses and buys back all stock at its current price.
    pub(crate) fn end_game(&mut self) {
        for chain in self.grid.existing_chains() {
            self.provide_bonuses(chain);
        }

        for chain in CHAIN_ARRAY {
            let size = self.grid.chain_size(chain);

            for player in &mut self.players {
                let amount = player.stocks.take_all(chain);
                player.money += share_value(chain, size, amount);
                self.stocks.deposit(chain, amount);
            }
        }

        self.phase = Phase::GameOver;

        debug!(turn = self.turn, winners = ?self.winners(), "game over");
    }
}
