use lazy_static::lazy_static;
use tracing::trace;
use crate::{Acquire, PlayerId};
use crate::chain::{Chain, ChainTable, CHAIN_ARRAY};
use crate::grid::Grid;
use crate::player::Player;

lazy_static! {
    static ref CHAIN_TIERS: ChainTable<u8> = {
        let mut tiers = ChainTable::new(0);
        tiers.set(&Chain::Tower, 0);
        tiers.set(&Chain::Luxor, 0);
        tiers.set(&Chain::American, 1);
        tiers.set(&Chain::Worldwide, 1);
        tiers.set(&Chain::Festival, 1);
        tiers.set(&Chain::Continental, 2);
        tiers.set(&Chain::Imperial, 2);

        tiers
    };
}

pub fn chain_tier(chain: Chain) -> u8 {
    CHAIN_TIERS.get(&chain)
}

/// Price of a single share. A chain that is not on the board has no price.
pub fn share_price(chain: Chain, size: u16) -> u32 {
    if size == 0 {
        return 0;
    }

    chain_size_value(size) + chain_tier(chain) as u32 * 100
}

pub fn share_value(chain: Chain, size: u16, count: u8) -> u32 {
    share_price(chain, size) * count as u32
}

fn chain_size_value(chain_size: u16) -> u32 {
    match chain_size {
        ..=1 => 0,
        2..=5 => chain_size as u32 * 100,
        6..=10 => 600,
        11..=20 => 700,
        21..=30 => 800,
        31..=40 => 900,
        41.. => 1000,
    }
}

/// The (major, minor) shareholder bonuses for a chain of the given size.
pub fn bonus_amounts(chain: Chain, size: u16) -> (u32, u32) {
    let major = share_price(chain, size) * 10;
    (major, major / 2)
}

/// Splits a chain's shareholder bonuses between the players holding its stock.
///
/// A unique largest holder takes the major bonus and the holders tied for second place split the
/// minor bonus. Holders tied for first place split both bonuses between them, and a lone holder
/// takes both. Every split is rounded up to the nearest hundred.
pub fn shareholder_bonuses(chain: Chain, size: u16, holdings: &[(PlayerId, u8)]) -> Vec<(PlayerId, u32)> {
    let holders: Vec<(PlayerId, u8)> = holdings
        .iter()
        .filter(|(_, amount)| *amount > 0)
        .copied()
        .collect();

    let Some(most_stock_held) = holders.iter().map(|(_, amount)| *amount).max() else {
        return vec![];
    };

    let (major_bonus, minor_bonus) = bonus_amounts(chain, size);

    let players_with_most_stock: Vec<PlayerId> = holders
        .iter()
        .filter(|(_, amount)| *amount == most_stock_held)
        .map(|(id, _)| *id)
        .collect();

    // first place is shared, so both bonuses are pooled between them
    if players_with_most_stock.len() > 1 {
        let split = split_bonus(major_bonus + minor_bonus, players_with_most_stock.len());
        return players_with_most_stock.into_iter().map(|id| (id, split)).collect();
    }

    let major_holder = players_with_most_stock[0];

    let second_most_stock_held = holders
        .iter()
        .map(|(_, amount)| *amount)
        .filter(|amount| *amount != most_stock_held)
        .max();

    let Some(second_most_stock_held) = second_most_stock_held else {
        return vec![(major_holder, major_bonus + minor_bonus)];
    };

    let players_with_second_most_stock: Vec<PlayerId> = holders
        .iter()
        .filter(|(_, amount)| *amount == second_most_stock_held)
        .map(|(id, _)| *id)
        .collect();

    let split = split_bonus(minor_bonus, players_with_second_most_stock.len());

    std::iter::once((major_holder, major_bonus))
        .chain(players_with_second_most_stock.into_iter().map(|id| (id, split)))
        .collect()
}

fn split_bonus(total: u32, ways: usize) -> u32 {
    round_up_to_nearest_hundred(total.div_ceil(ways as u32))
}

fn round_up_to_nearest_hundred(num: u32) -> u32 {
    num.div_ceil(100) * 100
}

/// Money plus the current value of every share held in a chain on the board.
pub fn net_worth(player: &Player, grid: &Grid) -> u32 {
    CHAIN_ARRAY
        .iter()
        .map(|chain| share_value(*chain, grid.chain_size(*chain), player.stocks.amount(*chain)))
        .sum::<u32>()
        + player.money
}

impl Acquire {
    pub fn chain_bonus(&self, chain: Chain) -> Vec<(PlayerId, u32)> {
        let holdings: Vec<(PlayerId, u8)> = self.players
            .iter()
            .map(|player| (player.id, player.stocks.amount(chain)))
            .collect();

        shareholder_bonuses(chain, self.grid.chain_size(chain), &holdings)
    }

    pub(crate) fn provide_bonuses(&mut self, chain: Chain) {
        for (player_id, bonus) in self.chain_bonus(chain) {
            trace!(player = %player_id, %chain, bonus, "shareholder bonus");
            self.get_player_by_id_mut(player_id).money += bonus;
        }
    }
}

#[cfg(test)]
mod test {
    use crate::PlayerId;
    use crate::chain::Chain;
    use crate::money::{bonus_amounts, round_up_to_nearest_hundred, share_price, share_value, shareholder_bonuses};

    #[test]
    fn test_share_price_table() {
        assert_eq!(share_price(Chain::Tower, 0), 0);
        assert_eq!(share_price(Chain::Tower, 2), 200);
        assert_eq!(share_price(Chain::Tower, 5), 500);
        assert_eq!(share_price(Chain::Tower, 6), 600);
        assert_eq!(share_price(Chain::Tower, 10), 600);
        assert_eq!(share_price(Chain::Tower, 11), 700);
        assert_eq!(share_price(Chain::Tower, 40), 900);
        assert_eq!(share_price(Chain::Tower, 41), 1000);

        assert_eq!(share_price(Chain::American, 2), 300);
        assert_eq!(share_price(Chain::Imperial, 41), 1200);
        assert_eq!(share_value(Chain::Continental, 7, 3), 2400);
    }

    #[test]
    fn test_bonus_amounts() {
        assert_eq!(bonus_amounts(Chain::Luxor, 6), (6000, 3000));
        assert_eq!(bonus_amounts(Chain::Festival, 12), (8000, 4000));
    }

    #[test]
    fn test_single_holder_takes_both_bonuses() {
        let bonuses = shareholder_bonuses(Chain::Tower, 6, &[(PlayerId(0), 0), (PlayerId(1), 4)]);
        assert_eq!(bonuses, vec![(PlayerId(1), 9000)]);
    }

    #[test]
    fn test_tied_holders_split_both_bonuses() {
        let bonuses = shareholder_bonuses(Chain::Tower, 6, &[(PlayerId(0), 3), (PlayerId(1), 3)]);
        assert_eq!(bonuses, vec![(PlayerId(0), 4500), (PlayerId(1), 4500)]);

        // 9000 / 4 = 2250, rounded up
        let bonuses = shareholder_bonuses(
            Chain::Tower,
            6,
            &[(PlayerId(0), 2), (PlayerId(1), 2), (PlayerId(2), 2), (PlayerId(3), 2)],
        );
        assert!(bonuses.iter().all(|(_, bonus)| *bonus == 2300));
    }

    #[test]
    fn test_major_and_minor_holders() {
        let bonuses = shareholder_bonuses(
            Chain::American,
            3,
            &[(PlayerId(0), 5), (PlayerId(1), 2), (PlayerId(2), 2), (PlayerId(3), 1)],
        );

        // price 400: major 4000, minor 2000 split between the two second place holders
        assert_eq!(bonuses, vec![(PlayerId(0), 4000), (PlayerId(1), 1000), (PlayerId(2), 1000)]);
    }

    #[test]
    fn test_no_holders_no_bonus() {
        assert!(shareholder_bonuses(Chain::Imperial, 20, &[(PlayerId(0), 0)]).is_empty());
        assert!(shareholder_bonuses(Chain::Imperial, 20, &[]).is_empty());
    }

    #[test]
    fn test_nearest_hundred() {
        assert_eq!(round_up_to_nearest_hundred(0), 0);
        assert_eq!(round_up_to_nearest_hundred(50), 100);
        assert_eq!(round_up_to_nearest_hundred(175), 200);
        assert_eq!(round_up_to_nearest_hundred(125), 200);
        assert_eq!(round_up_to_nearest_hundred(700), 700);
    }
}
