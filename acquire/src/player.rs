use crate::PlayerId;
use crate::error::ActionError;
use crate::stock::Stocks;
use crate::tile::Tile;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub tiles: Vec<Tile>,
    pub stocks: Stocks,
    pub money: u32,
}

impl Player {
    pub fn new(id: PlayerId, money: u32) -> Self {
        Self {
            id,
            tiles: vec![],
            stocks: Stocks::default(),
            money,
        }
    }

    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    pub(crate) fn remove_tile(&mut self, tile: Tile) -> Result<Tile, ActionError> {
        let Some(idx) = self.tiles.iter().position(|t| *t == tile) else {
            return Err(ActionError::TileNotInHand(tile));
        };

        Ok(self.tiles.remove(idx))
    }

    /// Debits the player's cash. Money never goes negative.
    pub(crate) fn pay(&mut self, amount: u32) -> Result<(), ActionError> {
        if amount > self.money {
            return Err(ActionError::InsufficientFunds {
                needed: amount,
                available: self.money,
            });
        }

        self.money -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{tile, PlayerId};
    use crate::error::ActionError;
    use crate::player::Player;

    #[test]
    fn test_pay() {
        let mut player = Player::new(PlayerId(0), 500);
        player.pay(300).unwrap();
        assert_eq!(player.money, 200);

        assert_eq!(player.pay(300), Err(ActionError::InsufficientFunds { needed: 300, available: 200 }));
        assert_eq!(player.money, 200);
    }

    #[test]
    fn test_remove_tile() {
        let mut player = Player::new(PlayerId(1), 0);
        player.tiles = vec![tile!("1A"), tile!("4C")];

        assert_eq!(player.remove_tile(tile!("4C")), Ok(tile!("4C")));
        assert!(!player.has_tile(tile!("4C")));
        assert_eq!(player.remove_tile(tile!("4C")), Err(ActionError::TileNotInHand(tile!("4C"))));
    }
}
