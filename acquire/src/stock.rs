use thiserror::Error;
use crate::chain::{Chain, ChainTable, CHAIN_ARRAY};

/// Share certificates held per chain, either by a player or by the bank.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stocks {
    stocks: ChainTable<u8>,
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum StockError {
    #[error("cannot withdraw {requested} {chain} stock, only {available} available")]
    InsufficientStock {
        chain: Chain,
        requested: u8,
        available: u8,
    },
}

impl Stocks {
    pub fn new(initial_value: u8) -> Self {
        Self {
            stocks: ChainTable::new(initial_value)
        }
    }

    pub fn amount(&self, chain: Chain) -> u8 {
        self.stocks.get(&chain)
    }

    pub fn has_any(&self, chain: Chain) -> bool {
        self.has_amount(chain, 1)
    }

    pub fn has_amount(&self, chain: Chain, amount: u8) -> bool {
        self.stocks[&chain] >= amount
    }

    pub fn total(&self) -> u32 {
        CHAIN_ARRAY.iter().map(|chain| self.amount(*chain) as u32).sum()
    }

    pub fn deposit(&mut self, chain: Chain, amount: u8) {
        if amount == 0 {
            return;
        }

        self.stocks[&chain] += amount;
    }

    pub fn withdraw(&mut self, chain: Chain, withdraw_amount: u8) -> Result<(), StockError> {
        let amount_available = self.stocks.get(&chain);

        if withdraw_amount > amount_available {
            return Err(StockError::InsufficientStock {
                chain,
                requested: withdraw_amount,
                available: amount_available,
            });
        }

        self.stocks.set(&chain, amount_available - withdraw_amount);

        Ok(())
    }

    /// Removes every certificate of `chain`, returning how many there were.
    pub fn take_all(&mut self, chain: Chain) -> u8 {
        std::mem::take(&mut self.stocks[&chain])
    }
}

impl Default for Stocks {
    fn default() -> Self {
        Self::new(0)
    }
}
