use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

/// A named hotel chain. Chains are fixed identities; only their extent on the board varies.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Chain {
    Tower,
    Luxor,
    American,
    Worldwide,
    Festival,
    Continental,
    Imperial,
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

pub const NUM_CHAINS: usize = 7;
pub const CHAIN_ARRAY: [Chain; NUM_CHAINS] = [
    Chain::Tower,
    Chain::Luxor,
    Chain::American,
    Chain::Worldwide,
    Chain::Festival,
    Chain::Continental,
    Chain::Imperial,
];

impl Chain {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Chain {
        CHAIN_ARRAY[idx]
    }
}

/// One value per named chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainTable<T: Copy>(pub [T; NUM_CHAINS]);

impl<T: Copy> Index<&Chain> for ChainTable<T> {
    type Output = T;

    fn index(&self, chain: &Chain) -> &Self::Output {
        &self.0[chain.as_index()]
    }
}

impl<T: Copy> IndexMut<&Chain> for ChainTable<T> {
    fn index_mut(&mut self, chain: &Chain) -> &mut Self::Output {
        &mut self.0[chain.as_index()]
    }
}

impl<T: Copy> ChainTable<T> {
    pub fn new(initial_value: T) -> Self {
        Self([initial_value; NUM_CHAINS])
    }

    pub fn set(&mut self, chain: &Chain, value: T) {
        self.0[chain.as_index()] = value;
    }

    pub fn get(&self, chain: &Chain) -> T {
        self.0[chain.as_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Chain, T)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, value)| (Chain::from_index(idx), *value))
    }
}

impl<T: Copy + Default> Default for ChainTable<T> {
    fn default() -> Self {
        Self([T::default(); NUM_CHAINS])
    }
}
