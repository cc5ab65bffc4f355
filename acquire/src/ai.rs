//! The seam between the rules engine and a tree search.
//!
//! Searches only need to enumerate, apply and score actions. They never look inside the game, so
//! any state implementing [`State`] can be searched.

use std::fmt::Debug;
use std::hash::Hash;
use ahash::HashMap;
use rand::Rng;
use rand::seq::SliceRandom;
use crate::{Acquire, Action, ActionError, PlayerId};

pub trait SearchAction: Clone {}

pub trait SearchPlayer: 'static + Copy + Clone + Debug + Hash + Eq + PartialEq {}

pub trait State<A: SearchAction, P: SearchPlayer>: Sized + Clone {
    type Error: Debug;

    fn actions(&self) -> Vec<A>;
    fn apply_action<R: Rng>(&self, rng: &mut R, action: &A) -> Result<Self, Self::Error>;
    fn outcome(&self) -> Option<Outcome<P>>;

    fn current_player(&self) -> P;
    fn players(&self) -> Vec<P>;
}

/// A state with hidden information which can be resampled from one player's point of view.
pub trait Determinable<A: SearchAction, P: SearchPlayer>: State<A, P> {
    fn determine<R: Rng>(&self, rng: &mut R, perspective_player: P) -> Self;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome<P: SearchPlayer> {
    Winner(P),
    Draw(Vec<P>),
}

/// Plays uniformly random actions until the game is decided.
pub fn random_rollout<S, A, P, R>(state: &S, rng: &mut R) -> Result<S, S::Error>
where
    S: State<A, P>,
    A: SearchAction,
    P: SearchPlayer,
    R: Rng,
{
    let mut state = state.clone();

    while state.outcome().is_none() {
        let actions = state.actions();
        let Some(action) = actions.choose(rng) else {
            break;
        };

        state = state.apply_action(rng, action)?;
    }

    Ok(state)
}

impl SearchPlayer for PlayerId {}
impl SearchAction for Action {}

impl State<Action, PlayerId> for Acquire {
    type Error = ActionError;

    fn actions(&self) -> Vec<Action> {
        Acquire::actions(self)
    }

    fn apply_action<R: Rng>(&self, rng: &mut R, action: &Action) -> Result<Self, Self::Error> {
        Acquire::apply_action(self, action, rng)
    }

    fn outcome(&self) -> Option<Outcome<PlayerId>> {
        if !self.is_terminal() {
            return None;
        }

        let mut winners = self.winners();
        if winners.len() == 1 {
            Some(Outcome::Winner(winners.remove(0)))
        } else {
            Some(Outcome::Draw(winners))
        }
    }

    fn current_player(&self) -> PlayerId {
        self.current_actor()
    }

    fn players(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }
}

impl Determinable<Action, PlayerId> for Acquire {
    /// Every hand other than the perspective player's goes back into the bank, the bank is
    /// shuffled, and the hands are redealt at their previous sizes.
    fn determine<R: Rng>(&self, rng: &mut R, perspective_player: PlayerId) -> Acquire {
        let mut game = self.clone();

        let hand_sizes: HashMap<PlayerId, usize> = game.players
            .iter()
            .map(|p| (p.id, p.tiles.len()))
            .collect();

        for p in &mut game.players {
            if p.id == perspective_player {
                continue;
            }

            game.tiles.append(&mut p.tiles);
        }

        game.tiles.shuffle(rng);

        for p in &mut game.players {
            if p.id == perspective_player {
                continue;
            }

            let split = game.tiles.len() - hand_sizes[&p.id];
            p.tiles = game.tiles.split_off(split);
        }

        game.recompute();

        game
    }
}
