//! Strategy abstraction and strategy profiles.
//!
//! A strategy maps each decision state to a probability distribution over the
//! legal actions at that state. Profiles assemble one strategy per seat and
//! structurally mark the seat a best response is being computed for, so the
//! responding player's slot carries no placeholder strategy.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::br::error::BrError;
use crate::br::game::{Game, InfoState};

/// A fixed strategy for one player.
///
/// `policy` returns a probability distribution aligned index-for-index with
/// `game.available_actions(state)`; probabilities must sum to 1 over the
/// legal actions.
pub trait Strategy<G: Game> {
    /// Get the action distribution at a decision state.
    fn policy(&self, game: &G, state: &G::State) -> Vec<f64>;
}

/// The uniform strategy: equal probability on every legal action.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformStrategy;

impl<G: Game> Strategy<G> for UniformStrategy {
    fn policy(&self, game: &G, state: &G::State) -> Vec<f64> {
        let n = game.available_actions(state).len();
        vec![1.0 / n as f64; n]
    }
}

/// A strategy backed by an information-set-keyed table.
///
/// Unseen information sets fall back to the uniform distribution, so a
/// partial table (for example one loaded from a solver's JSON output) is
/// still a complete strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabularStrategy {
    /// Action distributions keyed by information-set key.
    table: FxHashMap<String, Vec<f64>>,
}

impl TabularStrategy {
    /// Create an empty tabular strategy (uniform everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tabular strategy from an existing table.
    pub fn from_table(table: FxHashMap<String, Vec<f64>>) -> Self {
        Self { table }
    }

    /// Set the distribution for one information set.
    pub fn insert(&mut self, info_key: impl Into<String>, probs: Vec<f64>) {
        self.table.insert(info_key.into(), probs);
    }

    /// Get the stored distribution for an information set, if any.
    pub fn get(&self, info_key: &str) -> Option<&Vec<f64>> {
        self.table.get(info_key)
    }

    /// Number of information sets with an explicit entry.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<G: Game> Strategy<G> for TabularStrategy {
    fn policy(&self, game: &G, state: &G::State) -> Vec<f64> {
        let key = game.info_state(state).key();
        match self.table.get(&key) {
            Some(probs) => probs.clone(),
            None => {
                let n = game.available_actions(state).len();
                vec![1.0 / n as f64; n]
            }
        }
    }
}

/// One seat of a strategy profile.
#[derive(Clone, Copy)]
pub enum Seat<'a, G: Game> {
    /// A seat playing a fixed, known strategy.
    Fixed(&'a dyn Strategy<G>),
    /// The seat a best response is being computed for.
    ///
    /// This seat carries no strategy at all; the responding player's slot in
    /// the reference profile is ignored, and omitting it structurally keeps
    /// that explicit.
    Responding,
}

/// A full strategy profile: one seat per player.
#[derive(Clone)]
pub struct StrategyProfile<'a, G: Game> {
    seats: Vec<Seat<'a, G>>,
}

impl<'a, G: Game> StrategyProfile<'a, G> {
    /// Create a profile from explicit seats.
    pub fn new(seats: Vec<Seat<'a, G>>) -> Self {
        Self { seats }
    }

    /// Create a profile with a responding seat at `responder` and the given
    /// fixed strategies filling the remaining seats in order.
    ///
    /// `fixed` must have one entry per non-responding seat.
    ///
    /// # Panics
    /// Panics if `responder` is not a valid seat for `fixed.len() + 1`
    /// players.
    pub fn with_responder(responder: usize, fixed: &[&'a dyn Strategy<G>]) -> Self {
        let mut seats = Vec::with_capacity(fixed.len() + 1);
        let mut next = 0;
        for seat in 0..fixed.len() + 1 {
            if seat == responder {
                seats.push(Seat::Responding);
            } else {
                seats.push(Seat::Fixed(fixed[next]));
                next += 1;
            }
        }
        Self { seats }
    }

    /// Number of seats in the profile.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether the profile has no seats.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Index of the responding seat, if the profile has exactly one.
    pub fn responder(&self) -> Option<usize> {
        let mut found = None;
        for (i, seat) in self.seats.iter().enumerate() {
            if let Seat::Responding = seat {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }

    /// Get the fixed strategy seated at `player`, if that seat is fixed.
    pub fn fixed(&self, player: usize) -> Option<&'a dyn Strategy<G>> {
        match self.seats.get(player) {
            Some(Seat::Fixed(strategy)) => Some(*strategy),
            _ => None,
        }
    }

    /// Check the profile against a game and responding player.
    ///
    /// Fails fast, before any traversal work, when the player index is out of
    /// range, the profile is the wrong length, or the responding seat is not
    /// exactly at `player`.
    pub fn check(&self, game: &G, player: usize) -> Result<(), BrError> {
        let num_players = game.num_players();
        if player >= num_players {
            return Err(BrError::InvalidPlayer { player, num_players });
        }
        if self.seats.len() != num_players {
            return Err(BrError::ProfileMismatch {
                expected: num_players,
                got: self.seats.len(),
            });
        }
        if self.responder() != Some(player) {
            return Err(BrError::MisplacedResponder { expected: player });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::KuhnPoker;
    use crate::games::matching_pennies::MatchingPennies;

    #[test]
    fn test_uniform_strategy() {
        let game = MatchingPennies::new();
        let state = game.initial_state();
        let probs = Strategy::policy(&UniformStrategy, &game, &state);
        assert_eq!(probs, vec![0.5, 0.5]);
    }

    #[test]
    fn test_tabular_lookup_and_fallback() {
        let game = MatchingPennies::new();
        let state = game.initial_state();

        let mut tabular = TabularStrategy::new();
        assert!(tabular.is_empty());
        tabular.insert("mp:0", vec![0.9, 0.1]);

        // Player 0's root info set has an entry
        let probs = Strategy::policy(&tabular, &game, &state);
        assert_eq!(probs, vec![0.9, 0.1]);

        // Player 1's info set falls back to uniform
        let actions = game.available_actions(&state);
        let next = game.apply_action(&state, &actions[0]);
        let probs = Strategy::policy(&tabular, &game, &next);
        assert_eq!(probs, vec![0.5, 0.5]);
    }

    #[test]
    fn test_with_responder_seating() {
        let uniform = UniformStrategy;
        let profile: StrategyProfile<'_, KuhnPoker> =
            StrategyProfile::with_responder(1, &[&uniform]);

        assert_eq!(profile.len(), 2);
        assert_eq!(profile.responder(), Some(1));
        assert!(profile.fixed(0).is_some());
        assert!(profile.fixed(1).is_none());
    }

    #[test]
    fn test_profile_check_rejects_bad_profiles() {
        let game = KuhnPoker::new();
        let uniform = UniformStrategy;

        // Player index out of range
        let profile = StrategyProfile::with_responder(0, &[&uniform]);
        assert_eq!(
            profile.check(&game, 5),
            Err(BrError::InvalidPlayer {
                player: 5,
                num_players: 2
            })
        );

        // Wrong seat count
        let short = StrategyProfile::<KuhnPoker>::new(vec![Seat::Responding]);
        assert_eq!(
            short.check(&game, 0),
            Err(BrError::ProfileMismatch {
                expected: 2,
                got: 1
            })
        );

        // Responding seat in the wrong place
        let profile = StrategyProfile::with_responder(1, &[&uniform]);
        assert_eq!(
            profile.check(&game, 0),
            Err(BrError::MisplacedResponder { expected: 0 })
        );

        // Two responding seats
        let double = StrategyProfile::<KuhnPoker>::new(vec![Seat::Responding, Seat::Responding]);
        assert_eq!(
            double.check(&game, 0),
            Err(BrError::MisplacedResponder { expected: 0 })
        );

        // Well-formed
        let profile = StrategyProfile::with_responder(0, &[&uniform]);
        assert!(profile.check(&game, 0).is_ok());
    }
}
