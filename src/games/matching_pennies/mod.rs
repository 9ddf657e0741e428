//! Matching Pennies implementation for solver validation.
//!
//! Both players simultaneously choose Heads or Tails; player 0 wins a chip
//! when the pennies match, player 1 wins when they differ. The simultaneous
//! move is modeled sequentially: player 0 moves first and player 1 moves
//! without observing it, so player 1's two decision states share a single
//! information set.
//!
//! ## Known Values
//!
//! Uniform play is the unique Nash equilibrium. A best response against the
//! uniform opponent is worth exactly 0 and every action ties, so the
//! best-response policy is uniform as well.

use std::fmt;

use crate::br::game::{Game, InfoState};
use crate::{impl_action, impl_game_state};

/// Actions in Matching Pennies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PennyAction {
    /// Play heads.
    Heads,
    /// Play tails.
    Tails,
}

impl_action!(PennyAction);

impl fmt::Display for PennyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PennyAction::Heads => write!(f, "Heads"),
            PennyAction::Tails => write!(f, "Tails"),
        }
    }
}

/// Information state in Matching Pennies.
///
/// Neither player has observed anything when acting, so the info state is
/// just the seat: both of player 1's decision states map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PennyInfoState {
    /// The acting player.
    pub player: usize,
}

impl InfoState for PennyInfoState {
    fn key(&self) -> String {
        format!("mp:{}", self.player)
    }
}

/// Complete game state in Matching Pennies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PennyState {
    /// Each player's chosen penny, in seat order.
    pub moves: [Option<PennyAction>; 2],
}

impl_game_state!(PennyState);

/// The Matching Pennies game.
#[derive(Debug, Clone, Default)]
pub struct MatchingPennies;

impl MatchingPennies {
    /// Create a new Matching Pennies game.
    pub fn new() -> Self {
        Self
    }
}

impl Game for MatchingPennies {
    type State = PennyState;
    type Action = PennyAction;
    type InfoState = PennyInfoState;

    fn initial_state(&self) -> Self::State {
        PennyState::default()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.moves[0].is_some() && state.moves[1].is_some()
    }

    fn get_payoff(&self, state: &Self::State, player: usize) -> f64 {
        debug_assert!(self.is_terminal(state), "get_payoff called on non-terminal state");

        // Player 0 wins on a match, player 1 on a mismatch
        let p0_payoff = if state.moves[0] == state.moves[1] {
            1.0
        } else {
            -1.0
        };

        if player == 0 {
            p0_payoff
        } else {
            -p0_payoff
        }
    }

    fn current_player(&self, state: &Self::State) -> Option<usize> {
        match state.moves {
            [None, _] => Some(0),
            [Some(_), None] => Some(1),
            _ => None,
        }
    }

    fn num_players(&self) -> usize {
        2
    }

    fn available_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            return vec![];
        }
        vec![PennyAction::Heads, PennyAction::Tails]
    }

    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        let mut new_state = state.clone();
        let player = self
            .current_player(state)
            .expect("apply_action on terminal state");
        new_state.moves[player] = Some(*action);
        new_state
    }

    fn info_state(&self, state: &Self::State) -> Self::InfoState {
        PennyInfoState {
            player: self.current_player(state).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::br::{BestResponse, BrConfig, StrategyProfile, UniformStrategy};

    #[test]
    fn test_game_structure() {
        let game = MatchingPennies::new();

        let state = game.initial_state();
        assert!(!game.is_terminal(&state));
        assert!(!game.is_chance(&state));
        assert_eq!(game.current_player(&state), Some(0));
        assert_eq!(game.available_actions(&state).len(), 2);

        let after_p0 = game.apply_action(&state, &PennyAction::Heads);
        assert_eq!(game.current_player(&after_p0), Some(1));

        let done = game.apply_action(&after_p0, &PennyAction::Tails);
        assert!(game.is_terminal(&done));
        assert_eq!(game.get_payoff(&done, 0), -1.0);
        assert_eq!(game.get_payoff(&done, 1), 1.0);
    }

    #[test]
    fn test_player_one_states_share_an_info_set() {
        let game = MatchingPennies::new();
        let state = game.initial_state();

        let after_heads = game.apply_action(&state, &PennyAction::Heads);
        let after_tails = game.apply_action(&state, &PennyAction::Tails);

        assert_eq!(
            game.info_state(&after_heads).key(),
            game.info_state(&after_tails).key()
        );
    }

    #[test]
    fn test_best_response_to_uniform_is_worth_zero() {
        let game = MatchingPennies::new();
        let uniform = UniformStrategy;
        let config = BrConfig::default();

        for player in 0..2 {
            let profile = StrategyProfile::with_responder(player, &[&uniform]);
            let br = BestResponse::compute(&game, player, &profile, &config).unwrap();

            assert_eq!(br.value(), 0.0);

            // Both actions tie, so the policy is uniform over both
            let key = format!("mp:{}", player);
            assert_eq!(br.policy_for(&key), Some(&vec![0.5, 0.5]));
            assert_eq!(br.policy_map().len(), 1);
        }
    }

    #[test]
    fn test_aggregated_walk_visits_every_node_once() {
        let game = MatchingPennies::new();
        let uniform = UniformStrategy;
        let profile = StrategyProfile::with_responder(1, &[&uniform]);

        let br = BestResponse::compute(&game, 1, &profile, &BrConfig::default()).unwrap();

        // Root walk: opponent root plus two aggregated responder states;
        // solve: two terminals per action over the two-state support.
        assert_eq!(br.stats().nodes_visited, 7);
        assert_eq!(br.stats().info_sets, 1);
    }
}
