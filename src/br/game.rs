//! Game trait definition for best-response computation.
//!
//! Any game that implements the `Game` trait can be analyzed by the exact and
//! approximate best-response solvers. This provides a clean abstraction
//! between the algorithms and specific games.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for actions that can be taken in a game.
///
/// Actions must be cloneable, comparable, and hashable for storage in maps.
pub trait Action: Clone + Eq + Hash + Debug + Send + Sync {
    /// Convert action to a string representation for display/storage.
    fn to_string(&self) -> String;
}

/// Trait for information states (what a player knows at a decision point).
///
/// An information state represents all the information available to a player
/// when making a decision. Two game states that look identical to a player
/// (same cards, same action history) must produce the same information state,
/// and states distinguishable to that player must not collide.
pub trait InfoState: Clone + Eq + Hash + Debug + Send + Sync {
    /// Generate a unique string key for this information state.
    /// This key is used for grouping states and storing policies.
    fn key(&self) -> String;
}

/// Trait for game states.
///
/// A game state contains all information about the current state of the game,
/// including private information that players may not see.
pub trait GameState: Clone + Debug + Send + Sync {}

/// The main Game trait that defines the interface for any game.
///
/// Implement this trait to analyze your game with the best-response solvers.
///
/// # Example
/// ```ignore
/// struct MyGame;
///
/// impl Game for MyGame {
///     type State = MyGameState;
///     type Action = MyAction;
///     type InfoState = MyInfoState;
///
///     // ... implement required methods
/// }
/// ```
pub trait Game: Clone + Send + Sync {
    /// The type representing a complete game state.
    type State: GameState;

    /// The type representing an action a player can take.
    type Action: Action;

    /// The type representing what a player knows at a decision point.
    type InfoState: InfoState;

    /// Create the initial game state.
    fn initial_state(&self) -> Self::State;

    /// Check if the given state is terminal (game over).
    ///
    /// Terminal states have no more actions available and payoffs can be computed.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Get the payoff for a player at a terminal state.
    ///
    /// # Arguments
    /// * `state` - A terminal game state
    /// * `player` - The player index (0-indexed)
    ///
    /// # Returns
    /// The payoff (utility) for the specified player.
    ///
    /// # Panics
    /// May panic if called on a non-terminal state.
    fn get_payoff(&self, state: &Self::State, player: usize) -> f64;

    /// Get the index of the player who should act at the current state.
    ///
    /// # Returns
    /// - `Some(player_index)` if a player should act
    /// - `None` if the state is terminal or a chance node
    fn current_player(&self, state: &Self::State) -> Option<usize>;

    /// Get the total number of players in the game.
    fn num_players(&self) -> usize;

    /// Get the list of available actions at the current state.
    ///
    /// # Returns
    /// A vector of actions the acting entity can take, in a stable order.
    /// Returns empty vector if the state is terminal.
    fn available_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply an action to a state and return the resulting new state.
    ///
    /// This should not modify the input state (immutable transition).
    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Get the information state for the current player.
    ///
    /// The information state captures everything the current player knows,
    /// which typically includes their private cards and the public action
    /// history, but not other players' private information.
    fn info_state(&self, state: &Self::State) -> Self::InfoState;

    /// Check if the current state is a chance node.
    ///
    /// Chance nodes represent random events like dealing cards.
    /// Override this if your game has chance nodes.
    fn is_chance(&self, _state: &Self::State) -> bool {
        false
    }

    /// Get the outcome distribution of a chance node.
    ///
    /// Each entry pairs a chance action with its probability. Probabilities
    /// must sum to 1 over the returned entries; zero-probability entries are
    /// allowed and are never expanded by the exact solver.
    ///
    /// Override this (together with `is_chance`) for games with chance nodes.
    fn chance_outcomes(&self, _state: &Self::State) -> Vec<(Self::Action, f64)> {
        Vec::new()
    }

    /// Sample an outcome from a chance node.
    ///
    /// Draws one chance action according to `chance_outcomes` and applies it.
    /// Used by the sampling paths (approximate best response, payoff
    /// simulation); the exact solver expands the full distribution instead.
    fn sample_chance<R: rand::Rng>(&self, state: &Self::State, rng: &mut R) -> Self::State {
        let outcomes = self.chance_outcomes(state);
        debug_assert!(
            !outcomes.is_empty(),
            "sample_chance called on a state with no chance outcomes"
        );

        let r: f64 = rng.gen();
        let mut cumsum = 0.0;
        for (action, prob) in &outcomes {
            cumsum += prob;
            if r < cumsum {
                return self.apply_action(state, action);
            }
        }

        // Fallback to last outcome (handles floating point imprecision)
        let (action, _) = &outcomes[outcomes.len() - 1];
        self.apply_action(state, action)
    }

    /// Get a human-readable name for an action.
    ///
    /// Used for debugging and visualization.
    fn action_name(&self, action: &Self::Action) -> String {
        action.to_string()
    }

    /// Get a human-readable description of a state.
    ///
    /// Used for debugging and visualization.
    fn state_description(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}

/// Macro to simplify implementing the Action trait for simple enums.
#[macro_export]
macro_rules! impl_action {
    ($type:ty) => {
        impl $crate::br::game::Action for $type {
            fn to_string(&self) -> String {
                format!("{:?}", self)
            }
        }
    };
}

/// Macro to simplify implementing the GameState trait.
#[macro_export]
macro_rules! impl_game_state {
    ($type:ty) => {
        impl $crate::br::game::GameState for $type {}
    };
}
