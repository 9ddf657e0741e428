//! Kuhn Poker implementation for solver validation.
//!
//! Kuhn Poker is a simplified poker game used to validate best-response
//! implementations because its small tree can be checked by hand.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack (0), Queen (1), King (2)
//! - 2 players, each antes 1 chip
//! - Each player receives 1 card
//! - Player 1 acts first: Pass or Bet (1 chip)
//! - Player 2 responds based on P1's action
//! - Higher card wins at showdown
//!
//! ## Game Tree
//!
//! ```text
//! Chance (deal one of 6 card orderings, 1/6 each)
//! └── P1 (first to act)
//!     ├── Pass
//!     │   └── P2
//!     │       ├── Pass → Showdown (pot = 2)
//!     │       └── Bet
//!     │           └── P1
//!     │               ├── Pass → P2 wins (pot = 3)
//!     │               └── Bet → Showdown (pot = 4)
//!     └── Bet
//!         └── P2
//!             ├── Pass → P1 wins (pot = 3)
//!             └── Bet → Showdown (pot = 4)
//! ```
//!
//! ## Known Best-Response Values
//!
//! Against an opponent playing uniformly at every decision:
//!
//! - Player 1's best response is worth exactly 1/2
//! - Player 2's best response is worth exactly 5/12
//!
//! Both anchor the exact-solver tests below.

use std::fmt;

use crate::br::game::{Action, Game, GameState, InfoState};

/// Actions in Kuhn Poker, including the dealing chance outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KuhnAction {
    /// Deal the two hole cards (chance outcome): (P1's card, P2's card).
    Deal(u8, u8),
    /// Pass (check if no bet, fold if facing bet)
    Pass,
    /// Bet (or call if facing bet)
    Bet,
}

impl Action for KuhnAction {
    fn to_string(&self) -> String {
        match self {
            KuhnAction::Deal(a, b) => format!("d{}{}", a, b),
            KuhnAction::Pass => "p".to_string(),
            KuhnAction::Bet => "b".to_string(),
        }
    }
}

impl fmt::Display for KuhnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KuhnAction::Deal(a, b) => write!(f, "Deal({}, {})", a, b),
            KuhnAction::Pass => write!(f, "Pass"),
            KuhnAction::Bet => write!(f, "Bet"),
        }
    }
}

/// Information state in Kuhn Poker.
///
/// What a player knows: their card and the action history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KuhnInfoState {
    /// Player's card (0=Jack, 1=Queen, 2=King)
    pub card: u8,
    /// Action history as string (e.g., "pb" = pass then bet)
    pub history: String,
}

impl InfoState for KuhnInfoState {
    fn key(&self) -> String {
        format!("{}:{}", self.card, self.history)
    }
}

impl fmt::Display for KuhnInfoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card_name = match self.card {
            0 => "J",
            1 => "Q",
            2 => "K",
            _ => "?",
        };
        write!(f, "{}|{}", card_name, self.history)
    }
}

/// Complete game state in Kuhn Poker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KuhnState {
    /// Cards dealt to each player (0=Jack, 1=Queen, 2=King)
    /// cards[0] is Player 1's card, cards[1] is Player 2's card
    pub cards: [u8; 2],
    /// Action history as string
    pub history: String,
    /// Amount each player has invested in the pot
    pub pot: [i32; 2],
    /// Whether cards have been dealt (the pre-deal state is the chance node)
    pub dealt: bool,
}

impl GameState for KuhnState {}

impl Default for KuhnState {
    fn default() -> Self {
        Self {
            cards: [0, 0],
            history: String::new(),
            pot: [1, 1], // Both ante 1
            dealt: false,
        }
    }
}

impl fmt::Display for KuhnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<&str> = self
            .cards
            .iter()
            .map(|&c| match c {
                0 => "J",
                1 => "Q",
                2 => "K",
                _ => "?",
            })
            .collect();
        write!(
            f,
            "P1:{} P2:{} History:{} Pot:{:?}",
            cards[0], cards[1], self.history, self.pot
        )
    }
}

/// Kuhn Poker game.
#[derive(Debug, Clone, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    /// Create a new Kuhn Poker game.
    pub fn new() -> Self {
        Self
    }

    /// Get card name for display.
    pub fn card_name(card: u8) -> &'static str {
        match card {
            0 => "Jack",
            1 => "Queen",
            2 => "King",
            _ => "Unknown",
        }
    }

    /// The six equally likely card orderings.
    fn deals() -> [(u8, u8); 6] {
        [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
    }
}

impl Game for KuhnPoker {
    type State = KuhnState;
    type Action = KuhnAction;
    type InfoState = KuhnInfoState;

    fn initial_state(&self) -> Self::State {
        KuhnState::default()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        let h = &state.history;
        // Terminal states:
        // "pp" - both pass, showdown
        // "pbp" - pass, bet, fold
        // "pbb" - pass, bet, call
        // "bp" - bet, fold
        // "bb" - bet, call
        matches!(h.as_str(), "pp" | "pbp" | "pbb" | "bp" | "bb")
    }

    fn get_payoff(&self, state: &Self::State, player: usize) -> f64 {
        debug_assert!(self.is_terminal(state), "get_payoff called on non-terminal state");

        let h = &state.history;
        let p0_card = state.cards[0];
        let p1_card = state.cards[1];

        // Calculate payoff for player 0 (player 1's payoff is negation)
        let p0_payoff: f64 = match h.as_str() {
            "pp" => {
                // Showdown after both pass - pot is 2 (1+1 ante)
                if p0_card > p1_card {
                    1.0 // Win opponent's ante
                } else {
                    -1.0 // Lose own ante
                }
            }
            "bp" => {
                // Player 1 bet, player 2 folded
                1.0 // P0 wins P1's ante
            }
            "pbp" => {
                // Player 1 passed, player 2 bet, player 1 folded
                -1.0 // P0 loses own ante
            }
            "bb" | "pbb" => {
                // Showdown after bet-call - pot is 4 (2+2)
                if p0_card > p1_card {
                    2.0 // Win opponent's 2 chips
                } else {
                    -2.0 // Lose own 2 chips
                }
            }
            _ => 0.0,
        };

        if player == 0 {
            p0_payoff
        } else {
            -p0_payoff
        }
    }

    fn current_player(&self, state: &Self::State) -> Option<usize> {
        if self.is_chance(state) || self.is_terminal(state) {
            return None;
        }

        // Player alternates: P0 at even history length, P1 at odd
        // But after "pb", P0 acts again
        let h = &state.history;
        match h.as_str() {
            "" => Some(0),   // P0 acts first
            "p" => Some(1),  // P1 responds to pass
            "b" => Some(1),  // P1 responds to bet
            "pb" => Some(0), // P0 responds to P1's bet after pass
            _ => None,       // Terminal
        }
    }

    fn num_players(&self) -> usize {
        2
    }

    fn available_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_chance(state) {
            return Self::deals()
                .iter()
                .map(|&(a, b)| KuhnAction::Deal(a, b))
                .collect();
        }
        if self.is_terminal(state) {
            return vec![];
        }
        // Both actions always available when not terminal
        vec![KuhnAction::Pass, KuhnAction::Bet]
    }

    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        let mut new_state = state.clone();

        match action {
            KuhnAction::Deal(a, b) => {
                debug_assert!(self.is_chance(state), "deal applied after dealing");
                new_state.cards = [*a, *b];
                new_state.dealt = true;
            }
            KuhnAction::Pass => {
                new_state.history.push('p');
            }
            KuhnAction::Bet => {
                new_state.history.push('b');
                // Add 1 to current player's pot contribution
                let player = self.current_player(state).unwrap();
                new_state.pot[player] += 1;
            }
        }

        new_state
    }

    fn info_state(&self, state: &Self::State) -> Self::InfoState {
        let player = self.current_player(state).unwrap_or(0);
        KuhnInfoState {
            card: state.cards[player],
            history: state.history.clone(),
        }
    }

    fn is_chance(&self, state: &Self::State) -> bool {
        // Chance node is when cards haven't been dealt yet
        !state.dealt
    }

    fn chance_outcomes(&self, state: &Self::State) -> Vec<(Self::Action, f64)> {
        debug_assert!(self.is_chance(state), "chance_outcomes on non-chance state");
        Self::deals()
            .iter()
            .map(|&(a, b)| (KuhnAction::Deal(a, b), 1.0 / 6.0))
            .collect()
    }

    fn action_name(&self, action: &Self::Action) -> String {
        match action {
            KuhnAction::Deal(a, b) => {
                format!("Deal {}/{}", Self::card_name(*a), Self::card_name(*b))
            }
            KuhnAction::Pass => "Pass".to_string(),
            KuhnAction::Bet => "Bet".to_string(),
        }
    }

    fn state_description(&self, state: &Self::State) -> String {
        format!("{}", state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::br::{BestResponse, BrConfig, StrategyProfile, UniformStrategy};

    #[test]
    fn test_kuhn_game_tree() {
        let game = KuhnPoker::new();

        // Test initial state
        let state = game.initial_state();
        assert!(!state.dealt);
        assert!(game.is_chance(&state));

        // Dealing exposes six equally likely orderings
        let outcomes = game.chance_outcomes(&state);
        assert_eq!(outcomes.len(), 6);
        let total: f64 = outcomes.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);

        // Test after dealing
        let dealt_state = game.apply_action(&state, &KuhnAction::Deal(2, 0)); // K vs J
        assert!(!game.is_chance(&dealt_state));
        assert!(!game.is_terminal(&dealt_state));
        assert_eq!(dealt_state.cards, [2, 0]);
        assert_eq!(game.current_player(&dealt_state), Some(0));

        // Test actions
        let actions = game.available_actions(&dealt_state);
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&KuhnAction::Pass));
        assert!(actions.contains(&KuhnAction::Bet));
    }

    #[test]
    fn test_kuhn_terminal_payoffs() {
        let game = KuhnPoker::new();

        // Test "pp" - both pass, higher card wins
        let pp_state = KuhnState {
            cards: [2, 0], // K vs J
            history: "pp".to_string(),
            pot: [1, 1],
            dealt: true,
        };
        assert!(game.is_terminal(&pp_state));
        assert_eq!(game.get_payoff(&pp_state, 0), 1.0); // K wins
        assert_eq!(game.get_payoff(&pp_state, 1), -1.0);

        // Test "bp" - bet then fold
        let bp_state = KuhnState {
            cards: [0, 2], // J vs K
            history: "bp".to_string(),
            pot: [2, 1],
            dealt: true,
        };
        assert!(game.is_terminal(&bp_state));
        assert_eq!(game.get_payoff(&bp_state, 0), 1.0); // J wins by fold

        // Test "bb" - bet then call, showdown
        let bb_state = KuhnState {
            cards: [0, 2], // J vs K
            history: "bb".to_string(),
            pot: [2, 2],
            dealt: true,
        };
        assert!(game.is_terminal(&bb_state));
        assert_eq!(game.get_payoff(&bb_state, 0), -2.0); // J loses showdown
        assert_eq!(game.get_payoff(&bb_state, 1), 2.0); // K wins showdown
    }

    #[test]
    fn test_kuhn_info_states() {
        let game = KuhnPoker::new();

        let state = KuhnState {
            cards: [1, 2], // Q vs K
            history: "p".to_string(),
            pot: [1, 1],
            dealt: true,
        };

        // Current player is P1 (index 1)
        assert_eq!(game.current_player(&state), Some(1));

        // Info state should show P1's card (K=2) and history
        let info = game.info_state(&state);
        assert_eq!(info.card, 2);
        assert_eq!(info.history, "p");
        assert_eq!(info.key(), "2:p");
    }

    #[test]
    fn test_best_response_of_player_zero_to_uniform() {
        let game = KuhnPoker::new();
        let uniform = UniformStrategy;
        let profile = StrategyProfile::with_responder(0, &[&uniform]);

        let br = BestResponse::compute(&game, 0, &profile, &BrConfig::default()).unwrap();

        // Worked by hand: J root contributes -1/6, Q root 1/6, K root 1/2
        assert!((br.value() - 0.5).abs() < 1e-9, "value {}", br.value());

        // Bluffing the Jack dominates (-0.5 conditional vs -1.0 for pass)
        assert_eq!(br.policy_for("0:"), Some(&vec![0.0, 1.0]));
        // Betting the Queen dominates (0.5 vs 0.0)
        assert_eq!(br.policy_for("1:"), Some(&vec![0.0, 1.0]));
        // The King ties exactly (1.5 both ways): uniform over both actions
        assert_eq!(br.policy_for("2:"), Some(&vec![0.5, 0.5]));
        // Facing a bet after passing the King, calling wins the bigger pot
        assert_eq!(br.policy_for("2:pb"), Some(&vec![0.0, 1.0]));

        // "0:pb" sits below the non-best Pass branch of the Jack root:
        // its sub-policy is discarded along with the branch
        assert_eq!(br.policy_for("0:pb"), None);
        assert_eq!(br.policy_map().len(), 4);
    }

    #[test]
    fn test_best_response_of_player_one_to_uniform() {
        let game = KuhnPoker::new();
        let uniform = UniformStrategy;
        let profile = StrategyProfile::with_responder(1, &[&uniform]);

        let br = BestResponse::compute(&game, 1, &profile, &BrConfig::default()).unwrap();

        // Worked by hand: J contributes -1/4, Q 1/12, K 7/12
        assert!(
            (br.value() - 5.0 / 12.0).abs() < 1e-9,
            "value {}",
            br.value()
        );

        // All six of player 1's information sets are reached and kept
        assert_eq!(br.policy_map().len(), 6);

        // Fold the Jack to a bet, call with the King
        assert_eq!(br.policy_for("0:b"), Some(&vec![1.0, 0.0]));
        assert_eq!(br.policy_for("2:b"), Some(&vec![0.0, 1.0]));
        // Bet every card when checked to
        assert_eq!(br.policy_for("0:p"), Some(&vec![0.0, 1.0]));
        assert_eq!(br.policy_for("1:p"), Some(&vec![0.0, 1.0]));
        assert_eq!(br.policy_for("2:p"), Some(&vec![0.0, 1.0]));
        // Calling with the Queen breaks even, folding loses the ante
        assert_eq!(br.policy_for("1:b"), Some(&vec![0.0, 1.0]));
    }
}
