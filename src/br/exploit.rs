//! Exploitability of a strategy in two-player zero-sum games.
//!
//! Exploitability measures how much value a best-responding opponent could
//! gain against a strategy: 0 means the strategy is unexploitable (a Nash
//! equilibrium strategy for symmetric games), larger values mean further from
//! equilibrium.

use crate::br::approx::ApproxBestResponse;
use crate::br::config::BrConfig;
use crate::br::error::BrError;
use crate::br::exact::BestResponse;
use crate::br::game::Game;
use crate::br::strategy::{Strategy, StrategyProfile};

/// Check the two-player preconditions shared by both exploitability paths.
fn check_two_player<G: Game>(game: &G, measured_player: usize) -> Result<usize, BrError> {
    let num_players = game.num_players();
    if num_players != 2 {
        return Err(BrError::NotTwoPlayer { num_players });
    }
    if measured_player > 1 {
        return Err(BrError::InvalidPlayer {
            player: measured_player,
            num_players,
        });
    }
    Ok(1 - measured_player)
}

/// Exact exploitability of a player's strategy in a two-player zero-sum game.
///
/// Seats `strategy` symmetrically for both players and computes the exact
/// best response of `measured_player`'s opponent against it; the best
/// response's value is the exploitability.
///
/// # Errors
/// Fails fast on non-two-player games and invalid player indices, and with
/// [`BrError::LimitExceeded`] when the game exceeds the configured node
/// budget.
pub fn exploitability<G: Game>(
    game: &G,
    measured_player: usize,
    strategy: &dyn Strategy<G>,
    config: &BrConfig,
) -> Result<f64, BrError> {
    let responder = check_two_player(game, measured_player)?;

    let profile = StrategyProfile::with_responder(responder, &[strategy]);
    let br = BestResponse::compute(game, responder, &profile, config)?;
    Ok(br.value())
}

/// Approximate exploitability of a player's strategy in a two-player
/// zero-sum game.
///
/// Trains an approximate best response of the opponent for `iterations`
/// rounds, then estimates its value from sampled plays
/// (`config.value_samples`, defaulting to `iterations / 2`).
///
/// Note that with too few iterations the trained response may be worse than
/// the measured strategy, so the returned estimate can be negative; it
/// converges toward the exact exploitability as iterations and samples grow.
pub fn approx_exploitability<G: Game>(
    game: &G,
    measured_player: usize,
    strategy: &dyn Strategy<G>,
    iterations: u64,
    config: &BrConfig,
) -> Result<f64, BrError> {
    let responder = check_two_player(game, measured_player)?;

    let profile = StrategyProfile::with_responder(responder, &[strategy]);
    let mut br = ApproxBestResponse::compute(game, responder, &profile, iterations, config)?;

    let num_samples = config
        .value_samples
        .unwrap_or_else(|| (iterations / 2) as usize);
    br.sample_value(&profile, num_samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::br::game::{Action, Game, GameState, InfoState};
    use crate::br::strategy::{TabularStrategy, UniformStrategy};
    use crate::games::kuhn::KuhnPoker;
    use crate::games::matching_pennies::MatchingPennies;

    #[test]
    fn test_uniform_kuhn_exploitability_exact_values() {
        let game = KuhnPoker::new();
        let uniform = UniformStrategy;
        let config = BrConfig::default();

        // Best response of player 1 against the uniform player 0
        let measured0 = exploitability(&game, 0, &uniform, &config).unwrap();
        assert!((measured0 - 1.25 / 3.0).abs() < 1e-9, "got {}", measured0);

        // Best response of player 0 against the uniform player 1
        let measured1 = exploitability(&game, 1, &uniform, &config).unwrap();
        assert!((measured1 - 0.5).abs() < 1e-9, "got {}", measured1);

        // Exploitability is never negative
        assert!(measured0 >= 0.0);
        assert!(measured1 >= 0.0);
    }

    #[test]
    fn test_matching_pennies_uniform_is_unexploitable() {
        // Uniform play is the equilibrium of matching pennies: a best
        // response gains exactly nothing against it.
        let game = MatchingPennies::new();
        let uniform = UniformStrategy;
        let config = BrConfig::default();

        for measured_player in 0..2 {
            let value = exploitability(&game, measured_player, &uniform, &config).unwrap();
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_matching_pennies_biased_strategy_is_exploited() {
        // A 90/10 bias hands the opponent |0.9 - 0.1| = 0.8 per play.
        let game = MatchingPennies::new();
        let mut biased = TabularStrategy::new();
        biased.insert("mp:0", vec![0.9, 0.1]);
        biased.insert("mp:1", vec![0.9, 0.1]);

        let value = exploitability(&game, 0, &biased, &BrConfig::default()).unwrap();
        assert!((value - 0.8).abs() < 1e-9, "got {}", value);
    }

    #[test]
    fn test_approx_exploitability_tracks_exact_on_kuhn() {
        let game = KuhnPoker::new();
        let uniform = UniformStrategy;
        let config = BrConfig::default().with_seed(42).with_value_samples(10_000);

        // Exact value is 0.5 when player 1 is measured
        let approx = approx_exploitability(&game, 1, &uniform, 20_000, &config).unwrap();
        assert!(
            (approx - 0.5).abs() < 0.2,
            "approximate exploitability {} should approach 0.5",
            approx
        );
    }

    #[test]
    fn test_non_two_player_game_is_rejected() {
        /// Minimal three-player game: one chance-free terminal root.
        #[derive(Debug, Clone)]
        struct ThreeHanded;

        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Leaf;

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        struct NoMove;

        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        struct NoInfo;

        impl GameState for Leaf {}

        impl Action for NoMove {
            fn to_string(&self) -> String {
                "none".to_string()
            }
        }

        impl InfoState for NoInfo {
            fn key(&self) -> String {
                "none".to_string()
            }
        }

        impl Game for ThreeHanded {
            type State = Leaf;
            type Action = NoMove;
            type InfoState = NoInfo;

            fn initial_state(&self) -> Leaf {
                Leaf
            }

            fn is_terminal(&self, _state: &Leaf) -> bool {
                true
            }

            fn get_payoff(&self, _state: &Leaf, _player: usize) -> f64 {
                0.0
            }

            fn current_player(&self, _state: &Leaf) -> Option<usize> {
                None
            }

            fn num_players(&self) -> usize {
                3
            }

            fn available_actions(&self, _state: &Leaf) -> Vec<NoMove> {
                vec![]
            }

            fn apply_action(&self, state: &Leaf, _action: &NoMove) -> Leaf {
                state.clone()
            }

            fn info_state(&self, _state: &Leaf) -> NoInfo {
                NoInfo
            }
        }

        let game = ThreeHanded;
        let uniform = UniformStrategy;
        let err = exploitability(&game, 0, &uniform, &BrConfig::default()).unwrap_err();
        assert_eq!(err, BrError::NotTwoPlayer { num_players: 3 });

        let err =
            approx_exploitability(&game, 0, &uniform, 10, &BrConfig::default()).unwrap_err();
        assert_eq!(err, BrError::NotTwoPlayer { num_players: 3 });

        // Invalid measured player on a two-player game
        let game = MatchingPennies::new();
        let err = exploitability(&game, 2, &uniform, &BrConfig::default()).unwrap_err();
        assert_eq!(
            err,
            BrError::InvalidPlayer {
                player: 2,
                num_players: 2
            }
        );
    }
}
