//! Monte Carlo payoff estimation.
//!
//! Estimates the value of a full strategy profile by simulating complete
//! plays of the game and averaging terminal payoffs per player.

use rand::Rng;

use crate::br::game::Game;
use crate::br::strategy::Strategy;

/// Sample an index according to a probability distribution.
pub(crate) fn sample_index<R: Rng>(probs: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &prob) in probs.iter().enumerate() {
        cumsum += prob;
        if r < cumsum {
            return i;
        }
    }

    // Fallback to last action (handles floating point imprecision)
    probs.len() - 1
}

/// Estimate per-player expected payoff by simulating complete plays.
///
/// Chance nodes are sampled from their outcome distribution and decision
/// nodes from the acting seat's policy. The estimate's standard error shrinks
/// as `1/sqrt(num_samples)`.
///
/// # Arguments
/// * `game` - The game to simulate
/// * `strategies` - One fixed strategy per player, in seat order
/// * `num_samples` - Number of complete plays to average over
/// * `rng` - Random number generator
///
/// # Returns
/// The average payoff for every player, in seat order.
///
/// # Panics
/// Panics if `strategies` does not hold one entry per player.
pub fn sample_payoff<G: Game, R: Rng>(
    game: &G,
    strategies: &[&dyn Strategy<G>],
    num_samples: usize,
    rng: &mut R,
) -> Vec<f64> {
    assert_eq!(
        strategies.len(),
        game.num_players(),
        "one strategy per player required"
    );

    let num_players = game.num_players();
    let mut totals = vec![0.0; num_players];

    for _ in 0..num_samples {
        let mut state = game.initial_state();

        loop {
            if game.is_terminal(&state) {
                for (player, total) in totals.iter_mut().enumerate() {
                    *total += game.get_payoff(&state, player);
                }
                break;
            }

            if game.is_chance(&state) {
                state = game.sample_chance(&state, rng);
                continue;
            }

            let acting = match game.current_player(&state) {
                Some(p) => p,
                None => {
                    for (player, total) in totals.iter_mut().enumerate() {
                        *total += game.get_payoff(&state, player);
                    }
                    break;
                }
            };

            let actions = game.available_actions(&state);
            let probs = strategies[acting].policy(game, &state);
            let choice = sample_index(&probs, rng);
            state = game.apply_action(&state, &actions[choice]);
        }
    }

    if num_samples > 0 {
        for total in totals.iter_mut() {
            *total /= num_samples as f64;
        }
    }

    totals
}
