//! Approximate best response via outcome-sampling regret minimization.
//!
//! For games too large for exact enumeration, the responding seat is replaced
//! with a trainable regret-matching strategy and trained against the fixed
//! opponents by sampled traversals: the responding player explores every
//! action (external sampling) while opponents and chance contribute one
//! sampled outcome per iteration.
//!
//! This path has no node-budget failure mode; instead its value estimate
//! carries sampling variance that shrinks with more iterations and samples.
//! Quality degrades gracefully (and silently) when the iteration count is too
//! small for the game.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::br::config::BrConfig;
use crate::br::error::BrError;
use crate::br::game::{Game, InfoState};
use crate::br::sampling::{sample_index, sample_payoff};
use crate::br::storage::RegretTable;
use crate::br::strategy::{Strategy, StrategyProfile};

/// An approximate best response for one player against fixed opponents.
///
/// Construction trains the responding seat; afterwards the value is estimated
/// by Monte Carlo play via [`ApproxBestResponse::sample_value`]. The trained
/// object is itself a [`Strategy`] (the average strategy over the
/// post-warm-up iterations).
pub struct ApproxBestResponse<G: Game> {
    game: G,
    player: usize,
    config: BrConfig,
    table: RegretTable,
    rng: StdRng,
    iteration: u64,
    warmup: u64,
}

impl<G: Game> ApproxBestResponse<G> {
    /// Train an approximate best response for `player` against the fixed
    /// strategies in `profile`.
    ///
    /// # Arguments
    /// * `game` - The game to analyze
    /// * `player` - The responding player index
    /// * `profile` - One seat per player; the seat at `player` must be
    ///   [`Seat::Responding`](crate::br::Seat)
    /// * `iterations` - Number of training traversals; the first
    ///   `warmup_fraction` of them is discarded from the strategy average
    /// * `config` - Exploration, warm-up, and seed settings
    pub fn compute(
        game: &G,
        player: usize,
        profile: &StrategyProfile<'_, G>,
        iterations: u64,
        config: &BrConfig,
    ) -> Result<Self, BrError> {
        config.validate()?;
        profile.check(game, player)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut solver = Self {
            game: game.clone(),
            player,
            config: config.clone(),
            table: RegretTable::new(),
            rng,
            iteration: 0,
            warmup: (config.warmup_fraction * iterations as f64) as u64,
        };

        for _ in 0..iterations {
            solver.iteration += 1;
            let initial_state = solver.game.initial_state();
            solver.traverse(&initial_state, 1.0, profile);
        }

        Ok(solver)
    }

    /// Core sampled traversal.
    ///
    /// `my_reach` is the responding player's own reach probability, used to
    /// weight the strategy average; opponent and chance reach is implicit in
    /// the sampling.
    fn traverse(&mut self, state: &G::State, my_reach: f64, profile: &StrategyProfile<'_, G>) -> f64 {
        if self.game.is_terminal(state) {
            return self.game.get_payoff(state, self.player);
        }

        if self.game.is_chance(state) {
            let new_state = self.game.sample_chance(state, &mut self.rng);
            return self.traverse(&new_state, my_reach, profile);
        }

        let acting = match self.game.current_player(state) {
            Some(p) => p,
            None => return self.game.get_payoff(state, self.player),
        };

        let actions = self.game.available_actions(state);
        if actions.is_empty() {
            return self.game.get_payoff(state, self.player);
        }

        if acting == self.player {
            self.traverse_responder(state, my_reach, &actions, profile)
        } else {
            self.traverse_opponent(state, my_reach, acting, &actions, profile)
        }
    }

    /// Handle traversal at the responding player's decision points.
    ///
    /// Explores all actions and updates regrets against the regret-matching
    /// strategy's node value.
    fn traverse_responder(
        &mut self,
        state: &G::State,
        my_reach: f64,
        actions: &[G::Action],
        profile: &StrategyProfile<'_, G>,
    ) -> f64 {
        let info_key = self.game.info_state(state).key();
        let strategy = self.table.get_current_strategy(&info_key, actions.len());

        let mut action_values = vec![0.0; actions.len()];
        for (i, action) in actions.iter().enumerate() {
            let new_state = self.game.apply_action(state, action);
            action_values[i] = self.traverse(&new_state, my_reach * strategy[i], profile);
        }

        let node_value: f64 = strategy
            .iter()
            .zip(action_values.iter())
            .map(|(&s, &v)| s * v)
            .sum();

        let regret_updates: Vec<f64> = action_values.iter().map(|&v| v - node_value).collect();
        self.table
            .update_regrets(&info_key, &regret_updates, self.config.use_cfr_plus);

        // Early iterations are noise; only average once warm-up has passed
        if self.iteration > self.warmup {
            self.table.update_strategy_sum(&info_key, &strategy, my_reach);
        }

        node_value
    }

    /// Handle traversal at an opponent's decision points.
    ///
    /// Samples one action from the opponent's fixed policy, optionally mixed
    /// with uniform exploration.
    fn traverse_opponent(
        &mut self,
        state: &G::State,
        my_reach: f64,
        acting: usize,
        actions: &[G::Action],
        profile: &StrategyProfile<'_, G>,
    ) -> f64 {
        let strategy = match profile.fixed(acting) {
            Some(s) => s.policy(&self.game, state),
            None => vec![1.0 / actions.len() as f64; actions.len()],
        };

        let action_idx = if self.rng.gen::<f64>() < self.config.exploration {
            self.rng.gen_range(0..actions.len())
        } else {
            sample_index(&strategy, &mut self.rng)
        };

        let new_state = self.game.apply_action(state, &actions[action_idx]);
        self.traverse(&new_state, my_reach, profile)
    }

    /// Estimate the responding player's expected payoff under the trained
    /// strategy by Monte Carlo simulation.
    ///
    /// # Arguments
    /// * `profile` - The same profile shape used for training; fixed seats
    ///   play their strategies, the responding seat plays the trained average
    /// * `num_samples` - Number of complete plays to average over
    pub fn sample_value(
        &mut self,
        profile: &StrategyProfile<'_, G>,
        num_samples: usize,
    ) -> Result<f64, BrError> {
        profile.check(&self.game, self.player)?;

        let mut rng = StdRng::seed_from_u64(self.rng.gen());
        let this: &Self = &*self;

        let strategies: Vec<&dyn Strategy<G>> = (0..this.game.num_players())
            .map(|seat| match profile.fixed(seat) {
                Some(s) => s,
                None => this as &dyn Strategy<G>,
            })
            .collect();

        let payoffs = sample_payoff(&this.game, &strategies, num_samples, &mut rng);
        Ok(payoffs[this.player])
    }

    /// The responding player this best response was trained for.
    pub fn player(&self) -> usize {
        self.player
    }

    /// Number of training iterations completed.
    pub fn iterations(&self) -> u64 {
        self.iteration
    }

    /// Number of information sets discovered during training.
    pub fn num_info_sets(&self) -> usize {
        self.table.num_info_sets()
    }

    /// The trained average strategy at one information set.
    pub fn average_strategy(&self, info_key: &str, num_actions: usize) -> Vec<f64> {
        self.table.get_average_strategy(info_key, num_actions)
    }

    /// Snapshot the trained average strategy over every visited info set.
    pub fn policy_map(&self) -> rustc_hash::FxHashMap<String, Vec<f64>> {
        self.table.average_strategies()
    }
}

impl<G: Game> Strategy<G> for ApproxBestResponse<G> {
    /// The average strategy accumulated after warm-up; uniform at
    /// information sets never visited in training.
    fn policy(&self, game: &G, state: &G::State) -> Vec<f64> {
        let key = game.info_state(state).key();
        let num_actions = game.available_actions(state).len();
        self.table.get_average_strategy(&key, num_actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::br::strategy::UniformStrategy;
    use crate::games::kuhn::KuhnPoker;
    use crate::games::matching_pennies::MatchingPennies;

    #[test]
    fn test_matching_pennies_value_against_uniform_is_zero() {
        // Against a uniform opponent every strategy has value exactly 0, so
        // the sampled estimate is pure sampling noise around 0.
        let game = MatchingPennies::new();
        let uniform = UniformStrategy;
        let profile = StrategyProfile::with_responder(0, &[&uniform]);
        let config = BrConfig::default().with_seed(42);

        let mut approx =
            ApproxBestResponse::compute(&game, 0, &profile, 4_000, &config).unwrap();
        let value = approx.sample_value(&profile, 10_000).unwrap();

        // Payoffs are +-1: standard error over 10k samples is 0.01
        assert!(value.abs() < 0.1, "sampled value {} should be near 0", value);
    }

    #[test]
    fn test_kuhn_converges_toward_exact_value() {
        // The exact best response of player 0 against the uniform opponent
        // is worth 0.5; the trained estimate should land nearby.
        let game = KuhnPoker::new();
        let uniform = UniformStrategy;
        let profile = StrategyProfile::with_responder(0, &[&uniform]);
        let config = BrConfig::default().with_seed(42);

        let mut approx =
            ApproxBestResponse::compute(&game, 0, &profile, 20_000, &config).unwrap();

        // All six of player 0's information sets get discovered
        assert_eq!(approx.num_info_sets(), 6);

        // Betting dominates with the Jack against a uniform opponent
        // (-0.5 for bet vs -1.0 for pass)
        let jack = approx.average_strategy("0:", 2);
        assert!(
            jack[1] > 0.6,
            "Jack bet probability {} should dominate",
            jack[1]
        );

        let value = approx.sample_value(&profile, 10_000).unwrap();
        assert!(
            value > 0.3 && value < 0.65,
            "sampled value {} should approach 0.5",
            value
        );
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let game = KuhnPoker::new();
        let uniform = UniformStrategy;
        let profile = StrategyProfile::with_responder(1, &[&uniform]);
        let config = BrConfig::default().with_seed(7);

        let mut a = ApproxBestResponse::compute(&game, 1, &profile, 2_000, &config).unwrap();
        let mut b = ApproxBestResponse::compute(&game, 1, &profile, 2_000, &config).unwrap();

        assert_eq!(a.num_info_sets(), b.num_info_sets());
        assert_eq!(
            a.average_strategy("0:b", 2),
            b.average_strategy("0:b", 2)
        );
        assert_eq!(
            a.sample_value(&profile, 1_000).unwrap(),
            b.sample_value(&profile, 1_000).unwrap()
        );
    }
}
