//! Exact best response by full game-tree traversal.
//!
//! The computation runs in two interleaved passes:
//!
//! 1. **Forward walk**: a depth-first traversal from a state down to either a
//!    terminal payoff or a decision point of the responding player. Reach
//!    probability is multiplied through chance nodes and the opponents' fixed
//!    policies; responding-player states are grouped by information-set key
//!    instead of being evaluated.
//! 2. **Bottom-up solve**: each discovered information set evaluates every
//!    legal action by re-walking all of its contributing states, recursively
//!    solving the deeper information sets found under that action, then keeps
//!    the value-maximizing actions.
//!
//! The traversal may be very computationally demanding as it enumerates the
//! whole tree; a shared node budget bounds total work and fails the
//! computation with [`BrError::LimitExceeded`] when the game is too large.

use std::time::Instant;

use rustc_hash::FxHashMap;

use crate::br::config::{BrConfig, BrStats};
use crate::br::error::BrError;
use crate::br::game::{Game, InfoState};
use crate::br::strategy::{Strategy, StrategyProfile};

/// One contributing path into an information set.
///
/// The state is a decision point of the responding player; the probability is
/// the chance that chance nodes and the opponents' fixed policies realize the
/// path from the root (or from the parent information set's action) to it.
#[derive(Debug, Clone)]
pub struct ReachItem<S> {
    /// The responding player's decision state.
    pub state: S,
    /// Reach probability of the path into this state, in [0, 1].
    pub probability: f64,
}

/// Information-set groups discovered during one walk: key -> contributing
/// states. Insertion order is irrelevant, multiplicity is meaningful.
type SupportMap<S> = FxHashMap<String, Vec<ReachItem<S>>>;

/// A full best-response policy: information-set key -> action distribution.
///
/// Distributions are aligned index-for-index with the information set's legal
/// actions and are uniform over the value-maximizing actions, zero elsewhere.
pub type PolicyMap = FxHashMap<String, Vec<f64>>;

/// Traversal context threaded through every recursive call.
///
/// The node counter is shared across the entire computation (root walk and
/// every per-action re-walk), so the budget bounds total work, not path
/// length.
struct Traversal<'a, G: Game> {
    game: &'a G,
    player: usize,
    profile: &'a StrategyProfile<'a, G>,
    max_nodes: u64,
    tie_epsilon: f64,
    nodes: u64,
}

impl<'a, G: Game> Traversal<'a, G> {
    /// Walk from `state` down to terminal payoffs or responding-player
    /// decision points, appending the latter to `supports`.
    ///
    /// Returns the reach-weighted terminal value collected below `state`;
    /// value at aggregated decision points is deferred to `solve`.
    fn walk(
        &mut self,
        state: G::State,
        probability: f64,
        supports: &mut SupportMap<G::State>,
    ) -> Result<f64, BrError> {
        // A zero-probability branch cannot contribute value; skip it before
        // touching the state, which may be arbitrarily deep or malformed.
        if probability == 0.0 {
            return Ok(0.0);
        }

        self.nodes += 1;
        if self.nodes > self.max_nodes {
            return Err(BrError::LimitExceeded {
                limit: self.max_nodes,
            });
        }

        if self.game.is_terminal(&state) {
            return Ok(self.game.get_payoff(&state, self.player) * probability);
        }

        if self.game.is_chance(&state) {
            let mut value = 0.0;
            for (action, prob) in self.game.chance_outcomes(&state) {
                let next = self.game.apply_action(&state, &action);
                value += self.walk(next, probability * prob, supports)?;
            }
            return Ok(value);
        }

        let acting = match self.game.current_player(&state) {
            Some(p) => p,
            None => return Ok(self.game.get_payoff(&state, self.player) * probability),
        };

        if acting == self.player {
            let key = self.game.info_state(&state).key();
            supports
                .entry(key)
                .or_default()
                .push(ReachItem { state, probability });
            return Ok(0.0);
        }

        let strategy = match self.profile.fixed(acting) {
            Some(s) => s,
            None => {
                return Err(BrError::InvalidPlayer {
                    player: acting,
                    num_players: self.game.num_players(),
                })
            }
        };

        let actions = self.game.available_actions(&state);
        let dist = strategy.policy(self.game, &state);
        debug_assert_eq!(
            actions.len(),
            dist.len(),
            "policy length does not match the legal action set"
        );

        let mut value = 0.0;
        for (action, prob) in actions.iter().zip(dist) {
            let next = self.game.apply_action(&state, action);
            value += self.walk(next, probability * prob, supports)?;
        }
        Ok(value)
    }

    /// Solve one information set bottom-up.
    ///
    /// Evaluates every legal action over all contributing states, recursively
    /// solving the deeper information sets reached under that action, then
    /// assigns uniform probability over the value-maximizing actions.
    fn solve(
        &mut self,
        info_key: &str,
        items: &[ReachItem<G::State>],
    ) -> Result<(f64, PolicyMap), BrError> {
        // Legal actions must be identical across every state grouped under
        // one key; anything else is a broken InfoState mapping.
        let actions = self.game.available_actions(&items[0].state);
        debug_assert!(!actions.is_empty(), "decision state with no legal actions");
        for item in &items[1..] {
            if self.game.available_actions(&item.state) != actions {
                return Err(BrError::InconsistentInfoSet {
                    info_key: info_key.to_string(),
                });
            }
        }

        let mut values = Vec::with_capacity(actions.len());
        let mut branch_policies = Vec::with_capacity(actions.len());

        for action in &actions {
            let mut deeper: SupportMap<G::State> = FxHashMap::default();
            let mut value = 0.0;
            let mut branch_policy = PolicyMap::default();

            for item in items {
                let next = self.game.apply_action(&item.state, action);
                value += self.walk(next, item.probability, &mut deeper)?;
            }

            for (key, support) in &deeper {
                let (v, sub) = self.solve(key, support)?;
                value += v;
                branch_policy.extend(sub);
            }

            values.push(value);
            branch_policies.push(branch_policy);
        }

        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // An action is best when its value is within the configured relative
        // tolerance of the maximum; the policy is uniform over best actions.
        let threshold = max - self.tie_epsilon * max.abs();
        let best: Vec<bool> = values.iter().map(|&v| v >= threshold).collect();
        let num_best = best.iter().filter(|&&b| b).count();

        let mut policy = PolicyMap::default();
        policy.insert(
            info_key.to_string(),
            best.iter()
                .map(|&b| if b { 1.0 / num_best as f64 } else { 0.0 })
                .collect(),
        );

        // Sub-policies of non-best actions are discarded: those branches are
        // never taken under the best response.
        for (branch, is_best) in branch_policies.into_iter().zip(best) {
            if is_best {
                policy.extend(branch);
            }
        }

        Ok((max, policy))
    }
}

/// An exact best response: the maximal-value strategy for one player against
/// fixed opponents, with its expected value.
///
/// # Example
/// ```ignore
/// let uniform = UniformStrategy;
/// let profile = StrategyProfile::with_responder(0, &[&uniform]);
/// let br = BestResponse::compute(&game, 0, &profile, &BrConfig::default())?;
/// println!("value {} over {} info sets", br.value(), br.policy_map().len());
/// ```
#[derive(Debug, Clone)]
pub struct BestResponse {
    player: usize,
    value: f64,
    policy: PolicyMap,
    stats: BrStats,
}

impl BestResponse {
    /// Compute the exact best response for `player` against the fixed
    /// strategies in `profile`.
    ///
    /// # Arguments
    /// * `game` - The game to analyze
    /// * `player` - The responding player index
    /// * `profile` - One seat per player; the seat at `player` must be
    ///   [`Seat::Responding`](crate::br::Seat)
    /// * `config` - Node budget and tie-break tolerance
    ///
    /// # Errors
    /// Precondition violations are reported before any traversal work;
    /// [`BrError::LimitExceeded`] is reported as soon as the node budget is
    /// crossed.
    pub fn compute<G: Game>(
        game: &G,
        player: usize,
        profile: &StrategyProfile<'_, G>,
        config: &BrConfig,
    ) -> Result<Self, BrError> {
        config.validate()?;
        profile.check(game, player)?;

        let start_time = Instant::now();
        let mut traversal = Traversal {
            game,
            player,
            profile,
            max_nodes: config.max_nodes,
            tie_epsilon: config.tie_epsilon,
            nodes: 0,
        };

        let mut supports = SupportMap::default();
        let mut value = traversal.walk(game.initial_state(), 1.0, &mut supports)?;

        let mut policy = PolicyMap::default();
        for (key, items) in &supports {
            let (v, sub) = traversal.solve(key, items)?;
            value += v;
            policy.extend(sub);
        }

        let stats = BrStats {
            nodes_visited: traversal.nodes,
            info_sets: policy.len(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        };

        Ok(Self {
            player,
            value,
            policy,
            stats,
        })
    }

    /// The responding player this best response was computed for.
    pub fn player(&self) -> usize {
        self.player
    }

    /// Expected payoff to the responding player under the best response.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The full best-response policy over every information set visited.
    pub fn policy_map(&self) -> &PolicyMap {
        &self.policy
    }

    /// The action distribution at one information set, if it was visited.
    pub fn policy_for(&self, info_key: &str) -> Option<&Vec<f64>> {
        self.policy.get(info_key)
    }

    /// Statistics from the computation.
    pub fn stats(&self) -> &BrStats {
        &self.stats
    }
}

impl<G: Game> Strategy<G> for BestResponse {
    /// Look up the best-response distribution for the state's information
    /// set. Information sets never reached under the best response fall back
    /// to uniform.
    fn policy(&self, game: &G, state: &G::State) -> Vec<f64> {
        let key = game.info_state(state).key();
        match self.policy.get(&key) {
            Some(probs) => probs.clone(),
            None => {
                let n = game.available_actions(state).len();
                vec![1.0 / n as f64; n]
            }
        }
    }
}
