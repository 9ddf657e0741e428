//! Configuration options for best-response computation.
//!
//! This module provides the configuration struct shared by the exact and
//! approximate paths, along with the statistics reported by a solve.

use serde::{Deserialize, Serialize};

/// Configuration for best-response computation.
///
/// This struct controls both paths:
/// - The exact path reads `max_nodes` and `tie_epsilon`
/// - The approximate path reads `exploration`, `warmup_fraction`,
///   `use_cfr_plus`, `value_samples`, and `seed`
///
/// # Example
/// ```
/// use br_solver::br::BrConfig;
///
/// let config = BrConfig::default().with_max_nodes(10_000);
/// assert_eq!(config.tie_epsilon, 0.0); // exact equality by default
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrConfig {
    /// Node budget for the exact traversal.
    ///
    /// The budget bounds the total number of nodes visited across the whole
    /// computation, not per branch. Exceeding it fails the computation with
    /// `BrError::LimitExceeded`; games past this size should use the
    /// approximate path instead.
    pub max_nodes: u64,

    /// Tie-break tolerance for co-optimal actions, relative to the maximum.
    ///
    /// An action counts as best when its value is within
    /// `tie_epsilon * |max|` of the maximum action value at its information
    /// set; the best-response policy is uniform over all such actions. This
    /// is a deliberate equilibrium-selection policy, not a numerical
    /// artifact. The default of 0.0 means exact equality; a small positive
    /// value absorbs floating-point noise.
    pub tie_epsilon: f64,

    /// Exploration probability when sampling opponent actions.
    ///
    /// With this probability the approximate trainer picks a uniformly random
    /// opponent action instead of sampling from the opponent's policy.
    pub exploration: f64,

    /// Fraction of training iterations discarded as warm-up.
    ///
    /// Strategy averaging only starts once this fraction of the requested
    /// iterations has run, so the early, noisy strategies do not pollute the
    /// converged average.
    pub warmup_fraction: f64,

    /// Floor negative regrets to zero during training (CFR+ style).
    pub use_cfr_plus: bool,

    /// Number of sampled plays used to estimate the approximate value.
    ///
    /// `None` uses half the training iterations.
    pub value_samples: Option<usize>,

    /// Random seed for reproducibility of the approximate path.
    ///
    /// If `None`, a random seed is used. The exact path has no randomness.
    pub seed: Option<u64>,
}

impl Default for BrConfig {
    fn default() -> Self {
        Self {
            max_nodes: 1_000_000,
            tie_epsilon: 0.0,
            exploration: 0.0,
            warmup_fraction: 0.5,
            use_cfr_plus: true,
            value_samples: None,
            seed: None,
        }
    }
}

impl BrConfig {
    /// Create a new BrConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the node budget for the exact traversal.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Builder method: set the tie-break tolerance.
    pub fn with_tie_epsilon(mut self, epsilon: f64) -> Self {
        self.tie_epsilon = epsilon;
        self
    }

    /// Builder method: set exploration probability.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration.clamp(0.0, 1.0);
        self
    }

    /// Builder method: set the warm-up fraction.
    pub fn with_warmup_fraction(mut self, fraction: f64) -> Self {
        self.warmup_fraction = fraction;
        self
    }

    /// Builder method: set the value sample count.
    pub fn with_value_samples(mut self, samples: usize) -> Self {
        self.value_samples = Some(samples);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nodes == 0 {
            return Err(ConfigError::ZeroNodeBudget);
        }

        if !(self.tie_epsilon >= 0.0 && self.tie_epsilon.is_finite()) {
            return Err(ConfigError::InvalidTieEpsilon(self.tie_epsilon));
        }

        if self.exploration < 0.0 || self.exploration > 1.0 {
            return Err(ConfigError::InvalidFraction("exploration", self.exploration));
        }

        if self.warmup_fraction < 0.0 || self.warmup_fraction > 1.0 {
            return Err(ConfigError::InvalidFraction(
                "warmup_fraction",
                self.warmup_fraction,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur when validating a best-response configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The node budget is zero.
    ZeroNodeBudget,
    /// The tie-break tolerance is negative or not finite.
    InvalidTieEpsilon(f64),
    /// A fraction-valued field is out of range [0, 1].
    InvalidFraction(&'static str, f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroNodeBudget => {
                write!(f, "node budget must be at least 1")
            }
            ConfigError::InvalidTieEpsilon(val) => {
                write!(f, "tie epsilon {} must be finite and non-negative", val)
            }
            ConfigError::InvalidFraction(name, val) => {
                write!(f, "{} {} is out of range [0, 1]", name, val)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics from a best-response computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrStats {
    /// Number of game-tree nodes visited by the traversal.
    pub nodes_visited: u64,

    /// Number of unique information sets solved.
    pub info_sets: usize,

    /// Total time spent (in seconds).
    pub elapsed_seconds: f64,
}

impl BrStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }
}
