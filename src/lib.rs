//! # BR Solver
//!
//! Exact and approximate best-response computation for extensive-form games,
//! plus the exploitability measure built on top of it.
//!
//! ## Features
//!
//! - **Generic Game Interface**: Works with any game implementing the `Game` trait
//! - **Exact Best Response**: Full tree traversal with information-set grouping
//!   and a configurable node budget
//! - **Approximate Best Response**: Outcome-sampling regret minimization for
//!   games too large to enumerate
//! - **Exploitability**: Distance-from-equilibrium measure for two-player
//!   zero-sum games
//!
//! ## Quick Start
//!
//! ```ignore
//! use br_solver::{BestResponse, BrConfig, StrategyProfile, UniformStrategy};
//!
//! // 1. Implement the Game trait for your game
//! // 2. Fix the opponents' strategies and pick the responding player
//! let uniform = UniformStrategy;
//! let profile = StrategyProfile::with_responder(0, &[&uniform]);
//!
//! // 3. Compute the best response
//! let br = BestResponse::compute(&my_game, 0, &profile, &BrConfig::default())?;
//! println!("value = {}", br.value());
//! ```
//!
//! ## Modules
//!
//! - [`br`]: Best-response computation, strategies, and exploitability
//! - [`games`]: Example game implementations (Kuhn Poker, Matching Pennies)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Exploitability (two-player zero-sum)            │
//! └───────────────┬─────────────────────────────────┬───────────────┘
//!                 │                                 │
//!                 ▼                                 ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────────┐
//! │   BestResponse (exact)        │ │   ApproxBestResponse          │
//! │   - forward tree walk         │ │   - outcome-sampling regret   │
//! │   - info-set aggregation      │ │     minimization              │
//! │   - bottom-up action solve    │ │   - Monte Carlo value         │
//! └───────────────┬───────────────┘ └───────────────┬───────────────┘
//!                 │        implements Game trait    │
//!                 ▼                                 ▼
//!          ┌─────────┐          ┌──────────────────┐
//!          │  Kuhn   │          │ Matching Pennies │
//!          │  Poker  │          │                  │
//!          └─────────┘          └──────────────────┘
//! ```

#![warn(missing_docs)]

/// Best-response module.
///
/// This is the core module containing the exact tree-walking best response,
/// the sampling-based approximate best response, and exploitability.
pub mod br;

/// Game implementations module.
///
/// Contains example games like Kuhn Poker for testing and validation.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use br::{
    approx_exploitability, exploitability, sample_payoff, Action, ApproxBestResponse,
    BestResponse, BrConfig, BrError, BrStats, Game, GameState, InfoState, Seat, Strategy,
    StrategyProfile, TabularStrategy, UniformStrategy,
};
