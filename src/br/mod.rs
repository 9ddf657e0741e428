//! Best-response computation for extensive-form games.
//!
//! This module answers one question: given a game and fixed strategies for
//! the opponents, what is the maximal-value strategy for one player, and how
//! much is it worth? That value, computed for the opponent of a strategy
//! under test, is the strategy's *exploitability* — a distance-from-Nash
//! measure for two-player zero-sum games.
//!
//! # Overview
//!
//! The exact path works in two passes over the game tree:
//!
//! 1. A forward walk accumulates reach probabilities through chance nodes and
//!    the opponents' fixed policies, grouping the responding player's
//!    decision states by information set.
//! 2. A bottom-up solve evaluates every legal action of every information
//!    set, re-walking successor states and recursing into deeper information
//!    sets, then plays uniformly over the value-maximizing actions.
//!
//! The walk enumerates the whole tree, so a configurable node budget guards
//! against combinatorial blowup; past the budget, the computation fails with
//! [`BrError::LimitExceeded`] and the sampling-based approximate path takes
//! over.
//!
//! # Usage
//!
//! 1. Implement the [`Game`] trait for your game
//! 2. Build a [`StrategyProfile`] fixing every opponent's strategy
//! 3. Call [`BestResponse::compute`] (exact) or
//!    [`ApproxBestResponse::compute`] (sampled), or go straight to
//!    [`exploitability`] / [`approx_exploitability`]
//!
//! # Example
//!
//! ```ignore
//! use br_solver::br::{exploitability, BrConfig, UniformStrategy};
//!
//! let epsilon = exploitability(&game, 0, &UniformStrategy, &BrConfig::default())?;
//! println!("uniform play gives up {} per game", epsilon);
//! ```

pub mod approx;
pub mod config;
pub mod error;
pub mod exact;
pub mod exploit;
pub mod game;
pub mod sampling;
pub mod storage;
pub mod strategy;

// Re-export main types for convenient access
pub use approx::ApproxBestResponse;
pub use config::{BrConfig, BrStats, ConfigError};
pub use error::BrError;
pub use exact::{BestResponse, PolicyMap, ReachItem};
pub use exploit::{approx_exploitability, exploitability};
pub use game::{Action, Game, GameState, InfoState};
pub use sampling::sample_payoff;
pub use storage::RegretTable;
pub use strategy::{Seat, Strategy, StrategyProfile, TabularStrategy, UniformStrategy};
