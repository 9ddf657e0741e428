//! Game implementations for the best-response solvers.
//!
//! This module contains implementations of small games used to validate the
//! solvers. These serve as:
//!
//! 1. **Validation**: Games with known best-response values (like Kuhn Poker
//!    and Matching Pennies) verify that the computation is correct.
//!
//! 2. **Examples**: Demonstrate how to implement the `Game` trait for new
//!    games, including explicit chance nodes and shared information sets.
//!
//! 3. **Benchmarks**: Provide standardized games for performance testing.
//!
//! ## Available Games
//!
//! - [`kuhn`]: Kuhn Poker - A simplified 3-card poker game with known values
//! - [`matching_pennies`]: Matching Pennies - the smallest game where one
//!   information set aggregates multiple states
//!
//! ## Adding New Games
//!
//! To add a new game:
//!
//! 1. Create a new module under `src/games/`
//! 2. Define state, action, and info state types
//! 3. Implement the `Game` trait
//! 4. Add tests that verify expected behavior
//!
//! See the [`kuhn`] module for a complete example.

pub mod kuhn;
pub mod matching_pennies;
