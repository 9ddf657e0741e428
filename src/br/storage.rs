//! Storage for the trainable responding seat.
//!
//! This module holds cumulative regrets and strategy sums for the
//! regret-minimizing strategy used by the approximate best response.

use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// Regret and strategy-sum storage keyed by information set.
///
/// Interior mutability with `RwLock` lets the trainable strategy serve policy
/// reads through `&self` while the trainer drives updates. The approximate
/// path is single-threaded, so the locks are never contended.
#[derive(Debug)]
pub struct RegretTable {
    /// Cumulative regrets: info_key -> [regret per action]
    regrets: RwLock<FxHashMap<String, Vec<f64>>>,

    /// Cumulative strategy sums: info_key -> [strategy weight per action]
    strategy_sums: RwLock<FxHashMap<String, Vec<f64>>>,

    /// Action counts for each info set (to verify consistency)
    action_counts: RwLock<FxHashMap<String, usize>>,
}

impl Default for RegretTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegretTable {
    /// Create new empty storage.
    pub fn new() -> Self {
        Self {
            regrets: RwLock::new(FxHashMap::default()),
            strategy_sums: RwLock::new(FxHashMap::default()),
            action_counts: RwLock::new(FxHashMap::default()),
        }
    }

    /// Get the current strategy for an info set using regret matching.
    ///
    /// The strategy is proportional to positive regrets. If all regrets are
    /// non-positive, returns a uniform strategy.
    pub fn get_current_strategy(&self, info_key: &str, num_actions: usize) -> Vec<f64> {
        let regrets = self.regrets.read().unwrap();

        match regrets.get(info_key) {
            Some(r) => {
                let positive: Vec<f64> = r.iter().map(|&x| x.max(0.0)).collect();
                let sum: f64 = positive.iter().sum();

                if sum > 0.0 {
                    positive.iter().map(|&x| x / sum).collect()
                } else {
                    vec![1.0 / num_actions as f64; num_actions]
                }
            }
            None => vec![1.0 / num_actions as f64; num_actions],
        }
    }

    /// Get the average strategy for an info set.
    ///
    /// The average strategy is computed from cumulative strategy sums and is
    /// uniform for information sets that never accumulated weight.
    pub fn get_average_strategy(&self, info_key: &str, num_actions: usize) -> Vec<f64> {
        let strategy_sums = self.strategy_sums.read().unwrap();

        match strategy_sums.get(info_key) {
            Some(sums) => {
                let total: f64 = sums.iter().sum();
                if total > 0.0 {
                    sums.iter().map(|&x| x / total).collect()
                } else {
                    vec![1.0 / num_actions as f64; num_actions]
                }
            }
            None => vec![1.0 / num_actions as f64; num_actions],
        }
    }

    /// Update regrets for an info set.
    ///
    /// # Arguments
    /// * `info_key` - The information set key
    /// * `regret_updates` - Regret delta for each action (action_value - node_value)
    /// * `use_cfr_plus` - If true, floor negative regrets to 0
    pub fn update_regrets(&self, info_key: &str, regret_updates: &[f64], use_cfr_plus: bool) {
        let mut regrets = self.regrets.write().unwrap();
        let mut action_counts = self.action_counts.write().unwrap();

        let num_actions = regret_updates.len();

        let entry = regrets
            .entry(info_key.to_string())
            .or_insert_with(|| vec![0.0; num_actions]);

        if let Some(&stored_count) = action_counts.get(info_key) {
            debug_assert_eq!(
                stored_count, num_actions,
                "Action count mismatch for info set {}",
                info_key
            );
        } else {
            action_counts.insert(info_key.to_string(), num_actions);
        }

        for (i, &update) in regret_updates.iter().enumerate() {
            entry[i] += update;

            if use_cfr_plus && entry[i] < 0.0 {
                entry[i] = 0.0;
            }
        }
    }

    /// Update the strategy sum for an info set.
    ///
    /// # Arguments
    /// * `info_key` - The information set key
    /// * `strategy` - Current strategy for each action
    /// * `weight` - Weight to apply (typically the player's reach probability)
    pub fn update_strategy_sum(&self, info_key: &str, strategy: &[f64], weight: f64) {
        let mut strategy_sums = self.strategy_sums.write().unwrap();

        let num_actions = strategy.len();

        let entry = strategy_sums
            .entry(info_key.to_string())
            .or_insert_with(|| vec![0.0; num_actions]);

        for (i, &prob) in strategy.iter().enumerate() {
            entry[i] += prob * weight;
        }
    }

    /// Get the number of information sets stored.
    pub fn num_info_sets(&self) -> usize {
        self.regrets.read().unwrap().len()
    }

    /// Snapshot the average strategy of every stored information set.
    pub fn average_strategies(&self) -> FxHashMap<String, Vec<f64>> {
        let strategy_sums = self.strategy_sums.read().unwrap();
        let action_counts = self.action_counts.read().unwrap();

        let mut strategies = FxHashMap::default();
        for (key, sums) in strategy_sums.iter() {
            let num_actions = action_counts.get(key).copied().unwrap_or(sums.len());
            let total: f64 = sums.iter().sum();

            let avg = if total > 0.0 {
                sums.iter().map(|&x| x / total).collect()
            } else {
                vec![1.0 / num_actions as f64; num_actions]
            };
            strategies.insert(key.clone(), avg);
        }
        strategies
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.regrets.write().unwrap().clear();
        self.strategy_sums.write().unwrap().clear();
        self.action_counts.write().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_info_set_is_uniform() {
        let table = RegretTable::new();
        assert_eq!(table.get_current_strategy("x", 4), vec![0.25; 4]);
        assert_eq!(table.get_average_strategy("x", 2), vec![0.5, 0.5]);
        assert_eq!(table.num_info_sets(), 0);
    }

    #[test]
    fn test_regret_matching_proportional_to_positive_regret() {
        let table = RegretTable::new();
        table.update_regrets("k", &[3.0, 1.0, -2.0], false);

        let strategy = table.get_current_strategy("k", 3);
        assert!((strategy[0] - 0.75).abs() < 1e-12);
        assert!((strategy[1] - 0.25).abs() < 1e-12);
        assert_eq!(strategy[2], 0.0);
    }

    #[test]
    fn test_cfr_plus_floors_negative_regret() {
        let table = RegretTable::new();
        table.update_regrets("k", &[-1.0, 2.0], true);
        table.update_regrets("k", &[0.5, 0.0], true);

        // The floored first entry restarts from zero
        let strategy = table.get_current_strategy("k", 2);
        assert!((strategy[0] - 0.2).abs() < 1e-12);
        assert!((strategy[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_average_strategy_normalizes_weighted_sums() {
        let table = RegretTable::new();
        table.update_strategy_sum("k", &[1.0, 0.0], 1.0);
        table.update_strategy_sum("k", &[0.0, 1.0], 3.0);

        let avg = table.get_average_strategy("k", 2);
        assert!((avg[0] - 0.25).abs() < 1e-12);
        assert!((avg[1] - 0.75).abs() < 1e-12);
    }
}
