//! Grouping and aggregation primitives.
//!
//! The grouped evaluation strategy is built on one hash-based group-by,
//! implemented here and reused by every statistic: rows are folded into a
//! per-key accumulator, producing a mapping from grouping key to aggregate.
//! [`top_n`] ranks such a mapping by its aggregate value.

use std::{cmp::Ordering, collections::HashMap, hash::Hash};

/// Folds rows into per-key accumulators.
///
/// `key` extracts the grouping key for a row, `init` creates a fresh
/// accumulator for a key's first row, and `step` folds a row into its
/// group's accumulator.
///
/// # Example
///
/// ```
/// use resenha::aggregate::group_by;
///
/// let words = ["ab", "cd", "ef"];
/// let lengths = group_by(words, |w| w.len(), || 0u64, |n, _| *n += 1);
/// assert_eq!(lengths[&2], 3);
/// ```
pub fn group_by<R, K, A>(
    rows: impl IntoIterator<Item = R>,
    mut key: impl FnMut(&R) -> K,
    mut init: impl FnMut() -> A,
    mut step: impl FnMut(&mut A, R),
) -> HashMap<K, A>
where
    K: Eq + Hash,
{
    let mut groups: HashMap<K, A> = HashMap::new();
    for row in rows {
        let group = groups.entry(key(&row)).or_insert_with(&mut init);
        step(group, row);
    }
    groups
}

/// Counts rows per grouping key.
pub fn group_count<R, K>(
    rows: impl IntoIterator<Item = R>,
    key: impl FnMut(&R) -> K,
) -> HashMap<K, u64>
where
    K: Eq + Hash,
{
    group_by(rows, key, || 0u64, |count, _| *count += 1)
}

/// Running sum and count for a mean aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanState {
    sum: f64,
    count: u64,
}

impl MeanState {
    /// Folds one value into the running state.
    pub fn update(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Number of values folded in so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Finalizes the mean. `None` when no values were folded in.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Computes a per-key mean of `value` over the rows.
pub fn group_mean<R, K>(
    rows: impl IntoIterator<Item = R>,
    key: impl FnMut(&R) -> K,
    mut value: impl FnMut(&R) -> f64,
) -> HashMap<K, MeanState>
where
    K: Eq + Hash,
{
    group_by(rows, key, MeanState::default, |state, row| {
        state.update(value(&row));
    })
}

/// Bulk column-mean over an iterator of values.
///
/// Returns `None` on empty input rather than dividing by zero.
pub fn column_mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut state = MeanState::default();
    for value in values {
        state.update(value);
    }
    state.mean()
}

/// Ranks a mapping by its aggregate value, descending, keeping the top `n`.
///
/// Ties are broken by ascending key so that both evaluation strategies
/// select the same top-`n` set no matter what order the hash map yields.
pub fn top_n<K, V>(map: HashMap<K, V>, n: usize) -> Vec<(K, V)>
where
    K: Ord,
    V: PartialOrd + Copy,
{
    let mut ranked: Vec<(K, V)> = map.into_iter().collect();
    ranked.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(n);
    ranked
}
