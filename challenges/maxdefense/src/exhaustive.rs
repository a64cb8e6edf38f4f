use std::sync::Arc;

use log::debug;

use crate::armor::{aggregate, ArmorItem, Solution};

/// Largest catalog the exhaustive search accepts. Subsets are enumerated as bits of a `u64` mask.
pub const MAX_EXHAUSTIVE_ITEMS: usize = 63;

/// Compute the optimal set of armor items within a `budget` of gold by trying every subset.
///
/// Runs in O(2^N x N) time. Among subsets with equal defense the first one enumerated wins, and
/// the items of the result are in catalog order.
///
/// # Panics
///
/// If the catalog has more than [`MAX_EXHAUSTIVE_ITEMS`] items, or the budget is NaN. Callers
/// filter the catalog first.
pub fn exhaustive_max_defense(armors: &[Arc<ArmorItem>], budget: f64) -> Solution {
    let n = armors.len();
    assert!(
        n <= MAX_EXHAUSTIVE_ITEMS,
        "exhaustive search needs fewer than 64 armor items, got {}",
        n
    );
    assert!(!budget.is_nan(), "exhaustive search needs a budget, got NaN");

    let subsets: u64 = 1 << n;
    debug!("enumerating {} subsets of {} armor items", subsets, n);

    let mut best: Option<(u64, f64)> = None;
    let mut candidate = Vec::with_capacity(n);

    for mask in 0..subsets {
        candidate.clear();
        candidate.extend(subset(armors, mask).cloned());

        let (cost, defense) = aggregate(&candidate);
        if cost as f64 > budget {
            continue;
        }
        // strictly greater, so an equal subset found later never replaces the current best.
        if best.is_none_or(|(_, best_defense)| defense > best_defense) {
            best = Some((mask, defense));
        }
    }

    match best {
        Some((mask, _)) => Solution::new(subset(armors, mask).cloned().collect()),
        // only possible with a negative budget, where not even the empty subset fits.
        None => Solution::empty(),
    }
}

// item `j` belongs to the subset when bit `j` of the mask is set.
fn subset(armors: &[Arc<ArmorItem>], mask: u64) -> impl Iterator<Item = &Arc<ArmorItem>> {
    armors
        .iter()
        .enumerate()
        .filter(move |&(j, _)| (mask >> j) & 1 == 1)
        .map(|(_, armor)| armor)
}
