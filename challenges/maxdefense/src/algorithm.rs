use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;

use crate::armor::{ArmorItem, Solution};
use crate::dynamic::dynamic_max_defense;
use crate::exhaustive::{exhaustive_max_defense, MAX_EXHAUSTIVE_ITEMS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Dynamic programming over a cost indexed table
    Dynamic,
    /// Exhaustive search over every subset, fewer than 64 items only
    Exhaustive,
}

impl Algorithm {
    /// Refuse catalogs the algorithm cannot take, before they reach the solver.
    pub fn check(&self, armors: &[Arc<ArmorItem>]) -> std::io::Result<()> {
        match self {
            Algorithm::Exhaustive if armors.len() > MAX_EXHAUSTIVE_ITEMS => {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "exhaustive search takes at most {} armor items, got {}",
                        MAX_EXHAUSTIVE_ITEMS,
                        armors.len()
                    ),
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn solve(&self, armors: &[Arc<ArmorItem>], budget: usize) -> Solution {
        match self {
            Algorithm::Dynamic => dynamic_max_defense(armors, budget),
            Algorithm::Exhaustive => exhaustive_max_defense(armors, budget as f64),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dynamic => write!(f, "dynamic"),
            Algorithm::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::armor::ArmorVector;
    use crate::testing::approx_eq;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_catalog(rng: &mut SmallRng, n: usize) -> ArmorVector {
        (0..n)
            .map(|i| {
                let cost = rng.gen_range(1..=20);
                // a quarter of the items carry no defense at all
                let defense = if rng.gen_bool(0.25) {
                    0.0
                } else {
                    rng.gen_range(0.0..50.0)
                };
                Arc::new(ArmorItem::new(format!("armor {}", i), cost, defense))
            })
            .collect()
    }

    // every subset, checked independently of both solvers.
    fn brute_force_optimum(armors: &ArmorVector, budget: usize) -> f64 {
        let mut best = 0.0f64;
        for mask in 0u32..(1 << armors.len()) {
            let (mut cost, mut defense) = (0, 0.0);
            for (j, armor) in armors.iter().enumerate() {
                if mask & (1 << j) != 0 {
                    cost += armor.cost();
                    defense += armor.defense();
                }
            }
            if cost <= budget {
                best = best.max(defense);
            }
        }
        best
    }

    #[test]
    fn test_check() {
        let armors: ArmorVector = (0..64)
            .map(|i| Arc::new(ArmorItem::new(format!("armor {}", i), 1, 1.0)))
            .collect();
        assert!(Algorithm::Dynamic.check(&armors).is_ok());
        let err = Algorithm::Exhaustive.check(&armors).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(Algorithm::Exhaustive.check(&armors[..63]).is_ok());
    }

    #[test]
    fn test_algorithms_agree_on_random_catalogs() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for round in 0..200 {
            let n = rng.gen_range(0..=12);
            let armors = random_catalog(&mut rng, n);
            let budget = rng.gen_range(0..=60);

            let dynamic = Algorithm::Dynamic.solve(&armors, budget);
            let exhaustive = Algorithm::Exhaustive.solve(&armors, budget);
            let optimum = brute_force_optimum(&armors, budget);

            assert!(dynamic.total_cost() <= budget, "round {}", round);
            assert!(exhaustive.total_cost() <= budget, "round {}", round);
            assert!(
                approx_eq(dynamic.total_defense(), exhaustive.total_defense()),
                "round {}: dynamic {} exhaustive {}",
                round,
                dynamic.total_defense(),
                exhaustive.total_defense()
            );
            assert!(approx_eq(dynamic.total_defense(), optimum), "round {}", round);
        }
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut rng = SmallRng::seed_from_u64(7);
        let armors = random_catalog(&mut rng, 10);
        for algorithm in [Algorithm::Dynamic, Algorithm::Exhaustive] {
            let first = algorithm.solve(&armors, 40);
            let second = algorithm.solve(&armors, 40);
            assert_eq!(first.total_cost(), second.total_cost());
            assert_eq!(first.total_defense(), second.total_defense());
        }
    }

    #[test]
    fn test_budget_monotonicity() {
        let mut rng = SmallRng::seed_from_u64(11);
        let armors = random_catalog(&mut rng, 9);
        for algorithm in [Algorithm::Dynamic, Algorithm::Exhaustive] {
            let mut last = 0.0;
            for budget in 0..=80 {
                let defense = algorithm.solve(&armors, budget).total_defense();
                assert!(defense >= last || approx_eq(defense, last));
                last = defense;
            }
        }
    }
}
