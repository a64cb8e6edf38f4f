use std::sync::Arc;

/// One armor item available for purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmorItem {
    // Human-readable description, e.g. "new enchanted helmet". Never empty.
    description: String,
    // Units of gold, always positive.
    cost: usize,
    // Expected to be non-negative; the solvers tolerate zero and negative values.
    defense: f64,
}

impl ArmorItem {
    pub fn new(description: impl Into<String>, cost: usize, defense: f64) -> Self {
        let description = description.into();
        assert!(!description.is_empty(), "armor description must not be empty");
        assert!(cost > 0, "armor cost must be positive");
        Self {
            description,
            cost,
            defense,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> usize {
        self.cost
    }

    pub fn defense(&self) -> f64 {
        self.defense
    }
}

/// Armor items shared between a catalog and the solutions selected from it.
pub type ArmorVector = Vec<Arc<ArmorItem>>;

/// Total gold cost and total defense of a selection of armor items.
pub fn aggregate(armors: &[Arc<ArmorItem>]) -> (usize, f64) {
    armors.iter().fold((0, 0.0), |(cost, defense), armor| {
        (cost + armor.cost(), defense + armor.defense())
    })
}

/// A selection of armor items together with its aggregate cost and defense.
#[derive(Debug, Clone, Default)]
pub struct Solution {
    items: ArmorVector,
    total_cost: usize,
    total_defense: f64,
}

impl Solution {
    pub fn new(items: ArmorVector) -> Self {
        let (total_cost, total_defense) = aggregate(&items);
        Self {
            items,
            total_cost,
            total_defense,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Arc<ArmorItem>] {
        &self.items
    }

    pub fn into_items(self) -> ArmorVector {
        self.items
    }

    pub fn total_cost(&self) -> usize {
        self.total_cost
    }

    pub fn total_defense(&self) -> f64 {
        self.total_defense
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armors(entries: &[(&str, usize, f64)]) -> ArmorVector {
        entries
            .iter()
            .map(|&(d, c, v)| Arc::new(ArmorItem::new(d, c, v)))
            .collect()
    }

    #[test]
    fn test_aggregate() {
        assert_eq!(aggregate(&[]), (0, 0.0));

        let items = armors(&[("helmet", 2, 3.5), ("boots", 3, 4.0), ("gloves", 4, 0.0)]);
        assert_eq!(aggregate(&items), (9, 7.5));
    }

    #[test]
    fn test_solution_shares_items() {
        let catalog = armors(&[("helmet", 2, 3.0), ("boots", 3, 4.0)]);
        let solution = Solution::new(vec![catalog[1].clone()]);

        assert_eq!(solution.len(), 1);
        assert_eq!(solution.total_cost(), 3);
        assert_eq!(solution.total_defense(), 4.0);
        // the solution points at the catalog's record, it does not own a copy
        assert!(Arc::ptr_eq(&solution.items()[0], &catalog[1]));
    }

    #[test]
    fn test_empty_solution() {
        let solution = Solution::empty();
        assert!(solution.is_empty());
        assert_eq!(solution.total_cost(), 0);
        assert_eq!(solution.total_defense(), 0.0);
    }

    #[test]
    #[should_panic(expected = "armor cost must be positive")]
    fn test_zero_cost_rejected() {
        ArmorItem::new("cursed ring", 0, 1.0);
    }

    #[test]
    #[should_panic(expected = "armor description must not be empty")]
    fn test_empty_description_rejected() {
        ArmorItem::new("", 1, 1.0);
    }
}
