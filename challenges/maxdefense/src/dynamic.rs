use std::sync::Arc;

use log::debug;

use crate::armor::{ArmorItem, ArmorVector, Solution};

/// Best achievable defense for every prefix of the catalog and every budget up to the total.
///
/// Row `i` covers the first `i` armor items, column `c` a budget of `c` gold, so the table is
/// `(N + 1) x (budget + 1)` and row 0 / column 0 are all zero.
#[derive(Debug, Clone)]
pub struct DefenseTable {
    cells: Vec<Vec<f64>>,
}

impl DefenseTable {
    pub fn build(armors: &[Arc<ArmorItem>], budget: usize) -> Self {
        debug!(
            "building {} x {} defense table",
            armors.len() + 1,
            budget + 1
        );

        let mut cells = Vec::with_capacity(armors.len() + 1);
        cells.push(vec![0.0; budget + 1]);

        for (i, armor) in armors.iter().enumerate() {
            let previous = &cells[i];
            let row: Vec<f64> = (0..=budget)
                .map(|c| {
                    let exclude = previous[c];
                    // an empty budget or an unaffordable item carries the previous row forward.
                    if c == 0 || armor.cost() > c {
                        return exclude;
                    }
                    // the recurrence builds on the best defense known for the remaining budget
                    // without this item, so each item is counted at most once.
                    let include = armor.defense() + previous[c - armor.cost()];
                    // ties keep the item out, which is what reconstruction relies on.
                    if include > exclude { include } else { exclude }
                })
                .collect();
            cells.push(row);
        }

        Self { cells }
    }

    /// Number of rows, one more than the number of armor items.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns, one more than the budget.
    pub fn columns(&self) -> usize {
        self.cells[0].len()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i]
    }

    pub fn budget(&self) -> usize {
        self.columns() - 1
    }

    /// Best defense using every item within the full budget.
    pub fn optimum(&self) -> f64 {
        self.cells[self.rows() - 1][self.budget()]
    }

    /// Walk back from the last row, collecting each item whose row differs from the one above.
    ///
    /// The walk ends when the prefix is exhausted rather than when the remaining defense reaches
    /// zero, so floating point drift in the defense values cannot stop it early. Items come out
    /// in discovery order, which is the reverse of catalog order.
    pub fn reconstruct(&self, armors: &[Arc<ArmorItem>]) -> ArmorVector {
        assert_eq!(
            armors.len() + 1,
            self.rows(),
            "table was built for a different catalog"
        );

        let mut result = Vec::new();
        let mut c = self.budget();
        for i in (1..self.rows()).rev() {
            if self.cells[i][c] != self.cells[i - 1][c] {
                let armor = &armors[i - 1];
                result.push(armor.clone());
                c -= armor.cost();
            }
        }
        result
    }
}

/// Compute the optimal set of armor items within a `budget` of gold with dynamic programming.
///
/// Runs in O(N x budget) time and space.
pub fn dynamic_max_defense(armors: &[Arc<ArmorItem>], budget: usize) -> Solution {
    let table = DefenseTable::build(armors, budget);
    Solution::new(table.reconstruct(armors))
}
