use std::sync::Arc;

use crate::armor::{aggregate, ArmorItem};
use crate::dynamic::DefenseTable;
use crate::Writer;

// Tables beyond this many rows or columns are not worth reading on a terminal.
const MAX_PRINTED_TABLE: usize = 250;

/// Print each armor item followed by the grand totals.
pub fn print_armor_vector(armors: &[Arc<ArmorItem>], out: &mut Writer) {
    out.println("*** Armor Vector ***");

    if armors.is_empty() {
        out.println("[empty armor list]");
        return;
    }

    for armor in armors {
        out.println(format!(
            "Ye olde {} ==> Cost of {} gold; Defense points = {}",
            armor.description(),
            armor.cost(),
            armor.defense()
        ));
    }

    let (total_cost, total_defense) = aggregate(armors);
    out.println(format!("> Grand total cost: {} gold", total_cost));
    out.println(format!("> Grand total defense: {}", total_defense));
}

/// Print the dynamic programming table, one row per line.
pub fn print_2d_cache(table: &DefenseTable, out: &mut Writer) {
    out.println("*** 2D Cache ***");

    if table.rows() > MAX_PRINTED_TABLE || table.columns() > MAX_PRINTED_TABLE {
        out.println("[too large]");
        return;
    }

    for i in 0..table.rows() {
        for value in table.row(i) {
            out.print(format!("{:>5}", value));
        }
        out.println("");
    }
}
