use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::armor::{ArmorItem, ArmorVector};
use crate::Scanner;

const FIELD_SEPARATOR: char = '^';
const FIELD_COUNT: usize = 3;

/// Load all the valid armor items from a `^` delimited catalog file.
pub fn load_armor_database(path: impl AsRef<Path>) -> std::io::Result<ArmorVector> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("cannot open armor database {}: {}", path.display(), e),
        )
    })?;
    let mut scanner = Scanner::new(BufReader::new(file));
    let armors = read_armor_database(&mut scanner)?;
    info!("loaded {} armor items from {}", armors.len(), path.display());
    Ok(armors)
}

/// Read a catalog from the remaining lines of `input`. The first line is a header.
///
/// A line without exactly three fields fails the whole load. Lines with three fields but an
/// invalid value are skipped.
pub fn read_armor_database(input: &mut Scanner) -> std::io::Result<ArmorVector> {
    let mut result = Vec::new();

    // header row
    if input.next_line()?.is_none() {
        return Ok(result);
    }

    while let Some(line) = input.next_line()? {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "invalid field count at line {}; want {} but got {}\nline: {}",
                    input.line_number(),
                    FIELD_COUNT,
                    fields.len(),
                    line
                ),
            ));
        }

        match parse_armor(fields[0], fields[1], fields[2]) {
            Some(armor) => result.push(Arc::new(armor)),
            None => warn!(
                "skipping armor with invalid values at line {}: {}",
                input.line_number(),
                line
            ),
        }
    }

    Ok(result)
}

fn parse_armor(description: &str, cost: &str, defense: &str) -> Option<ArmorItem> {
    if description.is_empty() {
        return None;
    }
    // costs may be written as "12" or "12.0", but must be whole and positive.
    let cost: f64 = cost.trim().parse().ok()?;
    if !cost.is_finite() || cost < 1.0 || cost.fract() != 0.0 || cost > usize::MAX as f64 {
        return None;
    }
    let defense: f64 = defense.trim().parse().ok()?;
    if !defense.is_finite() {
        return None;
    }
    Some(ArmorItem::new(description, cost as usize, defense))
}

/// Items whose defense lies in `[min_defense, max_defense]`, keeping the first `total_size` that
/// match in catalog order.
///
/// Drops irrelevant zero defense armor and bounds the input size of the exhaustive search.
pub fn filter_armor_vector(
    source: &[Arc<ArmorItem>],
    min_defense: f64,
    max_defense: f64,
    total_size: usize,
) -> ArmorVector {
    source
        .iter()
        .filter(|armor| armor.defense() >= min_defense && armor.defense() <= max_defense)
        .take(total_size)
        .cloned()
        .collect()
}
