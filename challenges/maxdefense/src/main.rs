use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use maxdefense::catalog::{filter_armor_vector, load_armor_database};
use maxdefense::dynamic::DefenseTable;
use maxdefense::report::{print_2d_cache, print_armor_vector};
use maxdefense::timer::Timer;
use maxdefense::{testing, Algorithm, ArmorItem, ArmorVector, Solution, Writer};

// Item caps when no -n is given. Compare runs the exhaustive search and must stay under 64 items.
const DEFAULT_MAX_ITEMS: usize = 70;
const COMPARE_MAX_ITEMS: usize = 20;

#[derive(Parser)]
#[command(name = "maxdefense")]
#[command(about = "Choose the armor with the most defense for a gold budget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// `^` delimited armor catalog, the first line is a header
    #[arg(long, default_value = "data/armor.csv")]
    catalog: PathBuf,
    /// Gold budget
    #[arg(short, long, default_value_t = 500)]
    budget: usize,
    /// Smallest defense an armor item needs to be considered
    #[arg(long, default_value_t = 1.0)]
    min_defense: f64,
    /// Largest defense an armor item may have to be considered [default: the budget]
    #[arg(long)]
    max_defense: Option<f64>,
    /// Keep only this many of the matching armor items [default: 70, 20 for compare]
    #[arg(short = 'n', long)]
    max_items: Option<usize>,
}

impl CatalogArgs {
    fn max_defense(&self) -> f64 {
        self.max_defense.unwrap_or(self.budget as f64)
    }

    fn max_items(&self, default: usize) -> usize {
        self.max_items.unwrap_or(default)
    }

    fn load(&self, default_items: usize) -> std::io::Result<ArmorVector> {
        let armors = load_armor_database(&self.catalog)?;
        let filtered = filter_armor_vector(
            &armors,
            self.min_defense,
            self.max_defense(),
            self.max_items(default_items),
        );
        info!("{} of {} armor items pass the filter", filtered.len(), armors.len());
        Ok(filtered)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve with one algorithm and print the chosen armor
    Solve {
        #[command(flatten)]
        catalog: CatalogArgs,
        #[arg(short, long, value_enum, default_value_t = Algorithm::Dynamic)]
        algorithm: Algorithm,
        /// Print the dynamic programming table as well
        #[arg(long)]
        print_table: bool,
    },
    /// Run both algorithms concurrently and check that they agree
    Compare {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Time one algorithm over growing prefixes of the filtered catalog
    Bench {
        #[command(flatten)]
        catalog: CatalogArgs,
        #[arg(short, long, value_enum, default_value_t = Algorithm::Exhaustive)]
        algorithm: Algorithm,
        /// Catalog sizes to time
        #[arg(long, value_delimiter = ',', default_values_t = [4, 8, 12, 16, 20])]
        sizes: Vec<usize>,
    },
    /// Run the scenarios under data/scenarios
    Scenarios {
        #[arg(short, long, value_enum, default_value_t = Algorithm::Dynamic)]
        algorithm: Algorithm,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            catalog,
            algorithm,
            print_table,
        } => {
            let armors = catalog.load(DEFAULT_MAX_ITEMS)?;
            algorithm.check(&armors)?;

            let timer = Timer::new();
            let (solution, table) = solve_with_table(algorithm, &armors, catalog.budget);
            let elapsed = timer.elapsed();

            let mut out = Writer::new();
            print_armor_vector(solution.items(), &mut out);
            match (print_table, &table) {
                (true, Some(table)) => print_2d_cache(table, &mut out),
                (true, None) => warn!("--print-table only applies to the dynamic algorithm"),
                _ => {}
            }
            out.println(format!("elapsed time = {} seconds", elapsed));
            print!("{}", into_text(out)?);
        }
        Commands::Compare { catalog } => {
            let armors = catalog.load(COMPARE_MAX_ITEMS)?;
            let comparison = maxdefense::compare::compare(&armors, catalog.budget).await?;

            let mut out = Writer::new();
            for run in [&comparison.dynamic, &comparison.exhaustive] {
                out.println(format!("== {} ({:.6}s)", run.algorithm, run.elapsed));
                print_armor_vector(run.solution.items(), &mut out);
            }
            print!("{}", into_text(out)?);

            if !comparison.agrees() {
                eprintln!("algorithms disagree on the optimal defense");
                std::process::exit(1);
            }
            println!("algorithms agree");
        }
        Commands::Bench {
            catalog,
            algorithm,
            sizes,
        } => {
            let armors = catalog.load(DEFAULT_MAX_ITEMS)?;
            for n in sizes {
                let prefix = &armors[..n.min(armors.len())];
                if algorithm.check(prefix).is_err() {
                    warn!("skipping {} armor items, too many for {}", n, algorithm);
                    continue;
                }
                let timer = Timer::new();
                let solution = algorithm.solve(prefix, catalog.budget);
                println!(
                    "n = {:>4}  defense = {:>10}  elapsed time = {:.6} seconds",
                    prefix.len(),
                    solution.total_defense(),
                    timer.elapsed()
                );
            }
        }
        Commands::Scenarios { algorithm } => {
            if !testing::run_all_scenarios(algorithm) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn into_text(out: Writer) -> std::io::Result<String> {
    out.into_string()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

// The dynamic solve keeps its table around so it can be printed without building it twice.
fn solve_with_table(
    algorithm: Algorithm,
    armors: &[Arc<ArmorItem>],
    budget: usize,
) -> (Solution, Option<DefenseTable>) {
    match algorithm {
        Algorithm::Dynamic => {
            let table = DefenseTable::build(armors, budget);
            (Solution::new(table.reconstruct(armors)), Some(table))
        }
        Algorithm::Exhaustive => (algorithm.solve(armors, budget), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxdefense::exhaustive::MAX_EXHAUSTIVE_ITEMS;

    fn catalog_args(args: &[&str]) -> (CatalogArgs, usize) {
        match Cli::try_parse_from(args.iter().copied()).unwrap().command {
            Commands::Solve { catalog, .. } | Commands::Bench { catalog, .. } => {
                (catalog, DEFAULT_MAX_ITEMS)
            }
            Commands::Compare { catalog } => (catalog, COMPARE_MAX_ITEMS),
            Commands::Scenarios { .. } => panic!("scenarios takes no catalog"),
        }
    }

    #[test]
    fn test_compare_defaults_fit_exhaustive_search() {
        let (catalog, default_items) = catalog_args(&["maxdefense", "compare"]);
        assert!(catalog.max_items(default_items) <= MAX_EXHAUSTIVE_ITEMS);

        let armors: ArmorVector = (0..DEFAULT_MAX_ITEMS)
            .map(|i| Arc::new(ArmorItem::new(format!("armor {}", i), 1, 1.0)))
            .collect();
        let filtered = filter_armor_vector(
            &armors,
            catalog.min_defense,
            catalog.max_defense(),
            catalog.max_items(default_items),
        );
        assert!(Algorithm::Exhaustive.check(&filtered).is_ok());

        let (catalog, default_items) = catalog_args(&["maxdefense", "compare", "-n", "8"]);
        assert_eq!(catalog.max_items(default_items), 8);
    }

    #[test]
    fn test_solve_defaults() {
        let (catalog, default_items) = catalog_args(&["maxdefense", "solve"]);
        assert_eq!(catalog.budget, 500);
        assert_eq!(catalog.max_items(default_items), 70);
        // the defense ceiling follows the budget unless given.
        assert_eq!(catalog.max_defense(), 500.0);

        let (catalog, _) = catalog_args(&["maxdefense", "solve", "-b", "80"]);
        assert_eq!(catalog.max_defense(), 80.0);

        let (catalog, _) = catalog_args(&["maxdefense", "solve", "--max-defense", "12.5"]);
        assert_eq!(catalog.max_defense(), 12.5);
    }

    #[test]
    fn test_table_only_for_dynamic() {
        let armors: ArmorVector = [(10, 60.0), (20, 100.0), (30, 120.0)]
            .iter()
            .enumerate()
            .map(|(i, &(c, v))| Arc::new(ArmorItem::new(format!("armor {}", i), c, v)))
            .collect();

        let (solution, table) = solve_with_table(Algorithm::Dynamic, &armors, 50);
        let table = table.unwrap();
        assert_eq!(table.optimum(), 220.0);
        assert_eq!(solution.total_defense(), table.optimum());

        let (solution, table) = solve_with_table(Algorithm::Exhaustive, &armors, 50);
        assert!(table.is_none());
        assert_eq!(solution.total_defense(), 220.0);
    }
}
