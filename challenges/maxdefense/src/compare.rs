use log::info;
use tokio::task::JoinHandle;

use crate::algorithm::Algorithm;
use crate::armor::{ArmorVector, Solution};
use crate::testing::approx_eq;
use crate::timer::Timer;

/// One solver's answer and how long it took.
#[derive(Debug)]
pub struct Run {
    pub algorithm: Algorithm,
    pub solution: Solution,
    pub elapsed: f64,
}

/// Both solvers run over the same catalog and budget.
#[derive(Debug)]
pub struct Comparison {
    pub dynamic: Run,
    pub exhaustive: Run,
}

impl Comparison {
    /// Whether the two optimal defense values match.
    pub fn agrees(&self) -> bool {
        approx_eq(
            self.dynamic.solution.total_defense(),
            self.exhaustive.solution.total_defense(),
        )
    }
}

// The solvers are CPU bound, so they go to the blocking pool rather than the async workers.
fn spawn_run(algorithm: Algorithm, armors: ArmorVector, budget: usize) -> JoinHandle<Run> {
    tokio::task::spawn_blocking(move || {
        let timer = Timer::new();
        let solution = algorithm.solve(&armors, budget);
        let elapsed = timer.elapsed();
        info!(
            "{} finished in {:.6}s with defense {}",
            algorithm,
            elapsed,
            solution.total_defense()
        );
        Run {
            algorithm,
            solution,
            elapsed,
        }
    })
}

/// Run the dynamic and exhaustive solvers concurrently on the same catalog.
///
/// The catalog must already be small enough for the exhaustive search.
pub async fn compare(armors: &ArmorVector, budget: usize) -> std::io::Result<Comparison> {
    Algorithm::Exhaustive.check(armors)?;

    // the catalog clones share the underlying armor records.
    let dynamic = spawn_run(Algorithm::Dynamic, armors.clone(), budget);
    let exhaustive = spawn_run(Algorithm::Exhaustive, armors.clone(), budget);

    let (dynamic, exhaustive) = tokio::try_join!(dynamic, exhaustive)?;
    Ok(Comparison {
        dynamic,
        exhaustive,
    })
}
