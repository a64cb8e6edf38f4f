use std::io::{BufRead, Write};
use std::str::FromStr;

pub mod algorithm;
pub mod armor;
pub mod catalog;
pub mod compare;
pub mod dynamic;
pub mod exhaustive;
pub mod report;
pub mod timer;

pub use algorithm::Algorithm;
pub use armor::{aggregate, ArmorItem, ArmorVector, Solution};
pub use dynamic::dynamic_max_defense;
pub use exhaustive::exhaustive_max_defense;

/// Line oriented reader over catalog and scenario input
pub struct Scanner {
    reader: Box<dyn BufRead>,
    line_number: usize,
}

impl Scanner {
    pub fn new(reader: impl BufRead + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            line_number: 0,
        }
    }

    /// Reads the next line with its line terminator removed. `None` at end of input.
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let trimmed = input.trim_end_matches(['\r', '\n']);
        Ok(Some(trimmed.to_string()))
    }

    /// Parses the next line as a `T`.
    pub fn parse<T: FromStr>(&mut self) -> std::io::Result<T> {
        let line = self.next_line()?.ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "unexpected end of input")
        })?;
        line.trim().parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("could not parse line {}: {:?}", self.line_number, line),
            )
        })
    }

    /// 1-based number of the last line returned.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Report output writer (writes to memory buffer)
pub struct Writer(Vec<u8>);

impl Writer {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn print<T: std::fmt::Display>(&mut self, value: T) {
        write!(self.0, "{}", value).expect("Failed write");
    }

    pub fn println<T: std::fmt::Display>(&mut self, value: T) {
        writeln!(self.0, "{}", value).expect("Failed write");
    }

    pub fn into_string(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.0)
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario utilities for running and verifying the solvers against fixtures
pub mod testing {
    use super::*;
    use std::fs;
    use std::io::{BufReader, Cursor};
    use std::path::PathBuf;
    use std::time::Instant;

    use crate::catalog::read_armor_database;

    const SCENARIO_DIR: &str = "scenarios";

    // Optimal defense values are compared with a relative tolerance since the solvers sum
    // floating point defense in different orders.
    const TOLERANCE: f64 = 1e-9;

    fn scenario_dir() -> PathBuf {
        PathBuf::from("data").join(SCENARIO_DIR)
    }

    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    /// Discover all scenario numbers
    pub fn discover_scenarios() -> Vec<usize> {
        let mut scenario_numbers = Vec::new();
        if let Ok(entries) = fs::read_dir(scenario_dir()) {
            for entry in entries.flatten() {
                if let Some(file_name) = entry.file_name().to_str() {
                    if let Some(num_str) = file_name.strip_suffix(".in") {
                        if let Ok(num) = num_str.parse::<usize>() {
                            scenario_numbers.push(num);
                        }
                    }
                }
            }
        }

        scenario_numbers.sort_unstable();
        scenario_numbers
    }

    /// Run a single scenario and return (expected, actual, duration) optimal defense
    pub fn run_scenario(
        algorithm: Algorithm,
        scenario_num: usize,
    ) -> Result<(f64, f64, std::time::Duration), String> {
        let in_file = scenario_dir().join(format!("{}.in", scenario_num));
        let out_file = scenario_dir().join(format!("{}.out", scenario_num));

        let input = fs::read_to_string(&in_file)
            .map_err(|e| format!("Failed to read {}: {}", in_file.display(), e))?;
        let expected = fs::read_to_string(&out_file)
            .map_err(|e| format!("Failed to read {}: {}", out_file.display(), e))?;
        let expected: f64 = expected
            .trim()
            .parse()
            .map_err(|e| format!("Invalid expectation in {}: {}", out_file.display(), e))?;

        let mut scanner = Scanner::new(BufReader::new(Cursor::new(input)));
        let budget: usize = scanner
            .parse()
            .map_err(|e| format!("Invalid budget in {}: {}", in_file.display(), e))?;
        let armors = read_armor_database(&mut scanner)
            .map_err(|e| format!("Invalid catalog in {}: {}", in_file.display(), e))?;
        algorithm
            .check(&armors)
            .map_err(|e| format!("Scenario {} not runnable: {}", scenario_num, e))?;

        let start = Instant::now();
        let solution = algorithm.solve(&armors, budget);
        let duration = start.elapsed();

        if solution.total_cost() > budget {
            return Err(format!(
                "Solution costs {} gold, over the budget of {}",
                solution.total_cost(),
                budget
            ));
        }

        Ok((expected, solution.total_defense(), duration))
    }

    /// Verify all scenarios for an algorithm
    pub fn verify_all_scenarios(algorithm: Algorithm) {
        let scenarios = discover_scenarios();
        assert!(!scenarios.is_empty(), "No scenarios found");

        let mut total_duration = std::time::Duration::ZERO;

        for scenario_num in scenarios {
            match run_scenario(algorithm, scenario_num) {
                Ok((expected, actual, duration)) => {
                    total_duration += duration;
                    assert!(
                        approx_eq(expected, actual),
                        "Scenario {} failed with {} (took {:.2}s)\nExpected: {}\nActual: {}",
                        scenario_num,
                        algorithm,
                        duration.as_secs_f64(),
                        expected,
                        actual
                    );
                }
                Err(e) => panic!("Scenario {} error: {}", scenario_num, e),
            }
        }

        println!("Total time: {:.2}s", total_duration.as_secs_f64());
    }

    /// Run all scenarios and print results (for CLI usage). Returns false if any scenario failed.
    pub fn run_all_scenarios(algorithm: Algorithm) -> bool {
        let scenarios = discover_scenarios();
        if scenarios.is_empty() {
            println!("No scenarios found in {}", scenario_dir().display());
            return true;
        }

        println!("Running {} scenarios with {}...", scenarios.len(), algorithm);

        let mut passed = 0;
        let mut failed = 0;
        let mut total_duration = std::time::Duration::ZERO;

        for scenario_num in &scenarios {
            match run_scenario(algorithm, *scenario_num) {
                Ok((expected, actual, duration)) => {
                    total_duration += duration;
                    let secs = duration.as_secs_f64();
                    if approx_eq(expected, actual) {
                        println!("✓ Scenario {}: PASSED ({:.2}s)", scenario_num, secs);
                        passed += 1;
                    } else {
                        println!("✗ Scenario {}: FAILED ({:.2}s)", scenario_num, secs);
                        println!("  Expected: {}", expected);
                        println!("  Actual:   {}", actual);
                        failed += 1;
                    }
                }
                Err(e) => {
                    println!("✗ Scenario {}: ERROR - {}", scenario_num, e);
                    failed += 1;
                }
            }
        }

        println!("\nResults: {} passed, {} failed", passed, failed);
        println!("Total time: {:.2}s", total_duration.as_secs_f64());
        failed == 0
    }
}
