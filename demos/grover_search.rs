//! Example: Grover's search over an n-qubit register.
//! Runs one search (or an iteration sweep) and prints the outcome counts as
//! text or JSON.
//!
//! `RUST_LOG=grover_sim=debug cargo run --example grover_search -- --qubits 4 --marked 9 --sweep`

use clap::Parser;
use grover_sim::core::DEFAULT_SEED;
use grover_sim::{GroverError, IterationSweep, RunRequest, Simulator, SimulatorConfig, optimal_iterations};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "grover-search")]
#[command(about = "Search for a marked value with Grover's algorithm")]
struct Args {
    /// Number of qubits (search space size = 2^n)
    #[arg(short = 'n', long, default_value = "3")]
    qubits: usize,

    /// Marked value to search for (0 to 2^n - 1)
    #[arg(short, long, default_value = "5")]
    marked: usize,

    /// Samples drawn from the final state
    #[arg(short, long, default_value = "4096")]
    shots: usize,

    /// Grover iterations (defaults to floor(pi/4 * sqrt(N)))
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Seed for the sampler
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Sweep iteration counts 0..=max(2K, 3) instead of a single run
    #[arg(long)]
    sweep: bool,

    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    if let Err(e) = execute(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn execute(args: &Args) -> Result<(), GroverError> {
    if args.sweep {
        return sweep(args);
    }

    let mut request = RunRequest::new(args.qubits, args.marked, args.shots);
    if let Some(k) = args.iterations {
        request = request.with_iterations(k);
    }
    let simulator = Simulator::with_config(SimulatorConfig::default().with_seed(args.seed))?;
    let report = simulator.run(&request)?;

    if args.json {
        print_json(&report);
    } else {
        println!("{report}");
        let verdict = if report.found_marked_value() { "found" } else { "not found" };
        println!("Marked value {verdict} (most frequent outcome).");
    }
    Ok(())
}

fn sweep(args: &Args) -> Result<(), GroverError> {
    let sweep = IterationSweep::around_optimal(args.qubits, args.marked, args.shots).with_seed(args.seed);
    let points = sweep.run()?;

    if args.json {
        print_json(&points);
        return Ok(());
    }

    let optimal = optimal_iterations(args.qubits);
    println!(
        "Iteration sweep: n={} marked=|{:0width$b}> shots={} optimal K={}",
        args.qubits,
        args.marked,
        args.shots,
        optimal,
        width = args.qubits
    );
    for point in &points {
        let note = if point.iterations == optimal {
            "  <- optimal"
        } else if point.is_over_rotated(optimal) {
            "  (over-rotated)"
        } else {
            ""
        };
        println!("  {point}{note}");
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing output: {e}"),
    }
}
