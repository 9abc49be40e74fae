// Terra Benchmark Runner v1.0.0 — Propagation Invariant Validation
// Seeded ensembles (N=30), synthetic worlds, per-step audit trail
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- SCALE_1K         # Filter by name
//   cargo run --release --bin bench -- --time-series    # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42        # Custom base seed

mod ensemble;
mod metrics;
mod report;
mod scenarios;
mod synth;
mod time_series;

use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        time_series: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let ts_dir = if cli.time_series {
        let dir = std::path::Path::new("benchmark-results/time-series");
        Some(dir.to_path_buf())
    } else {
        None
    };

    println!("\n  Terra Benchmark Runner v1.0.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<30} {:>5} {:>12} {:>8} {:>7} {:>5} {:>7}",
        "Scenario", "Pass%", "Peak", "PeakT(h)", "Reach", "Sat", "Time");
    println!("  {}", "-".repeat(84));

    let suite_start = Instant::now();
    let mut reports = Vec::new();

    for scenario in &to_run {
        let report = ensemble::run_ensemble(
            scenario,
            cli.runs,
            cli.seed,
            ts_dir.as_deref(),
        );

        let pass_pct = report.pass_rate * 100.0;
        let peak_mean = report.peak_impact.mean;
        let peak_ci = (report.peak_impact.ci_upper - report.peak_impact.ci_lower) / 2.0;
        let peak_time = report.peak_time_hours.mean;
        let reached = report.reached_count.mean;
        let saturated = report.saturated_count.mean;
        let time_mean = report.elapsed_ms.mean;

        let status = if pass_pct >= 100.0 && report.deterministic { "PASS" } else { "FAIL" };

        println!("  {:<30} {:>4}% {:>7.3}±{:<4.3} {:>8.1} {:>7.1} {:>5.1} {:>5.0}ms  {}",
            report.label,
            pass_pct as u32,
            peak_mean, peak_ci,
            peak_time,
            reached,
            saturated,
            time_mean,
            status,
        );

        reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Invariant Validation ───────────────────────────────────────────

    let bounds_hold_everywhere = reports.iter()
        .all(|r| r.individual_runs.iter().all(|run| run.bounds_hold));
    let monotonic_everywhere = reports.iter()
        .all(|r| r.individual_runs.iter().all(|run| run.monotonic_holds));
    let targets_initialized_everywhere = reports.iter()
        .all(|r| r.individual_runs.iter().all(|run| run.targets_initialized));
    let deterministic_everywhere = reports.iter().all(|r| r.deterministic);

    let validation = InvariantValidation {
        bounds_hold_everywhere,
        monotonic_everywhere,
        targets_initialized_everywhere,
        deterministic_everywhere,
    };

    // ─── Summary ────────────────────────────────────────────────────────

    let total = reports.len();
    let passed = reports.iter()
        .filter(|r| r.pass_rate >= 1.0 && r.deterministic)
        .count();
    let failed = total - passed;

    println!("  {}", "-".repeat(84));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    println!("  Invariant Validation:");
    println!("    Bounds [0,1]:         {}", if validation.bounds_hold_everywhere { "PASS" } else { "FAIL" });
    println!("    Monotonic Series:     {}", if validation.monotonic_everywhere { "PASS" } else { "FAIL" });
    println!("    Target Init:          {}", if validation.targets_initialized_everywhere { "PASS" } else { "FAIL" });
    println!("    Deterministic:        {}", if validation.deterministic_everywhere { "PASS" } else { "FAIL" });
    println!("    Overall:              {}\n", if validation.all_pass() { "PASS" } else { "FAIL" });

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock before epoch").as_millis();
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "1.0.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        invariant_validation: validation,
        scenarios: reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
}
