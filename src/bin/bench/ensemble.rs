// Ensemble Infrastructure — N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N-1 and jittered magnitude

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ripple_engine::propagation::propagate;
use ripple_engine::{Shock, WorldGraph};

use crate::metrics::{audit_series, peak_of};
use crate::report::{EnsembleReport, RunResult, Stats};
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Magnitude jitter half-width applied per seeded run.
const MAGNITUDE_JITTER: f64 = 0.05;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    graph: &WorldGraph,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> RunResult {
    let start = Instant::now();

    // Jitter the shock magnitude so the ensemble explores a small
    // neighborhood of the nominal scenario.
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let jitter = rng.gen_range(-MAGNITUDE_JITTER..=MAGNITUDE_JITTER);
    let magnitude = (scenario.shock.magnitude + jitter).clamp(0.0, 1.0);
    let shock = Shock::new(scenario.shock.target_ids.clone(), magnitude, scenario.shock.duration_hours);

    let series = propagate(graph, &shock);
    let audit = audit_series(graph, &shock, &series);
    let (peak_impact, peak_time) = peak_of(&series);
    let kpis = ripple_engine::compute_kpis(graph, &series);

    if let Some(dir) = time_series_dir {
        let recorder = TimeSeriesRecorder::from_series(graph, &series);
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = recorder.write_jsonl(&path) {
            eprintln!("  Warning: failed to write time series: {}", e);
        }
    }

    let elapsed = start.elapsed();
    let elapsed_secs = elapsed.as_secs_f64().max(0.001);

    let criteria = &scenario.criteria;
    let mut pass = audit.bounds_hold && audit.monotonic_holds && audit.targets_initialized;
    if let Some(min_reached) = criteria.min_reached_count {
        if audit.reached_count < min_reached {
            pass = false;
        }
    }
    if let Some(max_saturated) = criteria.max_saturated_count {
        if audit.saturated_count > max_saturated {
            pass = false;
        }
    }
    if let Some(min_peak) = criteria.min_peak_impact {
        if peak_impact < min_peak {
            pass = false;
        }
    }
    if let Some(max_peak_time) = criteria.max_peak_time_hours {
        if peak_time > max_peak_time {
            pass = false;
        }
    }

    RunResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass,
        node_count: graph.len(),
        edge_count: graph.edges().len(),
        duration_hours: shock.duration_hours,
        magnitude,
        peak_impact,
        peak_impact_time_hours: peak_time,
        mean_final_impact: audit.mean_final_impact,
        reached_count: audit.reached_count,
        saturated_count: audit.saturated_count,
        bounds_hold: audit.bounds_hold,
        monotonic_holds: audit.monotonic_holds,
        targets_initialized: audit.targets_initialized,
        port_kpi: kpis.global_trade_index_delta,
        grid_kpi: kpis.regional_energy_stress_delta,
        elapsed_ms: elapsed.as_millis(),
        steps_per_sec: shock.duration_hours as f64 / elapsed_secs,
    }
}

/// Run the ensemble: build the scenario's world once, run N seeded
/// iterations, and verify the engine is bit-deterministic by replaying
/// the nominal shock twice.
pub fn run_ensemble(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> EnsembleReport {
    let graph = scenario.build_graph();
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        let result = run_single(scenario, &graph, seed, ts_dir.as_deref());
        results.push(result);
    }

    let deterministic = {
        let first = propagate(&graph, &scenario.shock);
        let second = propagate(&graph, &scenario.shock);
        first == second
    };

    aggregate(scenario, deterministic, results)
}

/// Aggregate individual runs into an EnsembleReport.
fn aggregate(scenario: &Scenario, deterministic: bool, results: Vec<RunResult>) -> EnsembleReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = if n > 0 { passed as f64 / n as f64 } else { 0.0 };

    let peak_impact = Stats::from_samples(
        &results.iter().map(|r| r.peak_impact).collect::<Vec<_>>(),
    );
    let peak_time_hours = Stats::from_samples(
        &results.iter().map(|r| r.peak_impact_time_hours as f64).collect::<Vec<_>>(),
    );
    let mean_final_impact = Stats::from_samples(
        &results.iter().map(|r| r.mean_final_impact).collect::<Vec<_>>(),
    );
    let reached_count = Stats::from_samples(
        &results.iter().map(|r| r.reached_count as f64).collect::<Vec<_>>(),
    );
    let saturated_count = Stats::from_samples(
        &results.iter().map(|r| r.saturated_count as f64).collect::<Vec<_>>(),
    );
    let elapsed_ms = Stats::from_samples(
        &results.iter().map(|r| r.elapsed_ms as f64).collect::<Vec<_>>(),
    );
    let steps_per_sec = Stats::from_samples(
        &results.iter().map(|r| r.steps_per_sec).collect::<Vec<_>>(),
    );

    EnsembleReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate,
        deterministic,
        peak_impact,
        peak_time_hours,
        mean_final_impact,
        reached_count,
        saturated_count,
        elapsed_ms,
        steps_per_sec,
        individual_runs: results,
    }
}
