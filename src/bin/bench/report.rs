// Benchmark Report Types
// Structured output for independent analysis of propagation behavior

use serde::Serialize;

// ─── Statistics (per-metric ensemble aggregation) ───────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub seed: u64,
    pub pass: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub duration_hours: u64,
    pub magnitude: f64,
    pub peak_impact: f64,
    pub peak_impact_time_hours: u64,
    pub mean_final_impact: f64,
    pub reached_count: usize,
    pub saturated_count: usize,
    pub bounds_hold: bool,
    pub monotonic_holds: bool,
    pub targets_initialized: bool,
    pub port_kpi: Option<f64>,
    pub grid_kpi: Option<f64>,
    pub elapsed_ms: u128,
    pub steps_per_sec: f64,
}

// ─── Ensemble Report (per-scenario aggregation) ─────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct EnsembleReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub n_runs: usize,
    pub pass_rate: f64,
    pub deterministic: bool,
    pub peak_impact: Stats,
    pub peak_time_hours: Stats,
    pub mean_final_impact: Stats,
    pub reached_count: Stats,
    pub saturated_count: Stats,
    pub elapsed_ms: Stats,
    pub steps_per_sec: Stats,
    pub individual_runs: Vec<RunResult>,
}

// ─── Invariant Validation Summary ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct InvariantValidation {
    pub bounds_hold_everywhere: bool,
    pub monotonic_everywhere: bool,
    pub targets_initialized_everywhere: bool,
    pub deterministic_everywhere: bool,
}

impl InvariantValidation {
    pub fn all_pass(&self) -> bool {
        self.bounds_hold_everywhere
            && self.monotonic_everywhere
            && self.targets_initialized_everywhere
            && self.deterministic_everywhere
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub summary: Summary,
    pub invariant_validation: InvariantValidation,
    pub scenarios: Vec<EnsembleReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
