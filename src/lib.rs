// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra")

pub mod types;
pub mod dataset;
pub mod graph;
pub mod propagation;
pub mod kpi;
pub mod interp;
#[cfg(not(target_arch = "wasm32"))]
pub mod store;

pub use graph::WorldGraph;
pub use interp::{Interpretation, Interpreter, QueryResponse};
pub use kpi::compute_kpis;
pub use propagation::{propagate, simulate_shock};
pub use types::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Engine facade exported to the browser: one loaded world graph plus an
/// interpreter tuned to its catalog. All richly structured values cross
/// the boundary as serialized JS objects.
#[wasm_bindgen]
pub struct RippleSimulation {
    graph: WorldGraph,
    interpreter: Interpreter,
}

#[wasm_bindgen]
impl RippleSimulation {
    /// Build from a world dataset JSON document, or from the built-in
    /// demo world when none is supplied. Malformed input falls back to
    /// the minimal three-region graph rather than failing construction.
    #[wasm_bindgen(constructor)]
    pub fn new(dataset_json: Option<String>) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let graph = match dataset_json {
            Some(json) => WorldGraph::from_json_str(&json),
            None => WorldGraph::from_dataset(dataset::demo_world()),
        };
        let interpreter = Interpreter::from_graph(&graph);
        Self { graph, interpreter }
    }

    /// Run a structured shock. Returns the full `SimulationResult`, or a
    /// `{ error }` object when the shock fails validation.
    pub fn simulate(&self, shock: JsValue) -> JsValue {
        let shock: Shock = match serde_wasm_bindgen::from_value(shock) {
            Ok(shock) => shock,
            Err(err) => return error_value(&err.to_string()),
        };
        match simulate_shock(&self.graph, &shock) {
            Ok(result) => serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL),
            Err(err) => error_value(&err.to_string()),
        }
    }

    /// Nodes and edges of one world, shaped for map rendering.
    pub fn graph_view(&self, world: &str) -> JsValue {
        let view = self.graph.graph_view(world);
        serde_wasm_bindgen::to_value(&view).unwrap_or(JsValue::NULL)
    }

    /// Interpret free text without running anything.
    pub fn interpret(&self, text: &str) -> JsValue {
        let interpretation = self.interpreter.interpret(text);
        serde_wasm_bindgen::to_value(&interpretation).unwrap_or(JsValue::NULL)
    }

    /// Interpret free text and run the recognized shock, if any.
    pub fn simulate_text(&self, text: &str) -> JsValue {
        let response = self.interpreter.run_query(&self.graph, text);
        serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL)
    }

    pub fn node_count(&self) -> usize {
        self.graph.len()
    }
}

fn error_value(message: &str) -> JsValue {
    #[derive(serde::Serialize)]
    struct ErrorBody<'a> {
        error: &'a str,
    }
    serde_wasm_bindgen::to_value(&ErrorBody { error: message }).unwrap_or(JsValue::NULL)
}
