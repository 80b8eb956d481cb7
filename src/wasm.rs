//! WebAssembly bindings for browser use.

use js_sys::{Float64Array, Function};
use wasm_bindgen::prelude::*;

use crate::compute::{IcaEngine, Objective, ObjectiveError};
use crate::schema::{IcaConfig, RunConfig};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Objective backed by a JavaScript function `(Float64Array) => number`.
struct JsObjective {
    func: Function,
}

impl Objective for JsObjective {
    fn evaluate(&self, position: &[f64]) -> Result<f64, ObjectiveError> {
        let arg = Float64Array::from(position);
        let value = self
            .func
            .call1(&JsValue::NULL, &arg)
            .map_err(|e| ObjectiveError::Failed(format!("{e:?}")))?;
        value
            .as_f64()
            .ok_or_else(|| ObjectiveError::Failed("objective must return a number".into()))
    }

    fn name(&self) -> &str {
        "javascript"
    }
}

/// Iteration-at-a-time optimizer handle for JavaScript callers.
#[wasm_bindgen]
pub struct WasmIca {
    engine: IcaEngine,
}

#[wasm_bindgen]
impl WasmIca {
    /// Build from a `RunConfig` JSON string using a built-in objective.
    #[wasm_bindgen(constructor)]
    pub fn new(run_json: &str) -> Result<WasmIca, JsValue> {
        let run: RunConfig = serde_json::from_str(run_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid run JSON: {e}")))?;
        let engine = IcaEngine::initialize(run.ica, run.objective)
            .map_err(|e| JsValue::from_str(&format!("Initialization failed: {e}")))?;
        Ok(WasmIca { engine })
    }

    /// Build from an `IcaConfig` JSON string and a JavaScript cost function.
    #[wasm_bindgen(js_name = withFunction)]
    pub fn with_function(config_json: &str, func: Function) -> Result<WasmIca, JsValue> {
        let config: IcaConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {e}")))?;
        let engine = IcaEngine::initialize(config, JsObjective { func })
            .map_err(|e| JsValue::from_str(&format!("Initialization failed: {e}")))?;
        Ok(WasmIca { engine })
    }

    /// Advance one iteration.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<(), JsValue> {
        self.engine
            .step()
            .map_err(|e| JsValue::from_str(&format!("Step failed: {e}")))
    }

    /// Advance up to `steps` iterations, stopping early at termination.
    /// Returns the number of iterations actually run.
    #[wasm_bindgen]
    pub fn run(&mut self, steps: usize) -> Result<usize, JsValue> {
        let mut done = 0;
        while done < steps && !self.engine.is_terminated() {
            self.step()?;
            done += 1;
        }
        Ok(done)
    }

    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Per-empire leader, colonies and total cost, for plotting.
    #[wasm_bindgen(js_name = getEmpires)]
    pub fn get_empires(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.empires())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Best cost after each iteration, starting with the initial population.
    #[wasm_bindgen(js_name = getHistory)]
    pub fn get_history(&self) -> Vec<f64> {
        self.engine.history().to_vec()
    }

    #[wasm_bindgen(js_name = getBestCost)]
    pub fn get_best_cost(&self) -> f64 {
        self.engine.best().cost
    }

    #[wasm_bindgen(js_name = getBestPosition)]
    pub fn get_best_position(&self) -> Vec<f64> {
        self.engine.best().position.clone()
    }

    #[wasm_bindgen(js_name = getIteration)]
    pub fn get_iteration(&self) -> usize {
        self.engine.iteration()
    }

    #[wasm_bindgen(js_name = isTerminated)]
    pub fn is_terminated(&self) -> bool {
        self.engine.is_terminated()
    }
}
