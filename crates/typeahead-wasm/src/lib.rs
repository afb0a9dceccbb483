// WASM bindings for the typeahead prediction engine.
//
// Exposes a `WasmPredictions` class for a browser keyboard. Searches run
// one batch per `runBatch` call so the host can interleave them with input
// events and abort stale searches.
//
// Usage from JavaScript:
//
//   const predictions = new WasmPredictions();
//   predictions.setDictionary(new Uint8Array(dictBuffer));
//   predictions.setLayout(keys);            // or setNearbyKeys(map)
//   const p = predictions.predict("qog", 3, 20, 1);
//   (function next() {
//     if (p.runBatch(words => show(words), err => console.error(err)))
//       setTimeout(next);
//   })();
//   // words: [["dog", 8], ...]
//   p.abort();                              // takes effect at the next batch
//   predictions.predictNextChar("ca");      // => Uint32Array [116, 20, 114, 12, ...]

use std::collections::HashMap;
use std::task::Poll;

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use typeahead_engine::{
    KeyRect, KeyboardLayout, NearbyKeys, Outcome, PredictError, Prediction, PredictionEngine,
    SearchError, SearchLimits,
};

// ============================================================================
// Serde DTO types for JS interop
// ============================================================================

/// Deserializable key rectangle, as measured by the keyboard renderer.
#[derive(Deserialize)]
struct JsKeyRect {
    code: u32,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn predict_error_to_js(e: PredictError) -> JsError {
    JsError::new(&e.to_string())
}

fn serde_error_to_js(e: serde_wasm_bindgen::Error) -> JsError {
    JsError::new(&e.to_string())
}

fn callback_error_to_js(e: JsValue) -> JsError {
    JsError::new(&format!("callback threw: {e:?}"))
}

/// A JS `Error` (message and stack) carrying the search position that failed.
fn search_error_to_js(e: &SearchError) -> Result<JsValue, JsError> {
    let error = js_sys::Error::new(&e.to_string());
    let fields = [
        ("input", JsValue::from_str(&e.input)),
        ("offset", JsValue::from_f64(e.offset as f64)),
        ("prefix", JsValue::from_str(&e.prefix)),
        ("expanded", JsValue::from_f64(e.expanded as f64)),
    ];
    for (name, value) in fields {
        js_sys::Reflect::set(&error, &JsValue::from_str(name), &value)
            .map_err(|v| JsError::new(&format!("cannot describe search error: {v:?}")))?;
    }
    Ok(error.into())
}

/// Convert `{ "100": { "115": 0.5 } }` into an adjacency map. Keys that are
/// not decimal char codes are skipped.
fn nearby_from_js(map: HashMap<String, HashMap<String, f64>>) -> NearbyKeys {
    NearbyKeys::from_codes(map.into_iter().filter_map(|(key, neighbors)| {
        let key: u32 = key.parse().ok()?;
        let neighbors: Vec<(u32, f64)> = neighbors
            .into_iter()
            .filter_map(|(code, weight)| Some((code.parse().ok()?, weight)))
            .collect();
        Some((key, neighbors))
    }))
}

// ============================================================================
// WasmPredictions
// ============================================================================

/// Word prediction engine for WebAssembly.
#[wasm_bindgen]
pub struct WasmPredictions {
    engine: PredictionEngine,
}

impl Default for WasmPredictions {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmPredictions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmPredictions {
        WasmPredictions {
            engine: PredictionEngine::new(),
        }
    }

    /// Load a dictionary. Throws on a malformed buffer, keeping the
    /// previous dictionary.
    #[wasm_bindgen(js_name = setDictionary)]
    pub fn set_dictionary(&mut self, data: &[u8]) -> Result<(), JsError> {
        self.engine
            .set_dictionary(data)
            .map_err(predict_error_to_js)
    }

    /// Set the adjacency map: an object keyed by char code whose values map
    /// neighbouring char codes to weights in (0, 1].
    #[wasm_bindgen(js_name = setNearbyKeys)]
    pub fn set_nearby_keys(&mut self, map: JsValue) -> Result<(), JsError> {
        let map: HashMap<String, HashMap<String, f64>> =
            serde_wasm_bindgen::from_value(map).map_err(serde_error_to_js)?;
        self.engine.set_nearby_keys(nearby_from_js(map));
        Ok(())
    }

    /// Derive the adjacency map from an array of
    /// `{ code, x, y, width, height }` key rectangles.
    #[wasm_bindgen(js_name = setLayout)]
    pub fn set_layout(&mut self, keys: JsValue) -> Result<(), JsError> {
        let keys: Vec<JsKeyRect> =
            serde_wasm_bindgen::from_value(keys).map_err(serde_error_to_js)?;
        let layout = KeyboardLayout::new(
            keys.into_iter()
                .map(|k| KeyRect::new(k.code, k.x, k.y, k.width, k.height))
                .collect(),
        );
        self.engine.set_nearby_keys(NearbyKeys::from_layout(&layout));
        Ok(())
    }

    /// Start a prediction. Throws if no dictionary or adjacency map is set.
    pub fn predict(
        &self,
        input: &str,
        max_suggestions: usize,
        max_candidates: usize,
        max_corrections: u32,
    ) -> Result<WasmPrediction, JsError> {
        let limits = SearchLimits::new(max_suggestions, max_candidates, max_corrections);
        let prediction = self
            .engine
            .predict(input, limits)
            .map_err(predict_error_to_js)?;
        Ok(WasmPrediction {
            prediction,
            settled: false,
        })
    }

    /// Characters that may follow `input`, flattened as
    /// `[code, frequency, code, frequency, ...]`. Code 0 ends a word.
    #[wasm_bindgen(js_name = predictNextChar)]
    pub fn predict_next_char(&self, input: &str) -> Result<Vec<u32>, JsError> {
        let next = self
            .engine
            .predict_next_char(input)
            .map_err(predict_error_to_js)?;
        Ok(next
            .iter()
            .flat_map(|n| [n.ch as u32, u32::from(n.frequency)])
            .collect())
    }
}

// ============================================================================
// WasmPrediction
// ============================================================================

/// An in-flight prediction, driven by the host one batch at a time.
#[wasm_bindgen]
pub struct WasmPrediction {
    prediction: Prediction,
    settled: bool,
}

#[wasm_bindgen]
impl WasmPrediction {
    /// One of "predicting", "done", "error", "aborting", "aborted".
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.prediction.state().as_str().to_string()
    }

    /// Request cancellation. Neither callback fires afterwards.
    pub fn abort(&self) {
        self.prediction.abort();
    }

    /// Run one batch. Returns `true` if the host should call again later.
    ///
    /// On completion exactly one of `on_success` (with an array of
    /// `[word, weight]` pairs) or `on_error` (with an `Error` that also has
    /// `input`, `offset`, `prefix` and `expanded` fields) is called,
    /// unless the prediction was aborted.
    #[wasm_bindgen(js_name = runBatch)]
    pub fn run_batch(
        &mut self,
        on_success: &js_sys::Function,
        on_error: &js_sys::Function,
    ) -> Result<bool, JsError> {
        if self.settled {
            return Ok(false);
        }
        let outcome = match self.prediction.step() {
            Poll::Pending => return Ok(true),
            Poll::Ready(outcome) => outcome,
        };
        self.settled = true;

        match outcome {
            Outcome::Suggestions(list) => {
                let pairs: Vec<(String, f64)> =
                    list.into_iter().map(|s| (s.word, s.weight)).collect();
                let value = serde_wasm_bindgen::to_value(&pairs).map_err(serde_error_to_js)?;
                on_success
                    .call1(&JsValue::NULL, &value)
                    .map_err(callback_error_to_js)?;
            }
            Outcome::Failed(err) => {
                on_error
                    .call1(&JsValue::NULL, &search_error_to_js(&err)?)
                    .map_err(callback_error_to_js)?;
            }
            Outcome::Aborted => {}
        }
        Ok(false)
    }
}
