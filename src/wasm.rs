//! WASM bindings for hilite
//!
//! When compiled with the `wasm` feature, this exposes a `WasmHighlighter`
//! class to JavaScript. Each instance owns its own language registry;
//! pattern tables are registered as JSON.

use crate::portable::scheduler::{reject, YieldPoint};
use crate::portable::{HighlightConfig, HighlightError, Highlighter, LanguageRegistry};
use js_sys::{Array, Function, JsString};
use wasm_bindgen::prelude::*;

/// WASM highlighter instance
///
/// Create with `new WasmHighlighter()`, register languages with
/// `register(language, json, bypassDefaults)` and annotate with
/// `highlight(text, language)`.
#[wasm_bindgen]
pub struct WasmHighlighter {
    registry: LanguageRegistry,
    config: HighlightConfig,
}

#[wasm_bindgen]
impl WasmHighlighter {
    /// Create a highlighter with an empty registry
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmHighlighter {
        WasmHighlighter {
            registry: LanguageRegistry::new(),
            config: HighlightConfig::default(),
        }
    }

    /// Register a JSON array of pattern definitions for `language`
    ///
    /// # Throws
    /// If the JSON is malformed or a pattern does not compile
    #[wasm_bindgen]
    pub fn register(
        &mut self,
        language: &str,
        patterns_json: &str,
        bypass_defaults: bool,
    ) -> Result<(), JsValue> {
        self.registry
            .register_json(language, patterns_json, bypass_defaults)
            .map_err(to_js_error)
    }

    /// Annotate `text` as `language`
    ///
    /// # Throws
    /// If embedded content nests deeper than the configured maximum
    #[wasm_bindgen]
    pub fn highlight(&self, text: &str, language: &str) -> Result<String, JsValue> {
        Highlighter::new(&self.registry)
            .config(self.config.clone())
            .highlight(text, language)
            .map_err(to_js_error)
    }

    /// Annotate `text`, calling `on_yield(phase, depth, steps)` at every
    /// batch boundary
    ///
    /// If the callback throws, highlighting stops and the call throws.
    #[wasm_bindgen(js_name = highlightWithProgress)]
    pub fn highlight_with_progress(
        &self,
        text: &str,
        language: &str,
        on_yield: &Function,
    ) -> Result<String, JsValue> {
        let scheduler = |point: YieldPoint| -> crate::portable::Result<()> {
            let phase = JsValue::from_str(&point.phase.to_string());
            let depth = JsValue::from_f64(point.depth as f64);
            let steps = JsValue::from_f64(point.steps as f64);
            on_yield
                .call3(&JsValue::NULL, &phase, &depth, &steps)
                .map(|_| ())
                .map_err(|err| {
                    let reason = err
                        .as_string()
                        .unwrap_or_else(|| "callback threw".to_string());
                    reject(point, reason)
                })
        };

        Highlighter::with_scheduler(&self.registry, scheduler)
            .config(self.config.clone())
            .highlight(text, language)
            .map_err(to_js_error)
    }

    /// Registered language names
    #[wasm_bindgen]
    pub fn languages(&self) -> Array {
        self.registry
            .languages()
            .into_iter()
            .map(|name| JsValue::from(JsString::from(name)))
            .collect()
    }

    /// Set the class appended to every wrapped span
    #[wasm_bindgen(js_name = setGlobalClass)]
    pub fn set_global_class(&mut self, class: &str) {
        self.config.global_class = (!class.is_empty()).then(|| class.to_string());
    }

    /// Set the deepest nesting level allowed
    #[wasm_bindgen(js_name = setMaxDepth)]
    pub fn set_max_depth(&mut self, depth: usize) {
        self.config.max_depth = depth;
    }

    /// Set candidate and application batch sizes (0 disables yielding)
    #[wasm_bindgen(js_name = setBatchSizes)]
    pub fn set_batch_sizes(&mut self, scan: usize, apply: usize) {
        self.config.scan_batch = scan;
        self.config.apply_batch = apply;
    }
}

impl Default for WasmHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: HighlightError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize function for WASM
#[wasm_bindgen]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}
