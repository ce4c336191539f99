use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasteflow_core::{Dashboard, DashboardConfig, DashboardError, DashboardEvent, Pathway};

fn js_err(e: DashboardError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("Serialize failed: {e}")))
}

/// Browser-side handle on one dashboard session.
///
/// The page forwards dropdown values and slider moves here and redraws from
/// the returned view model.
#[wasm_bindgen]
pub struct WasteDashboard {
    inner: Dashboard,
}

#[wasm_bindgen]
impl WasteDashboard {
    /// `config_json` may be omitted to use the production defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasteDashboard, JsValue> {
        let config = match config_json {
            Some(json) => DashboardConfig::from_json_str(&json).map_err(js_err)?,
            None => DashboardConfig::default(),
        };
        let inner = Dashboard::new(config).map_err(js_err)?;
        Ok(WasteDashboard { inner })
    }

    /// Dropdown change. Returns `{ allocation, editable }`.
    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, value: &str) -> Result<JsValue, JsValue> {
        let selection = self.inner.config().parse_selection(value).map_err(js_err)?;
        to_js(&self.inner.set_selection(selection))
    }

    /// Slider move. `slider_id` is the pathway key or its `-slider` id.
    /// Returns the settled allocation.
    #[wasm_bindgen(js_name = setAllocation)]
    pub fn set_allocation(&mut self, slider_id: &str, value: i32) -> Result<JsValue, JsValue> {
        let pathway: Pathway = slider_id.parse().map_err(js_err)?;
        to_js(&self.inner.set_allocation(pathway, value).map_err(js_err)?)
    }

    /// Tagged JSON event (`{"event": "slider_moved", ...}`). Returns the view model.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_json: &str) -> Result<JsValue, JsValue> {
        let event: DashboardEvent = serde_json::from_str(event_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid event: {e}")))?;
        to_js(&self.inner.handle(event).map_err(js_err)?)
    }

    #[wasm_bindgen(js_name = viewModel)]
    pub fn view_model(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.view_model())
    }

    /// Same snapshot as `viewModel`, as a JSON string.
    #[wasm_bindgen(js_name = viewModelJson)]
    pub fn view_model_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.view_model())
            .map_err(|e| JsValue::from_str(&format!("Serialize failed: {e}")))
    }
}
