//! Bridge WASM <-> JavaScript trung lập framework: trang chủ tự fetch JSON
//! rồi giao cho crate này chọn bệnh nhân, phân tích và render.

use careboard_core::{DashboardConfig, DashboardError};
use careboard_records::{build_dashboard, parse_patients_value};
use careboard_ui::render_into_dom;
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsDashboardConfig {
    #[serde(default)]
    target_patient: Option<String>,
    #[serde(default)]
    history_display_limit: Option<usize>,
}

impl From<JsDashboardConfig> for DashboardConfig {
    fn from(cfg: JsDashboardConfig) -> Self {
        let mut base = DashboardConfig::default();
        if let Some(target) = cfg.target_patient {
            base.target_patient = target;
        }
        if let Some(limit) = cfg.history_display_limit {
            base.history_display_limit = limit;
        }
        base
    }
}

fn resolve_config(config: Option<JsValue>) -> Result<DashboardConfig, JsValue> {
    match config {
        Some(js_cfg) => {
            let cfg: JsDashboardConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(DashboardConfig::from(cfg))
        }
        None => Ok(DashboardConfig::default()),
    }
}

/// Dựng snapshot cho bệnh nhân mục tiêu từ JSON đã fetch sẵn phía JS.
#[wasm_bindgen]
pub fn summarize_patient(patients: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let value = from_value::<serde_json::Value>(patients)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON bệnh nhân: {err}")))?;

    let cfg = resolve_config(config)?;

    let records = parse_patients_value(&value)
        .map_err(|err| JsValue::from_str(&format_dashboard_error(err)))?;
    let snapshot = build_dashboard(&records, &cfg)
        .map_err(|err| JsValue::from_str(&format_dashboard_error(err)))?;

    to_value(&snapshot)
        .map_err(|err| JsValue::from_str(&format!("Không serialize snapshot: {err}")))
}

/// Render trọn dashboard vào DOM. Thất bại ở bước nào cũng dừng pipeline,
/// ghi chi tiết vào console và báo người dùng đúng một lần.
#[wasm_bindgen]
pub fn render_patient_dashboard(
    patients: JsValue,
    config: Option<JsValue>,
) -> Result<(), JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    match try_render(patients, config) {
        Ok(()) => Ok(()),
        Err(err) => {
            notify_failure(&err);
            Err(err)
        }
    }
}

fn try_render(patients: JsValue, config: Option<JsValue>) -> Result<(), JsValue> {
    let value = from_value::<serde_json::Value>(patients)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON bệnh nhân: {err}")))?;

    let cfg = resolve_config(config)?;

    let records = parse_patients_value(&value)
        .map_err(|err| JsValue::from_str(&format_dashboard_error(err)))?;
    let snapshot = build_dashboard(&records, &cfg)
        .map_err(|err| JsValue::from_str(&format_dashboard_error(err)))?;

    render_into_dom(&snapshot, &cfg)
}

fn format_dashboard_error(err: DashboardError) -> String {
    format!("Dashboard error: {err}")
}

#[cfg(target_arch = "wasm32")]
fn notify_failure(err: &JsValue) {
    web_sys::console::error_1(err);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message("Failed to load patient data. See console for details.");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn notify_failure(_: &JsValue) {}
