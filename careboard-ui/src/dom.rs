//! Surface ghi thẳng vào DOM của trang hồ sơ, theo id phần tử có sẵn.

use crate::{styles, ChartSpec, FieldSlot, Surface, VitalLine};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element};

#[wasm_bindgen]
extern "C" {
    /// Hook vẽ biểu đồ do trang chủ cung cấp.
    #[wasm_bindgen(js_namespace = window, js_name = renderBpChart, catch)]
    fn render_bp_chart_js(spec: JsValue) -> Result<(), JsValue>;
}

/// Surface DOM: mỗi lần ghi thay trọn nội dung vùng đích.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    /// Bám vào document hiện tại và bơm CSS mặc định nếu chưa có.
    pub fn attach() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        styles::ensure_styles(&document)?;
        Ok(Self { document })
    }

    fn slot(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn replace_list(&self, id: &str, items: &[String], as_html: bool, empty_label: &str) {
        let Some(list) = self.slot(id) else {
            return;
        };

        list.set_inner_html("");

        if items.is_empty() {
            if let Ok(item) = self.document.create_element("li") {
                item.set_text_content(Some(empty_label));
                let _ = list.append_child(&item);
            }
            return;
        }

        for text in items {
            let Ok(item) = self.document.create_element("li") else {
                continue;
            };
            if as_html {
                item.set_inner_html(text);
            } else {
                item.set_text_content(Some(text));
            }
            let _ = list.append_child(&item);
        }
    }
}

fn slot_id(slot: FieldSlot) -> &'static str {
    match slot {
        FieldSlot::Name => "patientName",
        FieldSlot::Gender => "patientGender",
        FieldSlot::Age => "patientAge",
        FieldSlot::DateOfBirth => "patientDob",
        FieldSlot::Phone => "patientPhone",
        FieldSlot::EmergencyContact => "patientEmergency",
        FieldSlot::InsuranceType => "patientInsurance",
        FieldSlot::BloodType => "patientBloodType",
    }
}

impl Surface for DomSurface {
    fn write_field(&mut self, slot: FieldSlot, value: &str) {
        if let Some(element) = self.slot(slot_id(slot)) {
            element.set_text_content(Some(value));
        }
    }

    fn show_avatar(&mut self, url: &str) {
        let Some(element) = self.slot("patientAvatar") else {
            return;
        };
        if let Some(element) = element.dyn_ref::<web_sys::HtmlElement>() {
            let _ = element
                .style()
                .set_property("background-image", &format!("url({url})"));
        }
    }

    fn replace_vitals(&mut self, lines: &[VitalLine]) {
        let items: Vec<String> = lines
            .iter()
            .map(|line| {
                format!(
                    "<span class=\"label\">{}</span><span class=\"value\">{}</span>",
                    line.label, line.value
                )
            })
            .collect();

        self.replace_list("vitalsList", &items, true, "No vitals available.");
    }

    fn replace_diagnoses(&mut self, lines: &[String]) {
        self.replace_list("diagnosisList", lines, false, "No diagnosis history found.");
    }

    fn render_chart(&mut self, chart: &ChartSpec) {
        match to_value(chart) {
            Ok(spec) => {
                if let Err(err) = render_bp_chart_js(spec) {
                    console::error_1(&err);
                }
            }
            Err(err) => console::error_1(&JsValue::from(err)),
        }
    }
}
