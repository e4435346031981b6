//! Tầng hiển thị dashboard: surface trừu tượng, renderer và payload biểu đồ.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;

use careboard_core::{DashboardConfig, DashboardSnapshot, HistoryEntry, PatientRecord, YearlyAggregate};
use serde::{Deserialize, Serialize};

/// Ký tự thay thế khi một trường dữ liệu vắng.
pub const PLACEHOLDER: &str = "—";

/// Các slot hiển thị hồ sơ, đặt tên theo nội dung chứ không theo DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSlot {
    Name,
    Gender,
    Age,
    DateOfBirth,
    Phone,
    EmergencyContact,
    InsuranceType,
    BloodType,
}

/// Một dòng chỉ số sống: nhãn + giá trị đã định dạng.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalLine {
    pub label: &'static str,
    pub value: String,
}

/// Payload biểu đồ đường hai chuỗi, giao nguyên khối cho surface vẽ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<i32>,
    pub border_width: u32,
    pub point_radius: u32,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub legend_position: String,
    pub use_point_style: bool,
    pub tooltip_mode: String,
    pub tooltip_intersect: bool,
    pub x_title: String,
    pub y_title: String,
}

/// Surface trình bày được tiêm từ ngoài: chỉ ghi, mỗi lần ghi thay trọn vùng.
pub trait Surface {
    fn write_field(&mut self, slot: FieldSlot, value: &str);
    fn show_avatar(&mut self, url: &str);
    fn replace_vitals(&mut self, lines: &[VitalLine]);
    fn replace_diagnoses(&mut self, lines: &[String]);
    fn render_chart(&mut self, chart: &ChartSpec);
}

/// Render trọn snapshot lên surface: hồ sơ, chỉ số sống, lịch sử, biểu đồ.
pub fn render_dashboard(
    surface: &mut dyn Surface,
    snapshot: &DashboardSnapshot,
    config: &DashboardConfig,
) {
    render_profile(surface, snapshot.patient());
    render_vitals(surface, snapshot.latest_vitals());
    render_diagnoses(
        surface,
        snapshot.patient().history(),
        config.history_display_limit,
    );
    render_bp_chart(surface, snapshot.bp_by_year());
}

/// Chín trường hồ sơ; trường vắng hiển thị ký tự thay thế.
pub fn render_profile(surface: &mut dyn Surface, patient: &PatientRecord) {
    if let Some(url) = patient.profile_picture.as_deref() {
        surface.show_avatar(url);
    }

    surface.write_field(FieldSlot::Name, &patient.name);
    surface.write_field(
        FieldSlot::Gender,
        &text_or_placeholder(patient.gender.as_deref()),
    );
    surface.write_field(FieldSlot::Age, &format_age(patient.age));
    surface.write_field(
        FieldSlot::DateOfBirth,
        &text_or_placeholder(patient.date_of_birth.as_deref()),
    );
    surface.write_field(
        FieldSlot::Phone,
        &text_or_placeholder(patient.phone_number.as_deref()),
    );
    surface.write_field(
        FieldSlot::EmergencyContact,
        &text_or_placeholder(patient.emergency_contact.as_deref()),
    );
    surface.write_field(
        FieldSlot::InsuranceType,
        &text_or_placeholder(patient.insurance_type.as_deref()),
    );
    surface.write_field(
        FieldSlot::BloodType,
        &text_or_placeholder(patient.blood_type.as_deref()),
    );
}

/// Bốn dòng chỉ số từ lần ghi nhận gần nhất; không có lịch sử thì để rỗng và
/// surface tự hiển thị nhãn trống của nó.
pub fn render_vitals(surface: &mut dyn Surface, latest: Option<&HistoryEntry>) {
    let Some(entry) = latest else {
        surface.replace_vitals(&[]);
        return;
    };

    let lines = [
        VitalLine {
            label: "Blood Pressure",
            value: format!(
                "{}/{} mmHg",
                format_reading(entry.systolic()),
                format_reading(entry.diastolic())
            ),
        },
        VitalLine {
            label: "Heart Rate",
            value: format!("{} bpm", format_reading(entry.heart_rate_value())),
        },
        VitalLine {
            label: "Respiratory Rate",
            value: format!("{} bpm", format_reading(entry.respiratory_rate_value())),
        },
        VitalLine {
            label: "Temperature",
            value: format!("{} °F", format_reading(entry.temperature_value())),
        },
    ];

    surface.replace_vitals(&lines);
}

/// Tối đa `limit` dòng lịch sử, giữ nguyên thứ tự feed trả về (danh sách
/// hiển thị là bản sao của feed; thẻ chỉ số sống mới dùng thứ tự đã sắp).
pub fn render_diagnoses(surface: &mut dyn Surface, history: &[HistoryEntry], limit: usize) {
    let lines: Vec<String> = history.iter().take(limit).map(format_history_line).collect();
    surface.replace_diagnoses(&lines);
}

/// Biểu đồ huyết áp theo năm; lịch sử rỗng thì không vẽ gì.
pub fn render_bp_chart(surface: &mut dyn Surface, aggregates: &[YearlyAggregate]) {
    if aggregates.is_empty() {
        return;
    }

    surface.render_chart(&bp_chart_spec(aggregates));
}

/// Payload biểu đồ: hai chuỗi Systolic/Diastolic, nhãn là năm tăng dần.
pub fn bp_chart_spec(aggregates: &[YearlyAggregate]) -> ChartSpec {
    let series = |label: &str, data: Vec<i32>| ChartSeries {
        label: label.to_string(),
        data,
        border_width: 2,
        point_radius: 3,
        tension: 0.35,
    };

    ChartSpec {
        labels: aggregates.iter().map(|a| a.year.to_string()).collect(),
        datasets: vec![
            series(
                "Systolic",
                aggregates.iter().map(|a| a.mean_systolic).collect(),
            ),
            series(
                "Diastolic",
                aggregates.iter().map(|a| a.mean_diastolic).collect(),
            ),
        ],
        options: ChartOptions {
            legend_position: "bottom".to_string(),
            use_point_style: true,
            tooltip_mode: "index".to_string(),
            tooltip_intersect: false,
            x_title: "Year".to_string(),
            y_title: "mmHg".to_string(),
        },
    }
}

fn format_history_line(entry: &HistoryEntry) -> String {
    format!(
        "{} {} — BP {}/{} mmHg, HR {} bpm",
        entry.month.as_deref().unwrap_or(PLACEHOLDER),
        entry
            .year
            .map(|year| year.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        format_reading(entry.systolic()),
        format_reading(entry.diastolic()),
        format_reading(entry.heart_rate_value()),
    )
}

fn text_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn format_age(age: Option<u32>) -> String {
    match age {
        Some(age) => format!("{age} years"),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(value) => format_numeric(value),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_numeric(value: f64) -> String {
    if (value.fract() - 0.0).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else if (value * 10.0).fract().abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Render snapshot vào DOM của trang (chỉ có trên target wasm32).
#[cfg(target_arch = "wasm32")]
pub fn render_into_dom(
    snapshot: &DashboardSnapshot,
    config: &DashboardConfig,
) -> Result<(), wasm_bindgen::JsValue> {
    let mut surface = dom::DomSurface::attach()?;
    render_dashboard(&mut surface, snapshot, config);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn render_into_dom(
    _: &DashboardSnapshot,
    _: &DashboardConfig,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "careboard-ui chỉ hỗ trợ render DOM trên target wasm32",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use careboard_core::{BloodPressure, Reading};

    #[derive(Debug, Default, PartialEq)]
    struct FakeSurface {
        fields: Vec<(FieldSlot, String)>,
        avatar: Option<String>,
        vitals: Vec<Vec<VitalLine>>,
        diagnoses: Vec<Vec<String>>,
        charts: Vec<ChartSpec>,
    }

    impl Surface for FakeSurface {
        fn write_field(&mut self, slot: FieldSlot, value: &str) {
            self.fields.push((slot, value.to_string()));
        }

        fn show_avatar(&mut self, url: &str) {
            self.avatar = Some(url.to_string());
        }

        fn replace_vitals(&mut self, lines: &[VitalLine]) {
            self.vitals.push(lines.to_vec());
        }

        fn replace_diagnoses(&mut self, lines: &[String]) {
            self.diagnoses.push(lines.to_vec());
        }

        fn render_chart(&mut self, chart: &ChartSpec) {
            self.charts.push(chart.clone());
        }
    }

    fn entry(month: &str, year: i32, systolic: f64, diastolic: f64, heart_rate: f64) -> HistoryEntry {
        HistoryEntry {
            month: Some(month.to_string()),
            year: Some(year),
            blood_pressure: Some(BloodPressure {
                systolic: Some(Reading {
                    value: Some(systolic),
                }),
                diastolic: Some(Reading {
                    value: Some(diastolic),
                }),
            }),
            heart_rate: Some(Reading {
                value: Some(heart_rate),
            }),
            ..HistoryEntry::default()
        }
    }

    fn patient() -> PatientRecord {
        PatientRecord {
            name: "Jessica Taylor".to_string(),
            gender: Some("Female".to_string()),
            age: Some(28),
            date_of_birth: Some("1996-08-23".to_string()),
            blood_type: Some("O-".to_string()),
            ..PatientRecord::default()
        }
    }

    fn field<'a>(surface: &'a FakeSurface, slot: FieldSlot) -> &'a str {
        surface
            .fields
            .iter()
            .find(|(written, _)| *written == slot)
            .map(|(_, value)| value.as_str())
            .expect("slot was written")
    }

    #[test]
    fn profile_formats_age_and_substitutes_placeholder() {
        let mut surface = FakeSurface::default();
        render_profile(&mut surface, &patient());

        assert_eq!(field(&surface, FieldSlot::Name), "Jessica Taylor");
        assert_eq!(field(&surface, FieldSlot::Age), "28 years");
        assert_eq!(field(&surface, FieldSlot::Phone), PLACEHOLDER);
        assert_eq!(field(&surface, FieldSlot::InsuranceType), PLACEHOLDER);
    }

    #[test]
    fn profile_with_null_age_renders_placeholder() {
        let mut surface = FakeSurface::default();
        let mut record = patient();
        record.age = None;

        render_profile(&mut surface, &record);
        assert_eq!(field(&surface, FieldSlot::Age), PLACEHOLDER);
    }

    #[test]
    fn avatar_is_skipped_when_picture_is_missing() {
        let mut surface = FakeSurface::default();
        render_profile(&mut surface, &patient());
        assert_eq!(surface.avatar, None);
    }

    #[test]
    fn vitals_lines_follow_display_formats() {
        let mut surface = FakeSurface::default();
        let mut latest = entry("March", 2024, 130.0, 85.0, 74.0);
        latest.temperature = Some(Reading { value: Some(98.6) });

        render_vitals(&mut surface, Some(&latest));

        let lines = &surface.vitals[0];
        assert_eq!(lines[0].value, "130/85 mmHg");
        assert_eq!(lines[1].value, "74 bpm");
        assert_eq!(lines[2].value, "— bpm");
        assert_eq!(lines[3].value, "98.6 °F");
    }

    #[test]
    fn vitals_without_history_replace_with_empty_list() {
        let mut surface = FakeSurface::default();
        render_vitals(&mut surface, None);
        assert_eq!(surface.vitals, vec![Vec::<VitalLine>::new()]);
    }

    #[test]
    fn diagnoses_keep_feed_order_and_cap_at_limit() {
        let mut surface = FakeSurface::default();
        let history: Vec<HistoryEntry> = (0..8)
            .map(|idx| entry("January", 2016 + idx, 120.0, 80.0, 70.0))
            .collect();

        render_diagnoses(&mut surface, &history, 6);

        let lines = &surface.diagnoses[0];
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "January 2016 — BP 120/80 mmHg, HR 70 bpm");
        assert_eq!(lines[5], "January 2021 — BP 120/80 mmHg, HR 70 bpm");
    }

    #[test]
    fn diagnosis_line_degrades_per_field() {
        let mut surface = FakeSurface::default();
        let entry = HistoryEntry {
            year: Some(2023),
            ..HistoryEntry::default()
        };

        render_diagnoses(&mut surface, &[entry], 6);
        assert_eq!(surface.diagnoses[0][0], "— 2023 — BP —/— mmHg, HR — bpm");
    }

    #[test]
    fn chart_is_not_drawn_for_empty_history() {
        let mut surface = FakeSurface::default();
        render_bp_chart(&mut surface, &[]);
        assert!(surface.charts.is_empty());
    }

    #[test]
    fn chart_spec_carries_two_series_over_year_labels() {
        let aggregates = vec![
            YearlyAggregate {
                year: 2023,
                mean_systolic: 160,
                mean_diastolic: 78,
            },
            YearlyAggregate {
                year: 2024,
                mean_systolic: 125,
                mean_diastolic: 83,
            },
        ];

        let spec = bp_chart_spec(&aggregates);
        assert_eq!(spec.labels, vec!["2023", "2024"]);
        assert_eq!(spec.datasets[0].label, "Systolic");
        assert_eq!(spec.datasets[0].data, vec![160, 125]);
        assert_eq!(spec.datasets[1].label, "Diastolic");
        assert_eq!(spec.datasets[1].data, vec![78, 83]);
        assert_eq!(spec.options.legend_position, "bottom");
        assert_eq!(spec.options.tooltip_mode, "index");
    }

    #[test]
    fn rendering_the_same_snapshot_twice_is_idempotent() {
        let mut record = patient();
        record.diagnosis_history = Some(vec![
            entry("January", 2023, 120.0, 80.0, 70.0),
            entry("March", 2023, 130.0, 85.0, 74.0),
        ]);
        let latest = Some(entry("March", 2023, 130.0, 85.0, 74.0));
        let aggregates = vec![YearlyAggregate {
            year: 2023,
            mean_systolic: 125,
            mean_diastolic: 83,
        }];
        let snapshot = DashboardSnapshot::new(record, latest, aggregates);
        let config = DashboardConfig::default();

        let mut first = FakeSurface::default();
        let mut second = FakeSurface::default();
        render_dashboard(&mut first, &snapshot, &config);
        render_dashboard(&mut second, &snapshot, &config);

        assert_eq!(first, second);
    }
}
