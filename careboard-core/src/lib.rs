//! Logic lõi cho dashboard hồ sơ bệnh nhân: kiểu dữ liệu, cấu hình và lỗi.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bảng tên tháng cố định, quyết định thứ tự trong cùng một năm.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Tra chỉ số tháng (0-11) theo bảng [`MONTHS`].
///
/// Tháng vắng hoặc không khớp bảng trả về -1, tức là xếp trước January khi
/// so sánh độ mới.
pub fn month_index(month: Option<&str>) -> i32 {
    month
        .and_then(|name| MONTHS.iter().position(|m| *m == name))
        .map(|idx| idx as i32)
        .unwrap_or(-1)
}

/// Cấu hình pipeline dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Endpoint trả về danh sách hồ sơ bệnh nhân.
    pub api_url: String,
    /// Tên bệnh nhân cần hiển thị (khớp chính xác, phân biệt hoa thường).
    pub target_patient: String,
    /// Số dòng lịch sử chẩn đoán hiển thị tối đa.
    pub history_display_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "https://fedskillstest.coalitiontechnologies.workers.dev/".to_string(),
            target_patient: "Jessica Taylor".to_string(),
            history_display_limit: 6,
        }
    }
}

/// Thông tin đăng nhập basic auth, nạp lúc khởi động chứ không nhúng vào mã.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Đọc từ biến môi trường `CAREBOARD_API_USER` / `CAREBOARD_API_PASS`.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("CAREBOARD_API_USER").ok()?;
        let password = std::env::var("CAREBOARD_API_PASS").ok()?;
        Some(Self { username, password })
    }
}

/// Một giá trị đo đơn lẻ; `value` có thể vắng trong dữ liệu nguồn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub value: Option<f64>,
}

/// Cặp huyết áp tâm thu / tâm trương.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BloodPressure {
    pub systolic: Option<Reading>,
    pub diastolic: Option<Reading>,
}

/// Một lần ghi nhận lâm sàng trong lịch sử chẩn đoán.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub month: Option<String>,
    pub year: Option<i32>,
    pub blood_pressure: Option<BloodPressure>,
    pub heart_rate: Option<Reading>,
    pub respiratory_rate: Option<Reading>,
    pub temperature: Option<Reading>,
}

impl HistoryEntry {
    /// Giá trị tâm thu, đi xuyên các tầng Option mà không panic.
    pub fn systolic(&self) -> Option<f64> {
        self.blood_pressure.as_ref()?.systolic.as_ref()?.value
    }

    /// Giá trị tâm trương.
    pub fn diastolic(&self) -> Option<f64> {
        self.blood_pressure.as_ref()?.diastolic.as_ref()?.value
    }

    pub fn heart_rate_value(&self) -> Option<f64> {
        self.heart_rate.as_ref()?.value
    }

    pub fn respiratory_rate_value(&self) -> Option<f64> {
        self.respiratory_rate.as_ref()?.value
    }

    pub fn temperature_value(&self) -> Option<f64> {
        self.temperature.as_ref()?.value
    }
}

/// Hồ sơ một bệnh nhân đúng như API trả về; chỉ đọc, không ghi ngược.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Khóa tra cứu của hệ thống; nguồn không đảm bảo duy nhất, bản ghi
    /// đầu tiên khớp sẽ thắng.
    #[serde(default)]
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_type: Option<String>,
    pub blood_type: Option<String>,
    pub profile_picture: Option<String>,
    pub diagnosis_history: Option<Vec<HistoryEntry>>,
}

impl PatientRecord {
    /// Lịch sử chẩn đoán, rỗng khi nguồn không trả về trường này.
    pub fn history(&self) -> &[HistoryEntry] {
        self.diagnosis_history.as_deref().unwrap_or_default()
    }
}

/// Trung bình huyết áp theo năm, suy ra từ lịch sử chứ không lưu trữ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearlyAggregate {
    pub year: i32,
    pub mean_systolic: i32,
    pub mean_diastolic: i32,
}

/// Kết quả tổng hợp cuối cùng đưa vào tầng hiển thị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub patient: PatientRecord,
    pub latest_vitals: Option<HistoryEntry>,
    pub bp_by_year: Vec<YearlyAggregate>,
}

impl DashboardSnapshot {
    /// Khởi tạo snapshot từ các thành phần đã chuẩn bị.
    pub fn new(
        patient: PatientRecord,
        latest_vitals: Option<HistoryEntry>,
        bp_by_year: Vec<YearlyAggregate>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            patient,
            latest_vitals,
            bp_by_year,
        }
    }

    /// Bệnh nhân được chọn.
    pub fn patient(&self) -> &PatientRecord {
        &self.patient
    }

    /// Lần ghi nhận gần nhất theo (năm, tháng).
    pub fn latest_vitals(&self) -> Option<&HistoryEntry> {
        self.latest_vitals.as_ref()
    }

    /// Chuỗi trung bình huyết áp, năm tăng dần.
    pub fn bp_by_year(&self) -> &[YearlyAggregate] {
        &self.bp_by_year
    }
}

/// Lỗi chung của pipeline dashboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Gọi API thất bại: {0}")]
    Transport(String),
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Không tìm thấy bệnh nhân: {0}")]
    NotFound(String),
}
