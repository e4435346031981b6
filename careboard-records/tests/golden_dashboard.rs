use std::fs;

use careboard_core::DashboardConfig;
use careboard_records::build_dashboard_str;
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn patient_feed_matches_golden() {
    let body = fs::read_to_string(fixture_path("patient_feed.json"))
        .expect("Không đọc được feed mẫu");

    let snapshot = build_dashboard_str(&body, &DashboardConfig::default())
        .expect("Không dựng được snapshot");

    let mut actual = serde_json::to_value(snapshot).expect("Không serialize snapshot");
    normalize_dynamic_fields(&mut actual);

    let expected = fs::read_to_string(fixture_path("dashboard_snapshot.json"))
        .expect("Không đọc được golden snapshot");

    let mut expected_value: Value = serde_json::from_str(&expected).expect("Golden không hợp lệ");
    normalize_dynamic_fields(&mut expected_value);

    assert_eq!(actual, expected_value);
}

fn normalize_dynamic_fields(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        if obj.contains_key("generated_at") {
            obj.insert(
                "generated_at".to_string(),
                Value::String("__DYNAMIC_TIMESTAMP__".to_string()),
            );
        }
    }
}
