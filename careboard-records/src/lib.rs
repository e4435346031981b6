//! Patient feed JSON to `DashboardSnapshot` converter with history analytics.

use std::collections::BTreeMap;

use careboard_core::{
    month_index, DashboardConfig, DashboardError, DashboardSnapshot, HistoryEntry, PatientRecord,
    YearlyAggregate,
};
use serde_json::Value;

/// Build the dashboard snapshot from a raw JSON body.
pub fn build_dashboard_str(
    body: &str,
    config: &DashboardConfig,
) -> Result<DashboardSnapshot, DashboardError> {
    let records = parse_patients(body)?;
    build_dashboard(&records, config)
}

/// Parse the feed body into patient records.
pub fn parse_patients(body: &str) -> Result<Vec<PatientRecord>, DashboardError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| DashboardError::Parse(err.to_string()))?;
    parse_patients_value(&value)
}

/// Parse an already-decoded JSON value into patient records.
///
/// The feed contract is a top-level array; anything else fails the whole
/// load. Null or missing fields inside a record are tolerated and surface as
/// `None` on the core types.
pub fn parse_patients_value(value: &Value) -> Result<Vec<PatientRecord>, DashboardError> {
    if !value.is_array() {
        return Err(DashboardError::Parse(
            "expected an array of patient records".to_string(),
        ));
    }

    serde_json::from_value(value.clone()).map_err(|err| DashboardError::Parse(err.to_string()))
}

/// First record whose `name` matches exactly; feed order decides ties.
pub fn select_by_name<'a>(
    records: &'a [PatientRecord],
    target: &str,
) -> Option<&'a PatientRecord> {
    records.iter().find(|record| record.name == target)
}

/// Most recent history entry under (year desc, month index desc).
///
/// The sort is stable, so duplicate (year, month) pairs resolve to the entry
/// that appears first in the feed. Entries without a year sort last; a
/// missing or unrecognized month counts as index -1.
pub fn most_recent(history: &[HistoryEntry]) -> Option<HistoryEntry> {
    if history.is_empty() {
        return None;
    }

    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| {
        b.year.cmp(&a.year).then_with(|| {
            month_index(b.month.as_deref()).cmp(&month_index(a.month.as_deref()))
        })
    });
    sorted.into_iter().next()
}

/// Per-year mean systolic/diastolic, ascending by year.
///
/// Entries missing year, systolic, or diastolic are excluded from the
/// grouping entirely. Means are rounded half away from zero.
pub fn aggregate_by_year(history: &[HistoryEntry]) -> Vec<YearlyAggregate> {
    let mut by_year: BTreeMap<i32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();

    for entry in history {
        let (Some(year), Some(systolic), Some(diastolic)) =
            (entry.year, entry.systolic(), entry.diastolic())
        else {
            continue;
        };

        let bucket = by_year.entry(year).or_default();
        bucket.0.push(systolic);
        bucket.1.push(diastolic);
    }

    by_year
        .into_iter()
        .map(|(year, (systolic, diastolic))| YearlyAggregate {
            year,
            mean_systolic: mean_rounded(&systolic),
            mean_diastolic: mean_rounded(&diastolic),
        })
        .collect()
}

fn mean_rounded(values: &[f64]) -> i32 {
    let count = values.len().max(1) as f64;
    (values.iter().sum::<f64>() / count).round() as i32
}

/// Run the full selection + analysis pipeline for the configured patient.
///
/// Steps run strictly in order: select, derive the latest entry, aggregate
/// the blood-pressure series. A missing target patient aborts with
/// `NotFound`; the caller decides how to notify.
pub fn build_dashboard(
    records: &[PatientRecord],
    config: &DashboardConfig,
) -> Result<DashboardSnapshot, DashboardError> {
    let patient = select_by_name(records, &config.target_patient)
        .ok_or_else(|| DashboardError::NotFound(config.target_patient.clone()))?
        .clone();

    let latest_vitals = most_recent(patient.history());
    let bp_by_year = aggregate_by_year(patient.history());

    Ok(DashboardSnapshot::new(patient, latest_vitals, bp_by_year))
}
