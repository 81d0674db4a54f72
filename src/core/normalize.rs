use crate::domain::model::{ConsultationMode, Practitioner, RawRecord};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

const FALLBACK_NAME: &str = "Unknown Doctor";
const FALLBACK_PHOTO: &str = "https://via.placeholder.com/150";
const FALLBACK_LOCATION: &str = "Unknown";
const FALLBACK_SPECIALTY: &str = "General Physician";
const FALLBACK_LANGUAGE: &str = "English";

fn digit_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"))
}

/// First contiguous digit run in `text`, parsed as an integer. Covers
/// upstream values like "13 Years of experience" and "₹ 500 at clinic";
/// no digits (or overflow) yields 0.
pub fn first_digit_run(text: &str) -> u32 {
    digit_run()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Fold known upstream label variants onto a canonical specialty name.
/// Unrecognized labels pass through unchanged.
pub fn canonical_specialty(label: &str) -> String {
    match label.trim() {
        "Gynaecologist and Obstetrician" => "Gynaecologist".to_string(),
        other => other.to_string(),
    }
}

/// Upstream consultation flags arrive as booleans, numbers, or strings
/// depending on the record. Treat `true`, a nonzero number, or the
/// string "true" as set.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn numeric_field(record: &RawRecord, key: &str) -> u32 {
    match record.field(key) {
        Some(Value::String(s)) => first_digit_run(s),
        Some(Value::Number(n)) => n.as_u64().map(|v| v.min(u32::MAX as u64) as u32).unwrap_or(0),
        _ => 0,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Build the canonical entity from one raw upstream record. Total:
/// every missing, mistyped, or malformed field gets its documented
/// default, so one bad record can never fail the collection.
///
/// `uid` is the record's position in the fetched collection and is the
/// only identifier guaranteed unique; the upstream `id` is kept as
/// `source_id` for display but may collide.
pub fn normalize(uid: usize, record: &RawRecord) -> Practitioner {
    let source_id = match record.field("id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };

    let name = record
        .str_field("name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string();

    // Upstream shape: "specialities": [{"name": "Dentist"}, ...]
    let mut specialties: Vec<String> = record
        .field("specialities")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("name").and_then(|n| n.as_str()))
                .filter(|s| !s.trim().is_empty())
                .map(canonical_specialty)
                .collect()
        })
        .unwrap_or_default();
    if specialties.is_empty() {
        specialties.push(FALLBACK_SPECIALTY.to_string());
    }

    let mut consultation_modes = Vec::new();
    if truthy(record.field("video_consult")) {
        consultation_modes.push(ConsultationMode::VideoConsult);
    }
    if truthy(record.field("in_clinic")) {
        consultation_modes.push(ConsultationMode::InClinic);
    }

    let about = record
        .str_field("doctor_introduction")
        .unwrap_or_default()
        .to_string();
    let degree = about
        .split(',')
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let location = record
        .field("clinic")
        .and_then(|c| c.get("address"))
        .and_then(|a| a.get("locality"))
        .and_then(|l| l.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(FALLBACK_LOCATION)
        .to_string();

    let mut languages = string_list(record.field("languages"));
    if languages.is_empty() {
        languages.push(FALLBACK_LANGUAGE.to_string());
    }

    Practitioner {
        uid,
        source_id,
        name,
        specialties,
        experience_years: numeric_field(record, "experience"),
        consultation_modes,
        photo_url: record
            .str_field("photo")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(FALLBACK_PHOTO)
            .to_string(),
        degree,
        location,
        about,
        languages,
        consultation_fee: numeric_field(record, "fees"),
    }
}

/// Normalize a whole fetched collection, assigning position-derived
/// uids.
pub fn normalize_all(records: &[RawRecord]) -> Vec<Practitioner> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize(index, record))
        .collect()
}

/// De-duplicated, lexicographically sorted specialty vocabulary for the
/// filter panel.
pub fn unique_specialties(entities: &[Practitioner]) -> Vec<String> {
    let set: BTreeSet<&str> = entities
        .iter()
        .flat_map(|p| p.specialties.iter())
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}
