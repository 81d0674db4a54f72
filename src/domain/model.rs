use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One raw upstream object, exactly as the endpoint delivered it.
/// Field layout is not under our control; the normalizer owns all
/// interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl RawRecord {
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}

/// How a consultation is delivered. Wire labels follow the upstream
/// address parameters ("Video Consult" / "In Clinic").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationMode {
    VideoConsult,
    InClinic,
}

impl ConsultationMode {
    pub fn label(&self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }

    /// Exact, case-insensitive match against the wire label. Anything
    /// else is unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("Video Consult") {
            Some(ConsultationMode::VideoConsult)
        } else if value.eq_ignore_ascii_case("In Clinic") {
            Some(ConsultationMode::InClinic)
        } else {
            None
        }
    }
}

/// Sort order for the result list. `Fees` is ascending by consultation
/// fee, `Experience` is descending by years. Both sorts are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Fees,
    Experience,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("fees") {
            Some(SortKey::Fees)
        } else if value.eq_ignore_ascii_case("experience") {
            Some(SortKey::Experience)
        } else {
            None
        }
    }
}

/// Canonical practitioner entity. Immutable once built by the
/// normalizer.
///
/// `uid` is a position-derived synthetic key and is strictly unique
/// within one fetched collection. `source_id` is whatever the upstream
/// record carried; it may be absent or collide and must not be used as
/// a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practitioner {
    pub uid: usize,
    pub source_id: Option<i64>,
    pub name: String,
    pub specialties: Vec<String>,
    pub experience_years: u32,
    pub consultation_modes: Vec<ConsultationMode>,
    pub photo_url: String,
    pub degree: String,
    pub location: String,
    pub about: String,
    pub languages: Vec<String>,
    pub consultation_fee: u32,
}

impl Practitioner {
    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_modes.contains(&mode)
    }
}

/// The full set of active filter/sort selections. One logical instance
/// per session, owned by the `Session`; always serializable to (and
/// rebuildable from) the published address string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub consultation: Option<ConsultationMode>,
    pub specialties: BTreeSet<String>,
    pub sort: Option<SortKey>,
}

impl QueryState {
    pub fn is_default(&self) -> bool {
        self.search_text.is_empty()
            && self.consultation.is_none()
            && self.specialties.is_empty()
            && self.sort.is_none()
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    /// Radio semantics: selecting the active mode clears it.
    pub fn toggle_consultation(&mut self, mode: ConsultationMode) {
        self.consultation = if self.consultation == Some(mode) {
            None
        } else {
            Some(mode)
        };
    }

    /// Checkbox semantics: add if absent, remove if present.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        if !self.specialties.remove(specialty) {
            self.specialties.insert(specialty.to_string());
        }
    }

    /// Radio semantics: selecting the active key clears it.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = if self.sort == Some(key) { None } else { Some(key) };
    }
}

/// Presentation phase for the render surface. `Empty` (filters matched
/// nothing) is distinct from `Failed` and from `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Empty,
    Failed(String),
}

/// Everything the render surface needs for one frame: the ordered
/// result list, the filter vocabulary, the current selections, and the
/// published address.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    pub phase: Phase,
    pub results: Vec<Practitioner>,
    pub specialty_options: Vec<String>,
    pub query: QueryState,
    pub address: String,
}
