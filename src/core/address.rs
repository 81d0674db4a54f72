use crate::domain::model::{ConsultationMode, QueryState, SortKey};
use url::form_urlencoded;

const PARAM_SEARCH: &str = "search";
const PARAM_CONSULTATION: &str = "consultation";
const PARAM_SPECIALTIES: &str = "specialties";
const PARAM_SORT: &str = "sort";

/// Serialize the query state as a query-parameter string. Unset fields
/// are omitted entirely, so the default state encodes to "".
pub fn encode(query: &QueryState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !query.search_text.is_empty() {
        serializer.append_pair(PARAM_SEARCH, &query.search_text);
    }
    if let Some(mode) = query.consultation {
        serializer.append_pair(PARAM_CONSULTATION, mode.label());
    }
    if !query.specialties.is_empty() {
        let joined: Vec<&str> = query.specialties.iter().map(String::as_str).collect();
        serializer.append_pair(PARAM_SPECIALTIES, &joined.join(","));
    }
    if let Some(key) = query.sort {
        serializer.append_pair(PARAM_SORT, key.label());
    }

    serializer.finish()
}

/// Rebuild a query state from an address string. Total: missing
/// parameters decode to their defaults, unknown parameters are ignored,
/// and malformed `consultation`/`sort` values fall back to unset, so an
/// adversarial address can never fault the pipeline.
pub fn decode(address: &str) -> QueryState {
    let raw = address.strip_prefix('?').unwrap_or(address);
    let mut query = QueryState::default();

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            PARAM_SEARCH => query.search_text = value.into_owned(),
            PARAM_CONSULTATION => query.consultation = ConsultationMode::parse(&value),
            PARAM_SPECIALTIES => {
                query.specialties = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            PARAM_SORT => query.sort = SortKey::parse(&value),
            _ => {}
        }
    }

    query
}
