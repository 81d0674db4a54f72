use crate::domain::model::Practitioner;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Ranked name suggestions for the search box: same case-insensitive
/// substring rule as the search stage, input order, truncated to
/// `limit`. Empty input suggests nothing.
pub fn suggest(entities: &[Practitioner], partial_text: &str, limit: usize) -> Vec<String> {
    if partial_text.is_empty() {
        return Vec::new();
    }
    let needle = partial_text.to_lowercase();
    entities
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .take(limit)
        .map(|p| p.name.clone())
        .collect()
}
