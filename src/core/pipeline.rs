use crate::domain::model::{Practitioner, QueryState, SortKey};

/// Run the full filter/sort pipeline over the entity collection. Pure
/// and deterministic: the output is always a reordering-free
/// subsequence of the input until the final (stable) sort stage.
///
/// Stage order is fixed: name search, consultation filter, specialty
/// filter, sort. Unset selections make their stage a no-op.
pub fn apply(entities: &[Practitioner], query: &QueryState) -> Vec<Practitioner> {
    let mut results: Vec<Practitioner> = entities
        .iter()
        .filter(|p| matches_search(p, &query.search_text))
        .filter(|p| matches_consultation(p, query))
        .filter(|p| matches_specialties(p, query))
        .cloned()
        .collect();

    match query.sort {
        Some(SortKey::Fees) => results.sort_by_key(|p| p.consultation_fee),
        Some(SortKey::Experience) => {
            results.sort_by(|a, b| b.experience_years.cmp(&a.experience_years))
        }
        None => {}
    }

    results
}

fn matches_search(entity: &Practitioner, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    entity
        .name
        .to_lowercase()
        .contains(&search_text.to_lowercase())
}

fn matches_consultation(entity: &Practitioner, query: &QueryState) -> bool {
    match query.consultation {
        None => true,
        Some(mode) => entity.offers(mode),
    }
}

/// Keep the entity when at least one of its specialties matches at
/// least one selected value. The match is bidirectional substring
/// containment, so "Dietitian" selects a "Dietitian/Nutritionist"
/// entity and vice versa. That deliberately tolerates upstream naming
/// variants and can over-match specialties that happen to contain each
/// other; this is an accepted approximation, kept on purpose.
fn matches_specialties(entity: &Practitioner, query: &QueryState) -> bool {
    if query.specialties.is_empty() {
        return true;
    }
    entity.specialties.iter().any(|have| {
        let have = have.to_lowercase();
        query.specialties.iter().any(|want| {
            let want = want.to_lowercase();
            have.contains(&want) || want.contains(&have)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ConsultationMode;

    fn entity(uid: usize, name: &str, fee: u32, experience: u32) -> Practitioner {
        Practitioner {
            uid,
            source_id: Some(uid as i64),
            name: name.to_string(),
            specialties: vec!["General Physician".to_string()],
            experience_years: experience,
            consultation_modes: vec![ConsultationMode::InClinic],
            photo_url: String::new(),
            degree: String::new(),
            location: String::new(),
            about: String::new(),
            languages: vec!["English".to_string()],
            consultation_fee: fee,
        }
    }

    fn names(results: &[Practitioner]) -> Vec<&str> {
        results.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_query_keeps_input_order() {
        let entities = vec![entity(0, "Dr. A", 500, 5), entity(1, "Dr. B", 300, 10)];
        let results = apply(&entities, &QueryState::default());
        assert_eq!(names(&results), vec!["Dr. A", "Dr. B"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let entities = vec![entity(0, "Dr. A", 500, 5), entity(1, "Dr. B", 300, 10)];
        let query = QueryState {
            search_text: "dr. a".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. A"]);
    }

    #[test]
    fn test_consultation_filter_is_exact_membership() {
        let mut video_only = entity(0, "Dr. Video", 100, 1);
        video_only.consultation_modes = vec![ConsultationMode::VideoConsult];
        let entities = vec![video_only, entity(1, "Dr. Clinic", 200, 2)];

        let query = QueryState {
            consultation: Some(ConsultationMode::VideoConsult),
            ..Default::default()
        };
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. Video"]);

        let query = QueryState {
            consultation: Some(ConsultationMode::InClinic),
            ..Default::default()
        };
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. Clinic"]);
    }

    #[test]
    fn test_specialty_filter_bidirectional_substring() {
        let mut a = entity(0, "Dr. A", 100, 1);
        a.specialties = vec!["Dietitian/Nutritionist".to_string()];
        let mut b = entity(1, "Dr. B", 100, 1);
        b.specialties = vec!["Dermatologist".to_string()];
        let entities = vec![a, b];

        // Selected value is a substring of the entity's specialty.
        let mut query = QueryState::default();
        query.specialties.insert("Dietitian".to_string());
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. A"]);

        // Entity's specialty is a substring of the selected value.
        let mut query = QueryState::default();
        query.specialties.insert("Dermatologist and Venereologist".to_string());
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. B"]);
    }

    #[test]
    fn test_specialty_filter_any_of_many() {
        let mut a = entity(0, "Dr. A", 100, 1);
        a.specialties = vec!["Dentist".to_string()];
        let mut b = entity(1, "Dr. B", 100, 1);
        b.specialties = vec!["Cardiologist".to_string()];
        let mut c = entity(2, "Dr. C", 100, 1);
        c.specialties = vec!["Orthopaedic".to_string()];
        let entities = vec![a, b, c];

        let mut query = QueryState::default();
        query.specialties.insert("Dentist".to_string());
        query.specialties.insert("Orthopaedic".to_string());
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. A", "Dr. C"]);
    }

    #[test]
    fn test_sort_fees_ascending_and_experience_descending() {
        let entities = vec![entity(0, "Dr. A", 500, 5), entity(1, "Dr. B", 300, 10)];

        let query = QueryState {
            sort: Some(SortKey::Fees),
            ..Default::default()
        };
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. B", "Dr. A"]);

        let query = QueryState {
            sort: Some(SortKey::Experience),
            ..Default::default()
        };
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. B", "Dr. A"]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_fees() {
        let entities = vec![
            entity(0, "Dr. First", 300, 1),
            entity(1, "Dr. Second", 300, 2),
            entity(2, "Dr. Cheap", 100, 3),
        ];
        let query = QueryState {
            sort: Some(SortKey::Fees),
            ..Default::default()
        };
        assert_eq!(
            names(&apply(&entities, &query)),
            vec!["Dr. Cheap", "Dr. First", "Dr. Second"]
        );
    }

    #[test]
    fn test_filters_compose_to_a_stable_subsequence() {
        let mut entities = Vec::new();
        for (i, name) in ["Dr. Asha", "Dr. Arun", "Dr. Beena", "Dr. Arti"]
            .iter()
            .enumerate()
        {
            entities.push(entity(i, name, 100 * (i as u32 + 1), i as u32));
        }
        let query = QueryState {
            search_text: "ar".to_string(),
            ..Default::default()
        };
        // Survivors keep their relative input order.
        assert_eq!(names(&apply(&entities, &query)), vec!["Dr. Arun", "Dr. Arti"]);
    }

    #[test]
    fn test_combined_filters_can_match_nothing() {
        let entities = vec![entity(0, "Dr. A", 500, 5)];
        let query = QueryState {
            search_text: "zz".to_string(),
            consultation: Some(ConsultationMode::VideoConsult),
            ..Default::default()
        };
        assert!(apply(&entities, &query).is_empty());
    }
}
