use serde::Serialize;

use crate::util::base_title;

use super::repository::ConceptRepository;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressionStep {
    pub grade_level: u32,
    pub concept_id: String,
    pub title: String,
}

/// Concepts across grades that share the base title of `concept_id`.
pub fn progression(repository: &ConceptRepository, concept_id: &str) -> Vec<ProgressionStep> {
    let Some(initial) = repository.get(concept_id) else {
        return Vec::new();
    };
    let wanted = base_title(&initial.title);

    repository
        .concepts()
        .iter()
        .filter(|concept| base_title(&concept.title) == wanted)
        .map(|concept| ProgressionStep {
            grade_level: concept.grade_level,
            concept_id: concept.id.clone(),
            title: concept.title.clone(),
        })
        .collect()
}
