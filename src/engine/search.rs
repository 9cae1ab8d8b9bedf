use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Serialize;

use crate::curriculum::Concept;

pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub grade_level: u32,
}

impl From<&Concept> for SearchHit {
    fn from(concept: &Concept) -> Self {
        Self {
            id: concept.id.clone(),
            title: concept.title.clone(),
            grade_level: concept.grade_level,
        }
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> i64 {
    matcher.fuzzy_match(text, query).unwrap_or(0)
}

/// Case-insensitive substring search over concept titles.
///
/// Queries shorter than two characters (after trimming) match nothing. Hits
/// are ordered by fuzzy score, ties keeping repository order.
pub fn search<'a>(concepts: &'a [Concept], query: &str) -> Vec<&'a Concept> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let matcher = SkimMatcherV2::default();

    let mut hits = concepts
        .iter()
        .filter_map(|concept| {
            let title = concept.title.to_lowercase();
            title
                .contains(&needle)
                .then(|| (fuzzy_match_score(&matcher, &title, &needle), concept))
        })
        .collect::<Vec<_>>();
    hits.sort_by(|a, b| b.0.cmp(&a.0));

    tracing::debug!(query, hits = hits.len(), "searched concept titles");

    hits.into_iter().map(|(_score, concept)| concept).collect()
}
