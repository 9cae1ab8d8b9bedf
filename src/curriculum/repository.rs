use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub const FALLBACK_TOPIC_TITLE: &str = "General";

/// A single curriculum knowledge unit, stamped with its owning grade and topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub grade_level: u32,
    pub topic_id: String,
    /// Prerequisites, read as directed edges `prerequisite -> self`.
    #[serde(default)]
    pub prior_knowledge_ids: Vec<String>,
}

impl Concept {
    pub fn new(id: impl Into<String>, title: impl Into<String>, grade_level: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            grade_level,
            topic_id: String::new(),
            prior_knowledge_ids: Vec::new(),
        }
    }

    pub fn with_topic(mut self, topic_id: impl Into<String>) -> Self {
        self.topic_id = topic_id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prior<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prior_knowledge_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicInfo {
    pub id: String,
    pub title: String,
    pub grade_level: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GradeInfo {
    pub level: u32,
    pub title: String,
}

/// Read-only concept list plus the topic and grade indices used for labels.
#[derive(Clone, Debug, Default)]
pub struct ConceptRepository {
    concepts: Vec<Concept>,
    index_by_id: HashMap<String, usize>,
    topics: HashMap<String, TopicInfo>,
    grades: Vec<GradeInfo>,
}

impl ConceptRepository {
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self::with_catalog(concepts, Vec::new(), Vec::new())
    }

    pub(crate) fn with_catalog(
        concepts: Vec<Concept>,
        topics: Vec<TopicInfo>,
        grades: Vec<GradeInfo>,
    ) -> Self {
        let mut index_by_id = HashMap::with_capacity(concepts.len());
        for (index, concept) in concepts.iter().enumerate() {
            if index_by_id.contains_key(&concept.id) {
                tracing::warn!(id = %concept.id, "duplicate concept id; keeping first occurrence");
                continue;
            }
            index_by_id.insert(concept.id.clone(), index);
        }

        let mut topics = topics
            .into_iter()
            .map(|topic| (topic.id.clone(), topic))
            .collect::<HashMap<_, _>>();
        for concept in &concepts {
            topics
                .entry(concept.topic_id.clone())
                .or_insert_with(|| TopicInfo {
                    id: concept.topic_id.clone(),
                    title: FALLBACK_TOPIC_TITLE.to_owned(),
                    grade_level: concept.grade_level,
                });
        }

        let mut grades = grades;
        if grades.is_empty() {
            let mut levels = concepts
                .iter()
                .map(|concept| concept.grade_level)
                .collect::<Vec<_>>();
            levels.sort_unstable();
            levels.dedup();
            grades = levels
                .into_iter()
                .map(|level| GradeInfo {
                    level,
                    title: format!("Grade {level}"),
                })
                .collect();
        }

        let repository = Self {
            concepts,
            index_by_id,
            topics,
            grades,
        };
        repository.log_diagnostics();
        repository
    }

    fn log_diagnostics(&self) {
        let mut dangling = 0usize;
        for concept in &self.concepts {
            let mut seen = HashSet::new();
            for prior_id in &concept.prior_knowledge_ids {
                if !seen.insert(prior_id.as_str()) {
                    tracing::debug!(id = %concept.id, prior = %prior_id, "repeated prerequisite");
                }
                if prior_id == &concept.id {
                    tracing::warn!(id = %concept.id, "concept lists itself as a prerequisite");
                } else if !self.index_by_id.contains_key(prior_id) {
                    dangling += 1;
                    tracing::debug!(id = %concept.id, prior = %prior_id, "dangling prerequisite");
                }
            }
        }

        if dangling > 0 {
            tracing::warn!(dangling, "prerequisite references point at unknown concepts");
        }
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.concepts.get(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn topic(&self, topic_id: &str) -> Option<&TopicInfo> {
        self.topics.get(topic_id)
    }

    pub fn topic_title(&self, topic_id: &str) -> &str {
        self.topics
            .get(topic_id)
            .map(|topic| topic.title.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(FALLBACK_TOPIC_TITLE)
    }

    pub fn grades(&self) -> &[GradeInfo] {
        &self.grades
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.concepts
            .iter()
            .map(|concept| concept.prior_knowledge_ids.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn first_duplicate_wins_lookup() {
        let repository = ConceptRepository::new(vec![
            Concept::new("a", "First", 6),
            Concept::new("a", "Second", 7),
        ]);

        assert_eq!(repository.len(), 2);
        assert_eq!(repository.get("a").map(|c| c.title.as_str()), Some("First"));
    }

    #[test]
    fn unknown_topics_fall_back_to_general() {
        let repository =
            ConceptRepository::new(vec![Concept::new("a", "Fractions", 6).with_topic("t-1")]);

        assert_eq!(repository.topic_title("t-1"), FALLBACK_TOPIC_TITLE);
        assert_eq!(repository.topic_title("missing"), FALLBACK_TOPIC_TITLE);
        assert_eq!(repository.topic("t-1").map(|t| t.grade_level), Some(6));
    }

    #[test]
    fn derives_grades_when_catalog_is_empty() {
        let repository = ConceptRepository::new(vec![
            Concept::new("b", "B", 8),
            Concept::new("a", "A", 6),
            Concept::new("c", "C", 8),
        ]);

        let levels = repository
            .grades()
            .iter()
            .map(|grade| grade.level)
            .collect::<Vec<_>>();
        assert_eq!(levels, vec![6, 8]);
    }
}
