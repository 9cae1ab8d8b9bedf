use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::parse::{RawDataset, parse_dataset};
use super::repository::{Concept, ConceptRepository, GradeInfo, TopicInfo};

pub fn load_repository(path: &Path) -> Result<ConceptRepository> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read curriculum data from {}", path.display()))?;

    parse_repository(&raw)
        .with_context(|| format!("failed to parse curriculum data in {}", path.display()))
}

pub fn parse_repository(raw: &str) -> Result<ConceptRepository> {
    let repository = match parse_dataset(raw)? {
        RawDataset::Nested(curriculum) => {
            let mut concepts = Vec::new();
            let mut topics = Vec::new();
            let mut grades = Vec::with_capacity(curriculum.grades.len());

            for grade in curriculum.grades {
                grades.push(GradeInfo {
                    level: grade.level,
                    title: grade.title,
                });

                for topic in grade.topics {
                    topics.push(TopicInfo {
                        id: topic.id.clone(),
                        title: topic.title,
                        grade_level: grade.level,
                    });

                    concepts.extend(topic.concepts.into_iter().map(|concept| Concept {
                        id: concept.id,
                        title: concept.title,
                        description: concept.description,
                        grade_level: grade.level,
                        topic_id: topic.id.clone(),
                        prior_knowledge_ids: concept.prior_knowledge_ids,
                    }));
                }
            }

            ConceptRepository::with_catalog(concepts, topics, grades)
        }
        RawDataset::Flat(raw_concepts) => {
            let concepts = raw_concepts
                .into_iter()
                .map(|concept| Concept {
                    id: concept.id,
                    title: concept.title,
                    description: concept.description,
                    grade_level: concept.grade_level,
                    topic_id: concept.topic_id,
                    prior_knowledge_ids: concept.prior_knowledge_ids,
                })
                .collect();

            ConceptRepository::new(concepts)
        }
    };

    tracing::debug!(
        concepts = repository.len(),
        edges = repository.edge_count(),
        grades = repository.grades().len(),
        "loaded concept repository"
    );

    Ok(repository)
}
