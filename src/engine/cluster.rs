use std::collections::HashMap;

use crate::curriculum::ConceptRepository;
use crate::util::roman_grade;

use super::build::{VisibleEdge, VisibleNode};

pub const CLUSTER_ID_PREFIX: &str = "cluster:";

pub fn cluster_node_id(topic_id: &str) -> String {
    format!("{CLUSTER_ID_PREFIX}{topic_id}")
}

pub fn is_cluster_id(id: &str) -> bool {
    id.starts_with(CLUSTER_ID_PREFIX)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterTooltip {
    pub title: String,
    pub preview: Vec<String>,
    pub remaining: usize,
}

impl ClusterTooltip {
    pub fn more_suffix(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("+{} more", self.remaining))
    }
}

/// Synthetic node standing in for every visible concept of one topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub id: String,
    pub topic_id: String,
    pub grade_level: u32,
    pub label: String,
    pub members: Vec<String>,
    pub tooltip: ClusterTooltip,
}

/// Inter-cluster edge; `weight` counts the concept edges folded into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterEdge {
    pub from: String,
    pub to: String,
    pub weight: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clustering {
    clusters: Vec<Cluster>,
    /// Visible node id -> topic id.
    pub assignment: HashMap<String, String>,
}

impl Clustering {
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster_of(&self, node_id: &str) -> Option<&Cluster> {
        let topic_id = self.assignment.get(node_id)?;
        self.clusters
            .iter()
            .find(|cluster| &cluster.topic_id == topic_id)
    }

    pub fn member_count(&self) -> usize {
        self.clusters
            .iter()
            .map(|cluster| cluster.members.len())
            .sum()
    }

    /// Folds concept edges onto cluster nodes, dropping intra-cluster edges.
    pub fn collapse_edges(&self, edges: &[VisibleEdge]) -> Vec<ClusterEdge> {
        let mut index_by_pair: HashMap<(&str, &str), usize> = HashMap::new();
        let mut collapsed: Vec<ClusterEdge> = Vec::new();

        for edge in edges {
            let (Some(from_topic), Some(to_topic)) = (
                self.assignment.get(&edge.from),
                self.assignment.get(&edge.to),
            ) else {
                continue;
            };
            if from_topic == to_topic {
                continue;
            }

            match index_by_pair.get(&(from_topic.as_str(), to_topic.as_str())) {
                Some(&index) => collapsed[index].weight += 1,
                None => {
                    index_by_pair.insert((from_topic.as_str(), to_topic.as_str()), collapsed.len());
                    collapsed.push(ClusterEdge {
                        from: cluster_node_id(from_topic),
                        to: cluster_node_id(to_topic),
                        weight: 1,
                    });
                }
            }
        }

        collapsed
    }
}

/// Groups the visible nodes by topic, one cluster per distinct topic id in
/// first-seen order. Single-member topics still become clusters.
pub fn cluster(
    nodes: &[VisibleNode],
    repository: &ConceptRepository,
    preview_limit: usize,
) -> Clustering {
    let mut index_by_topic: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&VisibleNode>> = Vec::new();

    for node in nodes {
        let index = *index_by_topic.entry(node.topic_id.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[index].push(node);
    }

    let mut assignment = HashMap::with_capacity(nodes.len());
    let clusters = groups
        .into_iter()
        .filter_map(|members| {
            let first = members.first()?;
            let topic_id = first.topic_id.clone();
            let title = format!(
                "[{}] {}",
                roman_grade(first.grade_level),
                repository.topic_title(&topic_id)
            );

            let titles = members
                .iter()
                .map(|node| node.tooltip.title.clone())
                .collect::<Vec<_>>();
            let remaining = titles.len().saturating_sub(preview_limit);
            let preview = titles.into_iter().take(preview_limit).collect();

            for node in &members {
                assignment.insert(node.id.clone(), topic_id.clone());
            }

            Some(Cluster {
                id: cluster_node_id(&topic_id),
                grade_level: first.grade_level,
                label: format!("{title}\n({} concepts)", members.len()),
                members: members.iter().map(|node| node.id.clone()).collect(),
                tooltip: ClusterTooltip {
                    title,
                    preview,
                    remaining,
                },
                topic_id,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(clusters = clusters.len(), "clustered visible nodes by topic");

    Clustering {
        clusters,
        assignment,
    }
}
