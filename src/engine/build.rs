use std::collections::{BTreeSet, HashSet};

use crate::curriculum::{Concept, ConceptRepository};
use crate::util::short_label;

use super::classify::{Role, classify_edge, classify_node};
use super::cluster::{Clustering, cluster};
use super::trace::{FocusState, trace};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeTooltip {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleNode {
    pub id: String,
    pub role: Role,
    pub grade_level: u32,
    pub topic_id: String,
    pub label: String,
    pub tooltip: NodeTooltip,
}

/// Directed `prerequisite -> dependent` edge between two visible nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleEdge {
    pub from: String,
    pub to: String,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleGraph {
    pub nodes: Vec<VisibleNode>,
    pub edges: Vec<VisibleEdge>,
    pub focus: Option<FocusState>,
}

impl VisibleGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&VisibleNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_some()
    }
}

/// The four reactive inputs of one graph computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphQuery {
    pub selected_grades: BTreeSet<u32>,
    pub focus_id: Option<String>,
    pub clustered: bool,
}

impl Default for GraphQuery {
    fn default() -> Self {
        Self {
            selected_grades: BTreeSet::from([super::DEFAULT_GRADE]),
            focus_id: None,
            clustered: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphOutput {
    pub graph: VisibleGraph,
    pub clustering: Option<Clustering>,
}

fn make_visible_node(concept: &Concept, focus: Option<&FocusState>) -> VisibleNode {
    VisibleNode {
        id: concept.id.clone(),
        role: classify_node(&concept.id, focus),
        grade_level: concept.grade_level,
        topic_id: concept.topic_id.clone(),
        label: short_label(&concept.title).into_owned(),
        tooltip: NodeTooltip {
            title: concept.title.clone(),
            description: concept.description.clone(),
        },
    }
}

fn collect_edges(
    concepts: &[&Concept],
    visible_ids: &HashSet<&str>,
    focus: Option<&FocusState>,
) -> Vec<VisibleEdge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for concept in concepts {
        for prior_id in &concept.prior_knowledge_ids {
            if !visible_ids.contains(prior_id.as_str()) {
                continue;
            }
            if !seen.insert((prior_id.as_str(), concept.id.as_str())) {
                continue;
            }

            edges.push(VisibleEdge {
                from: prior_id.clone(),
                to: concept.id.clone(),
                role: classify_edge(prior_id, &concept.id, focus),
            });
        }
    }

    edges
}

/// Computes the visible nodes and edges.
///
/// Without a focus a concept is visible iff its grade is selected. With a
/// focus only the traced closure is visible and the grade filter is ignored.
pub fn build(concepts: &[Concept], selected_grades: &[u32], focus_id: Option<&str>) -> VisibleGraph {
    let focus = focus_id.map(|focus_id| trace(concepts, focus_id));

    let mut visible_ids = HashSet::new();
    let visible = concepts
        .iter()
        .filter(|concept| match &focus {
            Some(focus) => focus.contains(&concept.id),
            None => selected_grades.contains(&concept.grade_level),
        })
        .filter(|&concept| visible_ids.insert(concept.id.as_str()))
        .collect::<Vec<_>>();

    let nodes = visible
        .iter()
        .map(|concept| make_visible_node(concept, focus.as_ref()))
        .collect::<Vec<_>>();
    let edges = collect_edges(&visible, &visible_ids, focus.as_ref());

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        focused = focus.is_some(),
        "built visible graph"
    );

    VisibleGraph {
        nodes,
        edges,
        focus,
    }
}

pub fn build_output(repository: &ConceptRepository, query: &GraphQuery) -> GraphOutput {
    let grades = query.selected_grades.iter().copied().collect::<Vec<_>>();
    let graph = build(repository.concepts(), &grades, query.focus_id.as_deref());
    let clustering = query
        .clustered
        .then(|| cluster(&graph.nodes, repository, super::CLUSTER_PREVIEW_LIMIT));

    GraphOutput { graph, clustering }
}
