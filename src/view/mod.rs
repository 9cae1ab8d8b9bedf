use std::collections::BTreeSet;

use serde::Serialize;

use crate::curriculum::ConceptRepository;
use crate::engine::{
    CLUSTER_PREVIEW_LIMIT, GraphOutput, GraphQuery, SearchHit, build_output, cluster,
    is_cluster_id, search,
};

/// Payload of a click on a concept node, forwarded verbatim to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelection {
    pub concept_id: String,
    pub grade_level: u32,
    pub topic_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeAction {
    ViewConcept,
    GenerateAssessment,
    GenerateScenario,
}

impl NodeAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::ViewConcept => "view concept",
            Self::GenerateAssessment => "generate assessment",
            Self::GenerateScenario => "generate activity ideas",
        }
    }
}

/// Host side of node actions: navigation and content generation live there.
pub trait SelectionHandler {
    fn handle(&mut self, action: NodeAction, selection: &NodeSelection);
}

impl<F> SelectionHandler for F
where
    F: FnMut(NodeAction, &NodeSelection),
{
    fn handle(&mut self, action: NodeAction, selection: &NodeSelection) {
        self(action, selection)
    }
}

struct SearchCache {
    query: String,
    hits: Vec<SearchHit>,
}

/// Owns the reactive inputs and the last engine output.
///
/// Any input change marks the output dirty; the next `output()` call rebuilds
/// it from scratch. Toggling clustering only redoes the clustering step.
pub struct GraphView {
    repository: ConceptRepository,
    query: GraphQuery,
    search: String,
    graph_dirty: bool,
    clustering_dirty: bool,
    revision: u64,
    output: GraphOutput,
    search_cache: Option<SearchCache>,
}

impl GraphView {
    pub fn new(repository: ConceptRepository) -> Self {
        Self::with_query(repository, GraphQuery::default())
    }

    pub fn with_query(repository: ConceptRepository, query: GraphQuery) -> Self {
        Self {
            repository,
            query,
            search: String::new(),
            graph_dirty: true,
            clustering_dirty: false,
            revision: 0,
            output: GraphOutput::default(),
            search_cache: None,
        }
    }

    pub fn repository(&self) -> &ConceptRepository {
        &self.repository
    }

    pub fn query(&self) -> &GraphQuery {
        &self.query
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn replace_repository(&mut self, repository: ConceptRepository) {
        self.repository = repository;
        self.search_cache = None;
        self.graph_dirty = true;
    }

    pub fn is_focused(&self) -> bool {
        self.query.focus_id.is_some()
    }

    /// Grade controls are disabled while a focus is active.
    pub fn toggle_grade(&mut self, level: u32) -> bool {
        if self.is_focused() {
            tracing::debug!(level, "ignoring grade toggle while focused");
            return false;
        }

        if !self.query.selected_grades.remove(&level) {
            self.query.selected_grades.insert(level);
        }
        self.graph_dirty = true;
        true
    }

    pub fn set_grades(&mut self, levels: impl IntoIterator<Item = u32>) -> bool {
        if self.is_focused() {
            return false;
        }

        let levels = levels.into_iter().collect::<BTreeSet<_>>();
        if levels != self.query.selected_grades {
            self.query.selected_grades = levels;
            self.graph_dirty = true;
        }
        true
    }

    pub fn focus(&mut self, concept_id: impl Into<String>) {
        let concept_id = concept_id.into();
        if self.query.focus_id.as_deref() == Some(concept_id.as_str()) {
            return;
        }

        if !self.repository.contains(&concept_id) {
            tracing::warn!(id = %concept_id, "focusing an unknown concept");
        }
        self.query.focus_id = Some(concept_id);
        self.graph_dirty = true;
    }

    pub fn clear_focus(&mut self) {
        if self.query.focus_id.take().is_some() {
            self.graph_dirty = true;
        }
    }

    pub fn set_clustered(&mut self, clustered: bool) {
        if self.query.clustered != clustered {
            self.query.clustered = clustered;
            self.clustering_dirty = true;
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search_results(&mut self) -> &[SearchHit] {
        let stale = self
            .search_cache
            .as_ref()
            .is_none_or(|cache| cache.query != self.search);

        if stale {
            let hits = search(self.repository.concepts(), &self.search)
                .into_iter()
                .map(SearchHit::from)
                .collect();
            self.search_cache = Some(SearchCache {
                query: self.search.clone(),
                hits,
            });
        }

        self.search_cache
            .as_ref()
            .map(|cache| cache.hits.as_slice())
            .unwrap_or_default()
    }

    /// Jumps into single-concept detail: focus the hit, clear the query, uncluster.
    pub fn select_search_result(&mut self, concept_id: &str) {
        self.focus(concept_id);
        self.search.clear();
        self.set_clustered(false);
    }

    /// Handles a click on a rendered node. Concept nodes become the focus;
    /// cluster nodes belong to the render adapter and yield `None`.
    pub fn select_node(&mut self, node_id: &str) -> Option<NodeSelection> {
        if is_cluster_id(node_id) {
            return None;
        }

        let concept = self.repository.get(node_id)?;
        let selection = NodeSelection {
            concept_id: concept.id.clone(),
            grade_level: concept.grade_level,
            topic_id: concept.topic_id.clone(),
        };

        self.focus(node_id);
        Some(selection)
    }

    pub fn dispatch(
        &self,
        action: NodeAction,
        selection: &NodeSelection,
        handler: &mut impl SelectionHandler,
    ) {
        tracing::debug!(action = action.label(), concept = %selection.concept_id, "dispatching node action");
        handler.handle(action, selection);
    }

    pub fn output(&mut self) -> &GraphOutput {
        if self.graph_dirty {
            self.output = build_output(&self.repository, &self.query);
            self.revision = self.revision.wrapping_add(1);
            self.graph_dirty = false;
            self.clustering_dirty = false;
        } else if self.clustering_dirty {
            self.output.clustering = self.query.clustered.then(|| {
                cluster(&self.output.graph.nodes, &self.repository, CLUSTER_PREVIEW_LIMIT)
            });
            self.clustering_dirty = false;
        }

        &self.output
    }
}
