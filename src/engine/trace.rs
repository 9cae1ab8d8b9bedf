use std::collections::{HashMap, HashSet};

use crate::curriculum::Concept;

/// Upstream and downstream closure around one focused concept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusState {
    pub focus: String,
    pub upstream: HashSet<String>,
    pub downstream: HashSet<String>,
}

impl FocusState {
    pub fn is_focus(&self, id: &str) -> bool {
        self.focus == id
    }

    pub fn is_upstream(&self, id: &str) -> bool {
        self.upstream.contains(id)
    }

    pub fn is_downstream(&self, id: &str) -> bool {
        self.downstream.contains(id)
    }

    /// Membership in `{focus} ∪ upstream ∪ downstream`.
    pub fn contains(&self, id: &str) -> bool {
        self.is_focus(id) || self.is_upstream(id) || self.is_downstream(id)
    }

    pub fn active(&self) -> HashSet<&str> {
        std::iter::once(self.focus.as_str())
            .chain(self.upstream.iter().map(String::as_str))
            .chain(self.downstream.iter().map(String::as_str))
            .collect()
    }

    pub(crate) fn on_upstream_path(&self, id: &str) -> bool {
        self.is_focus(id) || self.is_upstream(id)
    }

    pub(crate) fn on_downstream_path(&self, id: &str) -> bool {
        self.is_focus(id) || self.is_downstream(id)
    }
}

type Adjacency<'a> = HashMap<&'a str, Vec<&'a str>>;

fn adjacency(concepts: &[Concept]) -> (Adjacency<'_>, Adjacency<'_>) {
    let mut parents_of: Adjacency<'_> = HashMap::with_capacity(concepts.len());
    let mut children_of: Adjacency<'_> = HashMap::with_capacity(concepts.len());

    for concept in concepts {
        if parents_of.contains_key(concept.id.as_str()) {
            continue;
        }

        parents_of.insert(
            concept.id.as_str(),
            concept
                .prior_knowledge_ids
                .iter()
                .map(String::as_str)
                .collect(),
        );
        for prior_id in &concept.prior_knowledge_ids {
            children_of
                .entry(prior_id.as_str())
                .or_default()
                .push(concept.id.as_str());
        }
    }

    (parents_of, children_of)
}

fn walk(adjacency: &Adjacency<'_>, focus_id: &str) -> HashSet<String> {
    let mut reached = HashSet::new();
    let mut stack = vec![focus_id];

    while let Some(current) = stack.pop() {
        let Some(next_ids) = adjacency.get(current) else {
            continue;
        };

        for &next_id in next_ids {
            if next_id == focus_id || reached.contains(next_id) {
                continue;
            }

            reached.insert(next_id.to_owned());
            stack.push(next_id);
        }
    }

    reached
}

/// Collects every ancestor and descendant of `focus_id` under the prerequisite relation.
///
/// The walk is iterative with a visited set, so cyclic data terminates with a
/// finite closure. Prerequisite ids with no matching concept are kept as dead ends.
pub fn trace(concepts: &[Concept], focus_id: &str) -> FocusState {
    let (parents_of, children_of) = adjacency(concepts);

    let upstream = walk(&parents_of, focus_id);
    let downstream = walk(&children_of, focus_id);

    tracing::debug!(
        focus = focus_id,
        upstream = upstream.len(),
        downstream = downstream.len(),
        "traced focus closure"
    );

    FocusState {
        focus: focus_id.to_owned(),
        upstream,
        downstream,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| (*id).to_owned()).collect()
    }

    #[test]
    fn linear_chain_splits_around_focus() {
        let concepts = vec![
            Concept::new("x1", "One", 6),
            Concept::new("x2", "Two", 7).with_prior(["x1"]),
            Concept::new("x3", "Three", 8).with_prior(["x2"]),
        ];

        let state = trace(&concepts, "x2");

        assert_eq!(state.upstream, set(&["x1"]));
        assert_eq!(state.downstream, set(&["x3"]));
        assert_eq!(state.active(), HashSet::from(["x1", "x2", "x3"]));
    }

    #[test]
    fn follows_diamonds_transitively() {
        let concepts = vec![
            Concept::new("root", "Root", 6),
            Concept::new("left", "Left", 7).with_prior(["root"]),
            Concept::new("right", "Right", 7).with_prior(["root"]),
            Concept::new("join", "Join", 8).with_prior(["left", "right"]),
            Concept::new("leaf", "Leaf", 9).with_prior(["join"]),
        ];

        let from_leaf = trace(&concepts, "leaf");
        assert_eq!(from_leaf.upstream, set(&["root", "left", "right", "join"]));
        assert!(from_leaf.downstream.is_empty());

        let from_root = trace(&concepts, "root");
        assert!(from_root.upstream.is_empty());
        assert_eq!(from_root.downstream, set(&["left", "right", "join", "leaf"]));
    }

    #[test]
    fn two_cycle_terminates() {
        let concepts = vec![
            Concept::new("A", "A", 6).with_prior(["B"]),
            Concept::new("B", "B", 6).with_prior(["A"]),
        ];

        let state = trace(&concepts, "A");

        assert_eq!(state.upstream, set(&["B"]));
        assert_eq!(state.downstream, set(&["B"]));
    }

    #[test]
    fn dangling_prerequisites_are_dead_ends() {
        let concepts = vec![Concept::new("a", "A", 6).with_prior(["ghost"])];

        let state = trace(&concepts, "a");

        assert_eq!(state.upstream, set(&["ghost"]));
        assert!(state.downstream.is_empty());
    }

    #[test]
    fn unknown_focus_is_a_lone_id() {
        let concepts = vec![Concept::new("a", "A", 6)];

        let state = trace(&concepts, "nope");

        assert!(state.upstream.is_empty());
        assert!(state.downstream.is_empty());
        assert_eq!(state.active(), HashSet::from(["nope"]));
    }

    #[test]
    fn self_reference_never_enters_closure() {
        let concepts = vec![Concept::new("a", "A", 6).with_prior(["a"])];

        let state = trace(&concepts, "a");

        assert!(state.upstream.is_empty());
        assert!(state.downstream.is_empty());
    }
}
