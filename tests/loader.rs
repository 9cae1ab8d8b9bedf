//! End-to-end: load the fixture curriculum and drive the view-model.

use std::path::Path;

use curriculum_graph::curriculum::progression;
use curriculum_graph::render::{Palette, present};
use curriculum_graph::{GraphView, Role, load_repository};
use pretty_assertions::assert_eq;

fn fixture() -> GraphView {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/curriculum.json");
    GraphView::new(load_repository(&path).unwrap())
}

#[test]
fn overview_defaults_to_grade_six() {
    let mut view = fixture();
    let output = view.output();

    let labels = output
        .graph
        .nodes
        .iter()
        .map(|node| node.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["природни броеви", "дропки", "Агли"]);
    assert_eq!(output.graph.edges.len(), 1);
}

#[test]
fn search_then_focus_shows_the_causal_chain() {
    let mut view = fixture();
    view.set_clustered(true);
    view.set_search("pyth");

    let hit = view.search_results()[0].clone();
    assert_eq!((hit.id.as_str(), hit.grade_level), ("g8-pythagoras", 8));
    view.select_search_result(&hit.id);

    let output = view.output();
    let roles = output
        .graph
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node.role))
        .collect::<Vec<_>>();
    assert_eq!(
        roles,
        vec![
            ("g6-naturals", Role::Upstream),
            ("g6-fractions", Role::Upstream),
            ("g6-angles", Role::Upstream),
            ("g7-fractions", Role::Upstream),
            ("g8-pythagoras", Role::Focused),
        ]
    );
    assert!(output.clustering.is_none());
    assert!(
        output
            .graph
            .edges
            .iter()
            .all(|edge| edge.role == Role::Upstream)
    );
}

#[test]
fn clustered_overview_groups_topics_across_grades() {
    let mut view = fixture();
    view.set_grades([6, 7, 8]);
    view.set_clustered(true);

    let payload = present(view.output(), &Palette::default());
    let labels = payload
        .nodes
        .iter()
        .map(|node| node.label.as_str())
        .collect::<Vec<_>>();

    assert_eq!(
        labels,
        vec![
            "[VI] Броеви\n(2 concepts)",
            "[VI] Геометрија\n(1 concepts)",
            "[VII] Операции со броеви\n(1 concepts)",
            "[VIII] Геометрија\n(1 concepts)",
        ]
    );
    assert_eq!(payload.edges.len(), 3);
}

#[test]
fn fraction_progression_spans_grades() {
    let view = fixture();
    let steps = progression(view.repository(), "g6-fractions")
        .into_iter()
        .map(|step| step.grade_level)
        .collect::<Vec<_>>();

    assert_eq!(steps, vec![6, 7]);
}
