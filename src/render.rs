//! Presentation adapter: turns engine output into renderer-ready records.
//!
//! Only this module knows about colours, shapes and widths. The records follow
//! the field names common to hierarchical network renderers.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::engine::{Cluster, GraphOutput, Role, VisibleEdge, VisibleNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub grades: HashMap<u32, Rgb>,
    pub fallback_grade: Rgb,
    pub focused: Rgb,
    pub upstream: Rgb,
    pub downstream: Rgb,
    pub neutral_edge: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grades: HashMap::from([
                (6, Rgb(0xFF, 0xC1, 0x07)),
                (7, Rgb(0x4C, 0xAF, 0x50)),
                (8, Rgb(0x21, 0x96, 0xF3)),
                (9, Rgb(0x9C, 0x27, 0xB0)),
            ]),
            fallback_grade: Rgb(0x9E, 0x9E, 0x9E),
            focused: Rgb(0xFF, 0x57, 0x22),
            upstream: Rgb(0x19, 0x76, 0xD2),
            downstream: Rgb(0x38, 0x8E, 0x3C),
            neutral_edge: Rgb(0xB0, 0xBE, 0xC5),
        }
    }
}

impl Palette {
    pub fn grade_color(&self, level: u32) -> Rgb {
        self.grades
            .get(&level)
            .copied()
            .unwrap_or(self.fallback_grade)
    }

    pub fn node_color(&self, node: &VisibleNode) -> Rgb {
        match node.role {
            Role::Focused => self.focused,
            Role::Upstream => self.upstream,
            Role::Downstream => self.downstream,
            Role::Neutral => self.grade_color(node.grade_level),
        }
    }

    pub fn edge_color(&self, role: Role) -> Rgb {
        match role {
            Role::Upstream | Role::Focused => self.upstream,
            Role::Downstream => self.downstream,
            Role::Neutral => self.neutral_edge,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Box,
    Hexagon,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub color: Rgb,
    pub shape: Shape,
    pub border_width: u32,
    pub font_size: u32,
    /// Hierarchy level for top-down layouts; the grade.
    pub level: u32,
    pub role: Role,
    pub is_cluster: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderEdge {
    pub from: String,
    pub to: String,
    pub color: Rgb,
    pub width: u32,
    pub arrows: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderPayload {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub focused: bool,
    pub clustered: bool,
}

fn concept_tooltip(node: &VisibleNode) -> String {
    if node.tooltip.description.is_empty() {
        node.tooltip.title.clone()
    } else {
        format!("{}\n\n{}", node.tooltip.title, node.tooltip.description)
    }
}

fn cluster_tooltip(cluster: &Cluster) -> String {
    let mut lines = vec![cluster.tooltip.title.clone()];
    lines.extend(cluster.tooltip.preview.iter().map(|title| format!("• {title}")));
    if let Some(more) = cluster.tooltip.more_suffix() {
        lines.push(more);
    }
    lines.join("\n")
}

fn render_node(node: &VisibleNode, palette: &Palette) -> RenderNode {
    let focused = node.role == Role::Focused;

    RenderNode {
        id: node.id.clone(),
        label: node.label.clone(),
        title: concept_tooltip(node),
        color: palette.node_color(node),
        shape: Shape::Box,
        border_width: if focused { 3 } else { 1 },
        font_size: if focused { 18 } else { 14 },
        level: node.grade_level,
        role: node.role,
        is_cluster: false,
    }
}

fn render_cluster(cluster: &Cluster, palette: &Palette) -> RenderNode {
    RenderNode {
        id: cluster.id.clone(),
        label: cluster.label.clone(),
        title: cluster_tooltip(cluster),
        color: palette.grade_color(cluster.grade_level),
        shape: Shape::Hexagon,
        border_width: 2,
        font_size: 16,
        level: cluster.grade_level,
        role: Role::Neutral,
        is_cluster: true,
    }
}

fn render_edge(edge: &VisibleEdge, palette: &Palette) -> RenderEdge {
    RenderEdge {
        from: edge.from.clone(),
        to: edge.to.clone(),
        color: palette.edge_color(edge.role),
        width: if edge.role.is_highlighted() { 2 } else { 1 },
        arrows: "to",
    }
}

pub fn present(output: &GraphOutput, palette: &Palette) -> RenderPayload {
    let graph = &output.graph;

    let Some(clustering) = &output.clustering else {
        return RenderPayload {
            nodes: graph
                .nodes
                .iter()
                .map(|node| render_node(node, palette))
                .collect(),
            edges: graph
                .edges
                .iter()
                .map(|edge| render_edge(edge, palette))
                .collect(),
            focused: graph.is_focused(),
            clustered: false,
        };
    };

    let nodes = clustering
        .clusters()
        .iter()
        .map(|cluster| render_cluster(cluster, palette))
        .collect();
    let edges = clustering
        .collapse_edges(&graph.edges)
        .into_iter()
        .map(|edge| RenderEdge {
            from: edge.from,
            to: edge.to,
            color: palette.neutral_edge,
            width: edge.weight.clamp(1, 6) as u32,
            arrows: "to",
        })
        .collect();

    RenderPayload {
        nodes,
        edges,
        focused: graph.is_focused(),
        clustered: true,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::curriculum::{Concept, ConceptRepository};
    use crate::engine::{GraphQuery, build_output};

    fn repository() -> ConceptRepository {
        ConceptRepository::new(vec![
            Concept::new("a", "Naturals", 6).with_topic("num"),
            Concept::new("b", "Fractions", 6)
                .with_topic("num")
                .with_prior(["a"])
                .with_description("Parts of a whole"),
            Concept::new("c", "Ratios", 10)
                .with_topic("ratio")
                .with_prior(["b"]),
        ])
    }

    #[test]
    fn colours_render_as_hex() {
        assert_eq!(Rgb(0xFF, 0x57, 0x22).to_string(), "#FF5722");
        assert_eq!(serde_json::to_string(&Rgb(1, 2, 3)).unwrap(), "\"#010203\"");
    }

    #[test]
    fn overview_uses_grade_colours() {
        let output = build_output(
            &repository(),
            &GraphQuery {
                selected_grades: [6, 10].into(),
                ..GraphQuery::default()
            },
        );
        let payload = present(&output, &Palette::default());

        let colours = payload
            .nodes
            .iter()
            .map(|node| node.color.to_string())
            .collect::<Vec<_>>();
        assert_eq!(colours, vec!["#FFC107", "#FFC107", "#9E9E9E"]);
        assert_eq!(payload.nodes[1].title, "Fractions\n\nParts of a whole");
        assert!(payload.edges.iter().all(|edge| edge.width == 1));
    }

    #[test]
    fn focus_mode_highlights_paths() {
        let output = build_output(
            &repository(),
            &GraphQuery {
                focus_id: Some("b".to_owned()),
                ..GraphQuery::default()
            },
        );
        let payload = present(&output, &Palette::default());

        let focused = payload.nodes.iter().find(|node| node.id == "b").unwrap();
        assert_eq!(focused.color.to_string(), "#FF5722");
        assert_eq!((focused.border_width, focused.font_size), (3, 18));

        let colours = payload
            .edges
            .iter()
            .map(|edge| (edge.to.as_str(), edge.color.to_string(), edge.width))
            .collect::<Vec<_>>();
        assert_eq!(
            colours,
            vec![
                ("b", "#1976D2".to_owned(), 2),
                ("c", "#388E3C".to_owned(), 2),
            ]
        );
        assert!(payload.focused);
    }

    #[test]
    fn clustered_payload_swaps_members_for_hexagons() {
        let output = build_output(
            &repository(),
            &GraphQuery {
                selected_grades: [6, 10].into(),
                clustered: true,
                ..GraphQuery::default()
            },
        );
        let payload = present(&output, &Palette::default());

        let ids = payload
            .nodes
            .iter()
            .map(|node| node.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["cluster:num", "cluster:ratio"]);
        assert!(payload.nodes.iter().all(|node| node.shape == Shape::Hexagon));
        assert_eq!(payload.nodes[0].title, "[VI] General\n• Naturals\n• Fractions");
        assert_eq!(payload.edges.len(), 1);
        assert_eq!(payload.edges[0].from, "cluster:num");
    }
}
