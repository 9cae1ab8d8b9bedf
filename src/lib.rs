//! Curriculum concept graph engine.
//!
//! Loads concepts annotated with cross-grade prerequisites and derives the
//! navigable dependency graph: grade-filtered overview, single-concept focus
//! closure, node/edge roles, topic clusters and title search.

pub mod curriculum;
pub mod engine;
pub mod render;
pub mod view;

mod util;

pub use curriculum::{Concept, ConceptRepository, load_repository, parse_repository};
pub use engine::{FocusState, GraphOutput, GraphQuery, Role, VisibleEdge, VisibleGraph, VisibleNode};
pub use util::{base_title, roman_grade, short_label};
pub use view::{GraphView, NodeAction, NodeSelection, SelectionHandler};
