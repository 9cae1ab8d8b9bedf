//! Concept graph engine: visibility, focus closure, roles, clusters and search.
//!
//! Every operation is a pure function of the concept list and the current
//! inputs. Callers recompute wholesale whenever an input changes.

mod build;
mod classify;
mod cluster;
mod search;
mod trace;

pub use build::{
    GraphOutput, GraphQuery, NodeTooltip, VisibleEdge, VisibleGraph, VisibleNode, build,
    build_output,
};
pub use classify::{Role, classify_edge, classify_node};
pub use cluster::{
    CLUSTER_ID_PREFIX, Cluster, ClusterEdge, ClusterTooltip, Clustering, cluster,
    cluster_node_id, is_cluster_id,
};
pub use search::{MIN_QUERY_CHARS, SearchHit, search};
pub use trace::{FocusState, trace};

pub const DEFAULT_GRADE: u32 = 6;
pub const CLUSTER_PREVIEW_LIMIT: usize = 10;
