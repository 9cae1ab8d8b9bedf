use serde::Serialize;

use super::trace::FocusState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Focused,
    Upstream,
    Downstream,
    #[default]
    Neutral,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Focused => "focused",
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
            Self::Neutral => "neutral",
        }
    }

    pub fn is_highlighted(self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

/// Without a focus every node is `Neutral`; colour then comes from its grade.
pub fn classify_node(id: &str, focus: Option<&FocusState>) -> Role {
    let Some(focus) = focus else {
        return Role::Neutral;
    };

    if focus.is_focus(id) {
        Role::Focused
    } else if focus.is_upstream(id) {
        Role::Upstream
    } else if focus.is_downstream(id) {
        Role::Downstream
    } else {
        Role::Neutral
    }
}

/// An edge is coloured only when both endpoints sit on the same causal path
/// through the focus. The upstream path wins if both apply.
pub fn classify_edge(from: &str, to: &str, focus: Option<&FocusState>) -> Role {
    let Some(focus) = focus else {
        return Role::Neutral;
    };

    if focus.on_upstream_path(from) && focus.on_upstream_path(to) {
        Role::Upstream
    } else if focus.on_downstream_path(from) && focus.on_downstream_path(to) {
        Role::Downstream
    } else {
        Role::Neutral
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn focus_state() -> FocusState {
        FocusState {
            focus: "f".to_owned(),
            upstream: HashSet::from(["u1".to_owned(), "u2".to_owned()]),
            downstream: HashSet::from(["d1".to_owned()]),
        }
    }

    #[test]
    fn nodes_without_focus_are_neutral() {
        assert_eq!(classify_node("anything", None), Role::Neutral);
        assert_eq!(classify_edge("a", "b", None), Role::Neutral);
    }

    #[test]
    fn nodes_follow_focus_sets() {
        let state = focus_state();

        assert_eq!(classify_node("f", Some(&state)), Role::Focused);
        assert_eq!(classify_node("u2", Some(&state)), Role::Upstream);
        assert_eq!(classify_node("d1", Some(&state)), Role::Downstream);
        assert_eq!(classify_node("other", Some(&state)), Role::Neutral);
    }

    #[test]
    fn edges_need_both_endpoints_on_one_path() {
        let state = focus_state();

        assert_eq!(classify_edge("u1", "f", Some(&state)), Role::Upstream);
        assert_eq!(classify_edge("u1", "u2", Some(&state)), Role::Upstream);
        assert_eq!(classify_edge("f", "d1", Some(&state)), Role::Downstream);
        // touches both sides but lies on neither path
        assert_eq!(classify_edge("u1", "d1", Some(&state)), Role::Neutral);
    }

    #[test]
    fn upstream_path_wins_on_cycles() {
        let state = FocusState {
            focus: "A".to_owned(),
            upstream: HashSet::from(["B".to_owned()]),
            downstream: HashSet::from(["B".to_owned()]),
        };

        assert_eq!(classify_edge("B", "A", Some(&state)), Role::Upstream);
        assert_eq!(classify_edge("A", "B", Some(&state)), Role::Upstream);
    }
}
