use super::{
    excerpt, NodeId, Outline, OutlineBuilder, OutlineEdge, OutlineOptions, ROOT_ID,
    TRUNCATION_MARKER,
};
use crate::error::Error;
use crate::section::HeadingMarker;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn markers(levels: &[(u8, &str)]) -> Vec<HeadingMarker> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &(level, title))| HeadingMarker::new(level, title, i))
        .collect()
}

fn build(levels: &[(u8, &str)]) -> Outline {
    OutlineBuilder::default()
        .build(&markers(levels), Some("Root"))
        .unwrap()
}

fn edge(from: u32, to: u32) -> OutlineEdge {
    OutlineEdge {
        from: NodeId(from),
        to: NodeId(to),
    }
}

fn group(outline: &Outline, label: &str) -> usize {
    outline
        .nodes
        .iter()
        .find(|n| n.label == label)
        .map(|n| n.color_group)
        .unwrap()
}

fn assert_well_formed(outline: &Outline) {
    let ids: HashSet<NodeId> = outline.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), outline.nodes.len(), "ids are unique");

    let targets: Vec<NodeId> = outline.edges.iter().map(|e| e.to).collect();
    let unique_targets: HashSet<NodeId> = targets.iter().copied().collect();
    assert_eq!(unique_targets.len(), targets.len(), "one incoming edge per node");
    assert!(!unique_targets.contains(&ROOT_ID), "root has no incoming edge");

    let non_root: HashSet<NodeId> = ids.iter().copied().filter(|&id| id != ROOT_ID).collect();
    assert_eq!(unique_targets, non_root);

    // Edges only reference nodes discovered earlier.
    for (i, e) in outline.edges.iter().enumerate() {
        assert!(e.from < e.to, "edge {i} points backwards");
        assert!(ids.contains(&e.from));
    }
}

#[test]
fn test_round_trip_scenario() {
    let outline = build(&[(1, "A"), (2, "B"), (2, "C"), (1, "D")]);

    let labels: Vec<&str> = outline.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["Root", "A", "B", "C", "D"]);
    assert_eq!(
        outline.edges,
        vec![edge(1, 2), edge(2, 3), edge(2, 4), edge(1, 5)]
    );

    assert_eq!(group(&outline, "B"), group(&outline, "C"));
    assert_eq!(group(&outline, "A"), group(&outline, "D"), "siblings share a group");
    assert_ne!(group(&outline, "B"), group(&outline, "A"));
    assert_ne!(group(&outline, "A"), group(&outline, "Root"));
    assert_well_formed(&outline);
}

#[test]
fn test_ancestor_resolution_closes_deeper_sections() {
    let outline = build(&[(1, "a"), (2, "b"), (3, "c"), (2, "d"), (1, "e")]);
    assert_eq!(
        outline.edges,
        vec![edge(1, 2), edge(2, 3), edge(3, 4), edge(2, 5), edge(1, 6)]
    );
}

#[test]
fn test_level_jump_attaches_to_nearest_shallower_heading() {
    let outline = build(&[(1, "a"), (3, "skip"), (2, "b"), (4, "deep")]);
    assert_eq!(
        outline.edges,
        vec![edge(1, 2), edge(2, 3), edge(2, 4), edge(4, 5)]
    );
}

#[test]
fn test_leading_deep_heading_attaches_to_root() {
    let outline = build(&[(3, "deep"), (1, "top")]);
    assert_eq!(outline.edges, vec![edge(1, 2), edge(1, 3)]);
    assert_eq!(group(&outline, "deep"), group(&outline, "top"));
}

#[test]
fn test_well_formed_for_assorted_sequences() {
    let sequences: [&[u8]; 5] = [
        &[],
        &[1],
        &[6, 5, 4, 3, 2, 1],
        &[1, 2, 3, 4, 5, 6, 1, 2, 3],
        &[2, 2, 4, 1, 6, 3, 3, 1, 5],
    ];
    for levels in sequences {
        let input: Vec<HeadingMarker> = levels
            .iter()
            .enumerate()
            .map(|(i, &l)| HeadingMarker::new(l, format!("h{i}"), i))
            .collect();
        let outline = OutlineBuilder::default().build(&input, None).unwrap();
        assert_eq!(outline.nodes.len(), levels.len() + 1);
        assert_well_formed(&outline);
    }
}

#[test]
fn test_children_of_one_parent_share_colour() {
    let outline = build(&[(1, "a"), (2, "x"), (3, "deep"), (2, "y"), (2, "z")]);
    let x = group(&outline, "x");
    assert_eq!(group(&outline, "y"), x);
    assert_eq!(group(&outline, "z"), x);
    assert_ne!(group(&outline, "deep"), x);
    let node = outline.nodes.iter().find(|n| n.label == "y").unwrap();
    assert_eq!(node.color, OutlineOptions::default().palette.css(x));
}

#[test]
fn test_invalid_level_aborts_build() {
    let err = OutlineBuilder::default()
        .build(&markers(&[(1, "ok"), (7, "bad")]), None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLevel { position: 1, level: 7 }));

    let err = OutlineBuilder::default()
        .build(&markers(&[(0, "zero")]), None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLevel { position: 0, level: 0 }));
}

#[test]
fn test_invalid_level_reports_marker_position() {
    // Markers cut from the middle of a document keep their own positions.
    let input = vec![
        HeadingMarker::new(2, "kept", 40),
        HeadingMarker::new(8, "bad", 41),
    ];
    let err = OutlineBuilder::default().build(&input, None).unwrap_err();
    assert!(matches!(err, Error::InvalidLevel { position: 41, level: 8 }));

    let err = super::validate_markers(&input[1..]).unwrap_err();
    assert!(matches!(err, Error::InvalidLevel { position: 41, .. }));
}

#[test]
fn test_missing_root_label_falls_back_to_default() {
    let builder = OutlineBuilder::default();
    let blank = builder.build(&[], Some("   ")).unwrap();
    let none = builder.build(&[], None).unwrap();
    assert_eq!(blank.nodes[0].label, "Root");
    assert_eq!(none.nodes[0].label, "Root");
    assert_eq!(blank.nodes[0].id, ROOT_ID);
    assert_eq!(blank.nodes[0].color_group, 0);
}

#[test]
fn test_excerpt_keeps_whole_units_within_budget() {
    let body = vec!["aaaa".to_string(), "bbbb".to_string(), "cccc".to_string()];

    // 4 + 2 (separator) + 4 = 10 fits, the third unit would reach 16.
    assert_eq!(excerpt(&body, 12).as_deref(), Some("aaaa\n\nbbbb..."));
    assert_eq!(excerpt(&body, 16).as_deref(), Some("aaaa\n\nbbbb\n\ncccc"));
    assert_eq!(excerpt(&body, 3).as_deref(), Some(TRUNCATION_MARKER));
    assert_eq!(excerpt(&[], 10), None);
}

#[test]
fn test_excerpt_separators_count_towards_budget() {
    let body = vec!["aaaa".to_string(), "bbbb".to_string()];
    // Unit text alone is 8 characters; with the separator it is 10.
    assert_eq!(excerpt(&body, 9).as_deref(), Some("aaaa..."));
    assert_eq!(excerpt(&body, 10).as_deref(), Some("aaaa\n\nbbbb"));
}

#[test]
fn test_excerpt_never_exceeds_budget_plus_marker() {
    let body: Vec<String> = (1..40).map(|n| "x".repeat(n * 7)).collect();
    for budget in [1, 10, 50, 200, 2000] {
        let text = excerpt(&body, budget).unwrap();
        assert!(text.chars().count() <= budget + TRUNCATION_MARKER.len());
        for piece in text.split("\n\n") {
            let unit = piece.strip_suffix(TRUNCATION_MARKER).unwrap_or(piece);
            if unit.is_empty() {
                continue;
            }
            assert!(body.iter().any(|b| b == unit), "unit {unit:?} was cut");
        }
    }
}

#[test]
fn test_nodes_carry_excerpts_and_positions() {
    let input = vec![
        HeadingMarker::new(1, "A", 0).with_body(["intro"]),
        HeadingMarker::new(2, "B", 1),
    ];
    let outline = OutlineBuilder::default().build(&input, None).unwrap();
    assert_eq!(outline.nodes[1].excerpt.as_deref(), Some("intro"));
    assert_eq!(outline.nodes[2].excerpt, None);
    assert_eq!(outline.nodes[0].position, None);
    assert_eq!(outline.nodes[2].position, Some(1));
}

#[test]
fn test_outline_queries() {
    let outline = build(&[(1, "a"), (2, "b"), (1, "c")]);
    assert_eq!(outline.node(NodeId(3)).map(|n| n.label.as_str()), Some("b"));
    assert!(outline.node(NodeId(0)).is_none());
    assert!(outline.node(NodeId(9)).is_none());
    assert_eq!(outline.parent_of(NodeId(3)), Some(NodeId(2)));
    assert_eq!(outline.parent_of(ROOT_ID), None);
    assert_eq!(outline.depth_of(NodeId(3)), 2);
    assert_eq!(
        outline.depth_first(),
        vec![ROOT_ID, NodeId(2), NodeId(3), NodeId(4)]
    );
    assert_eq!(outline.index_of(NodeId(4)), Some(3));
    assert_eq!(outline.index_of(NodeId(5)), None);
    assert_eq!(
        outline.child_lists(),
        vec![vec![NodeId(2), NodeId(4)], vec![NodeId(3)], vec![], vec![]]
    );
}

#[test]
fn test_queries_on_large_outline() {
    let levels: Vec<(u8, &str)> = (0..3000)
        .map(|i| (if i % 3 == 0 { 1 } else { 2 }, "h"))
        .collect();
    let outline = build(&levels);

    let order = outline.depth_first();
    assert_eq!(order.len(), outline.nodes.len());
    assert_eq!(outline.parent_of(NodeId(3)), Some(NodeId(2)));
    assert_eq!(outline.parent_of(NodeId(5)), Some(ROOT_ID));
    assert_eq!(outline.depth_of(NodeId(3001)), 2);
}

#[test]
fn test_outline_serialises_for_graph_renderers() {
    let outline = build(&[(1, "A")]);
    let json = serde_json::to_value(&outline).unwrap();
    assert_eq!(json["nodes"][0]["id"], 1);
    assert_eq!(json["nodes"][1]["label"], "A");
    assert_eq!(json["nodes"][1]["color"], "rgb(102, 255, 102)");
    assert!(json["nodes"][1].get("excerpt").is_none());
    assert!(json["nodes"][1].get("position").is_none());
    assert_eq!(json["edges"][0]["from"], 1);
    assert_eq!(json["edges"][0]["to"], 2);
}
