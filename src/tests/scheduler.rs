use super::{IncrementalBuild, Progress, DEFAULT_CHUNK_SIZE};
use crate::error::Error;
use crate::outline::{OutlineBuilder, OutlineOptions, ROOT_ID};
use crate::section::HeadingMarker;
use pretty_assertions::assert_eq;

fn markers(count: usize) -> Vec<HeadingMarker> {
    let levels = [1, 2, 3, 3, 2, 4, 1, 2, 6, 5, 1, 3];
    (0..count)
        .map(|i| {
            HeadingMarker::new(levels[i % levels.len()], format!("h{i}"), i)
                .with_body([format!("body of h{i}")])
        })
        .collect()
}

fn incremental(count: usize, chunk_size: usize) -> IncrementalBuild {
    IncrementalBuild::new(
        OutlineOptions::default(),
        markers(count),
        Some("Doc"),
        chunk_size,
    )
    .unwrap()
}

#[test]
fn test_chunk_size_does_not_change_result() {
    let mut by_five = incremental(23, DEFAULT_CHUNK_SIZE);
    let mut by_one = incremental(23, 1);

    assert_eq!(by_five.run_to_completion().unwrap(), Progress::Complete);
    assert_eq!(by_one.run_to_completion().unwrap(), Progress::Complete);
    assert_eq!(by_five.outline(), by_one.outline());

    let one_shot = OutlineBuilder::default()
        .build(&markers(23), Some("Doc"))
        .unwrap();
    assert_eq!(by_five.into_outline(), one_shot);
}

#[test]
fn test_each_turn_processes_one_chunk() {
    let mut build = incremental(12, 5);
    assert!(build.is_processing());
    assert_eq!(build.outline().nodes.len(), 1, "root exists before any turn");

    assert_eq!(
        build.turn().unwrap(),
        Progress::Pending {
            processed: 5,
            total: 12
        }
    );
    assert_eq!(build.outline().nodes.len(), 6);
    assert_eq!(build.outline().edges.len(), 5);

    assert_eq!(
        build.turn().unwrap(),
        Progress::Pending {
            processed: 10,
            total: 12
        }
    );
    assert_eq!(build.turn().unwrap(), Progress::Complete);
    assert!(!build.is_processing());
    assert!(build.is_complete());
    assert_eq!(build.outline().nodes.len(), 13);

    // Further turns are harmless.
    assert_eq!(build.turn().unwrap(), Progress::Complete);
    assert_eq!(build.outline().nodes.len(), 13);
}

#[test]
fn test_cancel_halts_before_next_turn() {
    let mut build = incremental(12, 5);
    build.turn().unwrap();
    build.cancel();

    assert!(!build.is_processing());
    assert_eq!(build.turn().unwrap(), Progress::Cancelled);
    assert_eq!(build.run_to_completion().unwrap(), Progress::Cancelled);
    assert_eq!(build.outline().nodes.len(), 6);
    assert!(!build.is_complete());

    // The partial outline is still a connected tree.
    let outline = build.outline();
    assert!(outline.edges.iter().all(|e| e.to != ROOT_ID));
    assert!(outline
        .edges
        .iter()
        .all(|e| outline.node(e.from).is_some() && outline.node(e.to).is_some()));
}

#[test]
fn test_empty_input_completes_in_one_turn() {
    let mut build = incremental(0, 5);
    assert_eq!(build.turn().unwrap(), Progress::Complete);
    assert_eq!(build.outline().nodes.len(), 1);
    assert_eq!(build.outline().nodes[0].label, "Doc");
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    let err = IncrementalBuild::new(OutlineOptions::default(), markers(3), None, 0).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_invalid_marker_rejected_before_any_turn() {
    let mut input = markers(8);
    input[6].level = 9;
    let err = IncrementalBuild::new(OutlineOptions::default(), input, None, 5).unwrap_err();
    assert!(matches!(err, Error::InvalidLevel { position: 6, level: 9 }));
}
