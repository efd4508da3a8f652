//! Property-based tests for graph detection.
//!
//! Uses proptest to generate random records and verify detector invariants.

use proptest::prelude::*;
use std::path::Path;

use dotpty_detector::testing::RecordingRenderer;
use dotpty_detector::{
    compact_kind, output_path, DetectionPipeline, GraphDetector, GraphRecorder, PatternDetector,
    StructuredDetector,
};

/// Label text in front of the trailing `Graph`.
fn label_prefix() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _]{0,16}".prop_filter("no earlier Graph", |s| !s.contains("Graph"))
}

/// Arbitrary kind names that contain `Graph`.
fn graph_kind() -> impl Strategy<Value = String> {
    ("\\PC{0,8}", "\\PC{0,8}").prop_map(|(a, b)| format!("{a}Graph{b}"))
}

proptest! {
    /// Detectors never panic on arbitrary bytes.
    #[test]
    fn detectors_never_panic(record in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = StructuredDetector::new().detect(&record);
        let _ = PatternDetector::new().detect(&record);
        let _ = DetectionPipeline::with_default_detectors().detect(&record);
    }

    /// Arbitrary text after `digraph` never trips up the pattern.
    #[test]
    fn pattern_never_panics_on_digraph_prefix(tail in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut record = b"digraph ".to_vec();
        record.extend_from_slice(&tail);
        let _ = PatternDetector::new().detect(&record);
    }

    /// Any JSON object with a Graph name and string data is detected verbatim.
    #[test]
    fn structured_records_carry_name_and_data(kind in graph_kind(), data in "\\PC{0,64}") {
        let record = serde_json::json!({ "name": kind, "data": data }).to_string();

        let candidate = StructuredDetector::new().detect(record.as_bytes()).unwrap();
        prop_assert_eq!(candidate.kind, kind);
        prop_assert_eq!(candidate.source, data.into_bytes());
    }

    /// Names without `Graph` are never detected, whatever the data.
    #[test]
    fn structured_requires_graph_in_name(
        name in "[a-z ]{0,16}",
        data in "\\PC{0,32}",
    ) {
        let record = serde_json::json!({ "name": name, "data": data }).to_string();
        prop_assert!(StructuredDetector::new().detect(record.as_bytes()).is_none());
    }

    /// Quoted and HTML-like labels yield the label text as the kind.
    #[test]
    fn pattern_extracts_label(prefix in label_prefix(), body in "[a-z>;]{0,16}") {
        let kind = format!("{prefix}Graph");

        let quoted = format!("digraph G {{ label=\"{kind}\"; {body} }}");
        let candidate = PatternDetector::new().detect(quoted.as_bytes()).unwrap();
        prop_assert_eq!(&candidate.kind, &kind);
        prop_assert_eq!(candidate.source, quoted.as_bytes().to_vec());

        let html = format!("digraph G {{ label=<<b>{kind}</b>>; {body} }}");
        let candidate = PatternDetector::new().detect(html.as_bytes()).unwrap();
        prop_assert_eq!(&candidate.kind, &kind);
    }

    /// Output file names never contain whitespace and carry the sequence from 2 on.
    #[test]
    fn output_names(kind in "[A-Za-z0-9 \\t-]{1,24}", seq in 1usize..1000) {
        let path = output_path(Path::new("out"), &kind, seq, "png");
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();

        prop_assert!(!compact_kind(&kind).chars().any(char::is_whitespace));
        if seq == 1 {
            prop_assert_eq!(file_name, format!("{}.png", compact_kind(&kind)));
        } else {
            prop_assert_eq!(file_name, format!("{}-{}.png", compact_kind(&kind), seq));
        }
    }

    /// Re-feeding the same record renders it again with the next sequence number.
    #[test]
    fn duplicates_are_not_suppressed(repeats in 1usize..8) {
        let mut recorder = GraphRecorder::new("out", RecordingRenderer::new());
        let record = br#"{"name": "FooGraph", "data": "digraph{}"}"#;

        for _ in 0..repeats {
            recorder.classify_and_maybe_render(record).unwrap();
        }

        let calls = recorder.renderer().calls();
        prop_assert_eq!(calls.len(), repeats);
        for (i, call) in calls.iter().enumerate() {
            prop_assert_eq!(&call.output, &output_path(Path::new("out"), "FooGraph", i + 1, "png"));
        }
        prop_assert_eq!(recorder.counts().get("FooGraph"), repeats);
    }
}
