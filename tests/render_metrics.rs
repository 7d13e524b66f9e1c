use std::collections::HashMap;

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use tilecard::application::tiles::TileRenderer;
use tilecard::domain::tiles::{LinkData, TileData};

#[test]
fn rendering_emits_expected_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let tiles = vec![
        TileData::new("Widget")
            .with_url("/widgets/1")
            .with_links(vec![LinkData::new("Docs", "/docs"), LinkData::new("", "/x")]),
        TileData::new("Gadget").with_links(vec![LinkData::new("Blog", "/blog")]),
    ];
    TileRenderer::new()
        .render_document(&tiles)
        .expect("render document");

    let values: HashMap<String, DebugValue> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite_key, _, _, value)| (composite_key.key().name().to_string(), value))
        .collect();

    let counter = |name: &str| match values.get(name) {
        Some(DebugValue::Counter(value)) => *value,
        other => panic!("expected counter {name}, found {other:?}"),
    };

    assert_eq!(counter("tilecard_tiles_rendered_total"), 2);
    assert_eq!(counter("tilecard_links_rendered_total"), 2);
    assert_eq!(counter("tilecard_links_dropped_total"), 1);
    assert!(
        matches!(
            values.get("tilecard_document_render_ms"),
            Some(DebugValue::Histogram(samples)) if samples.len() == 1
        ),
        "missing metric: tilecard_document_render_ms"
    );
}
