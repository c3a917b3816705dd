//! Scripted fetch/reframe flows against a mock completion service.

use reframe_core::{FactError, LayoutMode, NodeKind, TestHarness};

#[tokio::test]
async fn test_fetch_three_reframes_then_new_fact() {
    let mut harness = TestHarness::new();
    harness
        .queue_text("Tardigrades survived 10 days of open space exposure in 2007.")
        .queue_text("Tardigrades as tiny glass-sealed ampoules.")
        .queue_text("A survival curve with a 10-day plateau.")
        .queue_text("A landscape of dormant micro-deserts.")
        .queue_text("Solar panels in Chile produced 1,000 GWh in 2023.");

    harness.fetch().await.unwrap();
    for lens in ["Chemistry", "Mathematics", "Geography"] {
        harness.reframe(lens).await.unwrap();
    }
    assert_eq!(harness.reframed_count(), 3);

    let graph = harness.canvas.graph();
    assert_eq!(
        graph.badge_text(2).unwrap(),
        "Fact . chemistry. mathematics. geography"
    );

    let old_id = graph.original().unwrap().id();
    harness.fetch().await.unwrap();

    let graph = harness.canvas.graph();
    assert_eq!(graph.reframed().len(), 0);
    assert_ne!(graph.original().unwrap().id(), old_id);
    assert_eq!(
        graph.original().unwrap().text(),
        "Solar panels in Chile produced 1,000 GWh in 2023."
    );
}

#[tokio::test]
async fn test_duplicate_fact_leaves_canvas_alone() {
    let mut harness = TestHarness::new();
    harness
        .queue_text("Global sea level rose 10 cm between 1993 and 2023.")
        .queue_text("Global sea level rose 10 cm between 1993 and 2023!");

    let first = harness.fetch().await.unwrap();
    let err = harness.fetch().await.unwrap_err();

    assert_eq!(err, FactError::DuplicateContent);
    assert_eq!(harness.canvas.graph().original().unwrap().text(), first);
}

#[tokio::test]
async fn test_upstream_failure_keeps_previous_reframes() {
    let mut harness = TestHarness::with_mode(LayoutMode::Stacked);
    harness
        .queue_text("CRISPR edits reached 90% efficiency in 2022 trials.")
        .queue_text("Editing as precise typography.")
        .queue_error("upstream timed out");

    harness.fetch().await.unwrap();
    harness.reframe("Design").await.unwrap();
    let err = harness.reframe("Art").await.unwrap_err();

    assert!(matches!(err, FactError::UpstreamFailure(_)));
    assert_eq!(harness.reframed_count(), 1);
    assert_eq!(harness.canvas.graph().reframed()[0].lens(), Some("Design"));
}

#[tokio::test]
async fn test_reframe_prompt_uses_original_text_and_lens() {
    let mut harness = TestHarness::new();
    harness
        .queue_text("Octopuses have 500 million neurons.")
        .queue_text("A distributed controller with eight subprocessors.");

    harness.fetch().await.unwrap();
    harness.reframe("Engineering").await.unwrap();

    let prompts = harness.mock.prompts();
    assert!(prompts[1].contains("Octopuses have 500 million neurons."));
    assert!(prompts[1].contains("Engineering"));
}

#[tokio::test]
async fn test_scene_after_flow() {
    let mut harness = TestHarness::new();
    harness
        .queue_text("Bees can recognise 4 distinct human faces.")
        .queue_text("Faces as pollen maps.");

    harness.fetch().await.unwrap();
    harness.reframe("Art").await.unwrap();

    let scene = harness
        .canvas
        .scene(&reframe_core::MonospaceMeasure::new(8.0));
    assert_eq!(scene.nodes.len(), 2);
    assert_eq!(scene.edges.len(), 1);
    let reframed = scene
        .nodes
        .iter()
        .find(|n| n.kind == NodeKind::Reframed)
        .unwrap();
    assert_eq!(reframed.badge.as_deref(), Some("Fact . art"));
    assert!(!reframed.lines.is_empty());
}
