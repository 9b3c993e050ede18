//! Tests for the scripted backend and memory sink.

use deckcrew_core::{
    Agent, Backend, Sink, Variables,
    testing::{MemorySink, ScriptedBackend},
};

#[tokio::test]
async fn scripted_backend_records_calls() {
    let backend = ScriptedBackend::by_role([("Writer", "DRAFT")]);
    let persona = Agent::new("Writer").persona(&Variables::new()).unwrap();

    let out = backend.complete(&persona, "write", "a deck").await.unwrap();
    assert_eq!(out, "DRAFT");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].description, "write");
    assert_eq!(calls[0].expected_output, "a deck");
}

#[tokio::test]
async fn scripted_backend_fails_for_unscripted_role() {
    let backend = ScriptedBackend::by_role([("Writer", "DRAFT")]);
    let persona = Agent::new("Editor").persona(&Variables::new()).unwrap();
    assert!(backend.complete(&persona, "", "").await.is_err());
    assert_eq!(backend.roles(), vec!["Editor"]);
}

#[tokio::test]
async fn memory_sink_stores_and_fails() {
    let sink = MemorySink::new();
    sink.write("out/deck.md", "# Deck").await.unwrap();
    assert_eq!(sink.get("out/deck.md").as_deref(), Some("# Deck"));

    let failing = MemorySink::failing();
    assert!(failing.write("out/deck.md", "# Deck").await.is_err());
    assert!(failing.get("out/deck.md").is_none());
}
