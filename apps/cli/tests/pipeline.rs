//! Tests for the bundled pipeline and pipeline selection.

use deckcrew_cli::{cmd::pipeline::describe, pipeline};
use std::fs;

#[test]
fn bundled_pipeline_is_valid() {
    let builder = pipeline::bundled().unwrap();
    builder.validate().unwrap();

    let roles: Vec<_> = builder
        .defined_agents()
        .iter()
        .map(|a| a.role.as_str())
        .collect();
    assert_eq!(roles, vec!["Content Planner", "Content Writer", "Editor"]);

    let ids: Vec<_> = builder
        .defined_tasks()
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["plan", "write", "edit"]);
}

#[test]
fn bundled_pipeline_needs_topic_and_language() {
    let builder = pipeline::bundled().unwrap();
    let vars: Vec<_> = builder.required_variables().into_iter().collect();
    assert_eq!(vars, vec!["language", "topic"]);
}

#[test]
fn bundled_tasks_pass_context_explicitly() {
    let builder = pipeline::bundled().unwrap();
    let tasks = builder.defined_tasks();
    assert!(!tasks[0].description.contains("{context}"));
    assert!(tasks[1].description.ends_with("{context}"));
    assert!(tasks[2].description.ends_with("{context}"));
    assert!(tasks[0].expected_output.starts_with("A detailed content plan"));
}

#[test]
fn describe_lists_agents_tasks_and_variables() {
    let text = describe(&pipeline::bundled().unwrap());
    assert!(text.contains("  Content Planner (verbose)\n"));
    assert!(text.contains("  write -> Content Writer (after plan)\n"));
    assert!(text.ends_with("variables: language, topic\n"));
}

#[test]
fn custom_pipeline_directory_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("agents")).unwrap();
    fs::create_dir_all(dir.path().join("tasks")).unwrap();
    fs::write(
        dir.path().join("agents").join("poet.md"),
        "---\nrole: Poet\n---\nYou write verse about {topic}.",
    )
    .unwrap();
    fs::write(
        dir.path().join("tasks").join("01-poem.md"),
        "---\nid: poem\nagent: Poet\n---\nWrite a poem.",
    )
    .unwrap();

    let builder = pipeline::load(Some(dir.path())).unwrap();
    builder.validate().unwrap();
    assert_eq!(builder.defined_tasks().len(), 1);
}

#[test]
fn missing_pipeline_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(pipeline::load(Some(&dir.path().join("absent"))).is_err());
}
