//! Core types and traits for the Deckcrew orchestrator.
//!
//! Agents and tasks are pure data: an [`Agent`] describes a persona with
//! `{placeholder}` templates, a [`Task`] binds a description template to one
//! agent and names the upstream tasks whose outputs it consumes. The
//! completion capability and the artifact store are reached through the
//! [`Backend`] and [`Sink`] traits; the engine that drives them lives in
//! the runtime crate.

pub use {
    agent::{Agent, Persona},
    backend::Backend,
    error::{Error, Result},
    sink::Sink,
    task::{Task, TaskId},
    template::{CONTEXT, Variables, placeholders, render},
};

mod agent;
mod backend;
mod error;
mod sink;
mod task;
pub mod template;
#[cfg(feature = "testing")]
pub mod testing;
