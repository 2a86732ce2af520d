//! todo-cli - A local todo tracker with dependencies and work timing
//!
//! Todos move through a small state machine (start, pause, resume, complete,
//! reopen) that tracks worked time, and can depend on each other. Dependency
//! edges are kept acyclic and gate completion.

pub mod domain;
pub mod storage;
pub mod service;
pub mod cli;

pub use domain::{Todo, TodoId, TodoStatus, WorkState};
