//! docgrade - documentation grading for extracted code entities
//!
//! Consumes the entity records emitted by a documentation extractor
//! (`jsdoc -X` and compatible tools), builds a language-agnostic entity
//! model, evaluates a weighted role catalog against every entity and rolls
//! the results up into per-entity and project grades.

pub mod config;
pub mod docstring;
pub mod entity;
pub mod hierarchy;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod roles;
pub mod scoring;

pub use models::{Evaluation, Grade};
pub use pipeline::Pipeline;
