// src/filter/mod.rs

pub mod clickable;
pub mod escape;
pub mod pipeline;
pub mod sanitize;
pub mod strip;

pub use escape::QuoteStyle;
pub use pipeline::{COMMENT_TEXT, FilterPolicy, Pipeline, PipelineOptions, StageOutput, Step};
