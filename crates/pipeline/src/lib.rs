//! Post selection and blend analysis generation.
//!
//! This crate provides:
//! - Filter trait and implementations for screening posts
//! - FilterPipeline for composing filters
//! - `select_best` for choosing each account's representative post
//! - Prompt construction and strict parsing of the model's answer
//! - AnalysisGenerator tying prompt, backend call and parsing together
//!
//! ## Architecture
//! Posts flow through the crate in stages:
//! 1. Filters drop posts that cannot take part in a stage (no text, no engagement)
//! 2. The selector scans the survivors for the highest engagement score
//! 3. The generator embeds both corpora in one prompt and validates the reply
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{select_best, AnalysisGenerator};
//!
//! let best = select_best(&posts);
//!
//! let generator = AnalysisGenerator::new(backend.clone());
//! let analysis = generator.generate(&posts1, &posts2, &alice, &bob).await?;
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod selector;
pub mod prompt;
pub mod schema;
pub mod generator;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use selector::select_best;
pub use prompt::{build_prompt, extract_post_texts, MAX_POSTS_PER_USER, SYSTEM_INSTRUCTION};
pub use schema::parse_analysis;
pub use generator::AnalysisGenerator;
