//! Filter implementations for the post pipeline.

pub mod content;
pub mod engagement;

// Re-export for convenience
pub use content::ContentFilter;
pub use engagement::EngagementFilter;
