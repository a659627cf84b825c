//! Server crate for the post-blend service.
//!
//! This crate contains the orchestrator that coordinates all components
//! of the blend pipeline, plus the environment configuration that wires
//! the real HTTP backends together.

pub mod config;
pub mod orchestrator;

pub use config::{BlendConfig, ConfigError};
pub use orchestrator::BlendOrchestrator;
