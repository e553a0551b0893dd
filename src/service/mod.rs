//! Service layer for business logic orchestration
//!
//! This module runs the plugin steps in order, separating them from the CLI
//! layer in main.rs.

pub mod plugin;

pub use plugin::{PluginService, ServicePaths};
