pub mod artifact;
pub mod auth;
pub mod builder;
pub mod cli;
pub mod config;
pub mod constants;
pub mod env_file;
pub mod policy;
pub mod registry;
pub mod repository;
pub mod service;

pub use anyhow::Result;
