//! Shared utilities

pub mod config;
