//! InsightAgent - an autonomous natural-language data analytics agent.
//!
//! This library exposes the core modules; the `insight` binary is a thin
//! CLI front end over them.

pub mod agent;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod logging;
