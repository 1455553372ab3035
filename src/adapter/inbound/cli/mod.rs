//! CLI module graph.

pub mod allowance;
pub mod command;
pub mod create;
pub mod diagnostic;
pub mod output;
pub mod proposal;
pub mod validate;
