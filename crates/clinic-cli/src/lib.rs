//! CLI library components for the clinic patient history tool.

pub mod commands;
pub mod logging;
pub mod render;
