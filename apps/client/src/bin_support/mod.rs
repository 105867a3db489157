//! Pieces of the console binary that are worth testing on their own.

pub mod commands;
pub mod console_renderer;
