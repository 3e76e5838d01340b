//! Bridge between the egui thread and the location worker.

pub mod commands;
pub mod runtime;
