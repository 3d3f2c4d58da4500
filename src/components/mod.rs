//! Reusable UI components.

pub mod detail_panel;
pub mod library_panel;
pub mod neural_graph;
