//! The 3D "neural" graph: layout, camera, picking, selection and drawing.

mod builder;
mod camera;
mod component;
mod config;
mod frame_loop;
mod projection;
mod render;
mod selection;
mod state;
mod surface;
mod types;

pub use builder::{ROOT_ID, assign_ids};
pub use component::NeuralGraphCanvas;
pub use types::{Category, ContentItem, GraphCommand, GraphEvent, NodeKind, SubCategory};
