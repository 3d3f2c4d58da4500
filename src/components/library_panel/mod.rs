mod component;
pub mod tree;

pub use component::LibraryPanel;
