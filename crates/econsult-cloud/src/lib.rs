//! eConsult Cloud — word-cloud layout and PNG rendering.

pub mod layout;
pub mod render;

pub use layout::{compute_layout, WordPlacement};
pub use render::{WordCloudArt, WordCloudRenderer};
