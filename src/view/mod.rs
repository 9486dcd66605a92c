//! Terminal presentation of a chat session

pub mod render;
pub mod viewport;

pub use render::Renderer;
pub use viewport::Viewport;
