mod card;
mod render;

pub use render::render;
