pub mod brightness;
pub mod geometry;
pub mod loader;
pub mod padding;
pub mod partition;
