pub mod assembly;
pub mod geometry;
