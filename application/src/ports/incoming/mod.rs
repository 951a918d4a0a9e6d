pub mod color_detection;
pub mod palette;
