pub mod color;
pub mod error;
pub mod matcher;
pub mod named_colors;
pub mod palette;
