pub mod color_source;
pub mod image_codec;
pub mod image_store;
pub mod palette_store;
pub mod timeout;
