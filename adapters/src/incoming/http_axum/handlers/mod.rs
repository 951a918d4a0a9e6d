pub(crate) mod index;

// keep public for OpenAPI docs
pub mod colors;
pub mod health;
pub mod palette;
pub mod upload;
