#[cfg(any(feature = "adapters", feature = "axum", feature = "image"))]
compile_error!("application must not depend on adapters/framework crates");

pub mod config;
pub mod detection;
pub mod error;
pub mod infrastructure_config;
pub mod palette;
pub mod ports;
