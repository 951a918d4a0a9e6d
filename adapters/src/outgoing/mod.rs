pub mod csv_table;
pub mod fs_tokio;
pub mod image_rs;
pub mod json_file;
pub mod tokio_spawn;
