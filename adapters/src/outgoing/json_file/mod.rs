pub mod color_source_json;
