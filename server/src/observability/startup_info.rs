use color_namer_application::infrastructure_config::{Config, PaletteConfig, UploadConfig};
use tracing::info;

pub fn print_api_info(config: &Config) {
    print_api_documentation_info(config);
    print_configuration_info(config);
}

fn print_api_documentation_info(config: &Config) {
    let base_url = format!("http://{}", config.server_address());
    info!("📋 Endpoints:");
    info!("  🖼️  Upload page: {}/", base_url);
    if cfg!(feature = "docs") {
        info!("  📖 Swagger UI: {}/docs", base_url);
        info!("  📄 OpenAPI JSON: {}/api-docs/openapi.json", base_url);
    }
}

fn print_configuration_info(config: &Config) {
    info!("⚙️  Configuration:");
    print_palette_configuration(&config.palette);
    print_upload_configuration(&config.uploads);
    info!("  🌍 Environment: {}", config.environment.env);
}

fn print_palette_configuration(palette: &PaletteConfig) {
    info!("  🎨 Palette table: {}", palette.table_path.display());
    info!(
        "  🎨 Sources: {}, rebuild on start {}",
        palette.sources().join(", "),
        palette.rebuild_on_start
    );
}

fn print_upload_configuration(uploads: &UploadConfig) {
    info!(
        "  📁 Uploads: {} (max {} bytes, decode timeout {}ms)",
        uploads.dir.display(),
        uploads.max_upload_bytes,
        uploads.decode_timeout_ms
    );
    info!("  📁 Allowed types: {}", uploads.allowed_extensions.join(", "));
}
