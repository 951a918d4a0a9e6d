use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

use color_namer_application::infrastructure_config::PaletteConfig;
use server::bootstrap::state::AppState;
use server::{config_loader, observability};

/// Build the reference palette from the configured named-color sources and
/// write it as a `color_name,r,g,b` table.
#[derive(Parser, Debug)]
#[command(name = "build-palette", author, version, about)]
struct Args {
    /// Table to write (defaults to `palette.table_path`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave out the builtin CSS4 colors
    #[arg(long)]
    no_css4: bool,

    /// Leave out the builtin XKCD survey colors
    #[arg(long)]
    no_xkcd: bool,

    /// Extra JSON source, applied after the configured ones; repeatable
    #[arg(short, long = "source")]
    sources: Vec<PathBuf>,
}

impl Args {
    fn apply(self, mut palette: PaletteConfig) -> PaletteConfig {
        if let Some(output) = self.output {
            palette.table_path = output;
        }
        if self.no_css4 {
            palette.include_builtin_css4 = false;
        }
        if self.no_xkcd {
            palette.include_builtin_xkcd = false;
        }
        palette.source_files.extend(self.sources);
        palette.rebuild_on_start = true;
        palette
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = config_loader::load_config()?;
    observability::tracing::setup_logging("build-palette", &config.logging)?;

    let palette_config = args.apply(config.palette);
    palette_config.validate()?;

    let palette = AppState::create_palette_service(&palette_config)
        .rebuild()
        .await?;

    info!(
        "Wrote {} colors to {}",
        palette.len(),
        palette_config.table_path.display()
    );
    Ok(())
}
