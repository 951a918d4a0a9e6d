use tracing::{debug, info, instrument, warn};

use domain::{
    error::DomainError,
    named_colors::{css4_source, xkcd_source},
    palette::{NamedColorSource, Palette},
};

use crate::{
    error::AppResult,
    infrastructure_config::PaletteConfig,
    ports::outgoing::{color_source::DynColorSourcePort, palette_store::DynPaletteStorePort},
};

pub struct PaletteService {
    config: PaletteConfig,
    palette_store: DynPaletteStorePort,
    color_source: DynColorSourcePort,
}

impl PaletteService {
    pub fn new(
        config: PaletteConfig,
        palette_store: DynPaletteStorePort,
        color_source: DynColorSourcePort,
    ) -> Self {
        Self {
            config,
            palette_store,
            color_source,
        }
    }

    /// Loads the persisted table when present and built from the configured
    /// sources, otherwise builds from the sources and writes the table.
    #[instrument(skip(self))]
    pub async fn load_or_build(&self) -> AppResult<Palette> {
        if !self.config.rebuild_on_start && self.palette_store.exists().await? {
            if self.table_is_stale().await? {
                return self.rebuild().await;
            }

            let palette = self.palette_store.load().await?;
            if palette.is_empty() {
                return Err(DomainError::EmptyPalette.into());
            }
            info!(
                "Loaded palette table {} with {} colors",
                self.config.table_path.display(),
                palette.len()
            );
            return Ok(palette);
        }

        self.rebuild().await
    }

    #[instrument(skip(self))]
    pub async fn rebuild(&self) -> AppResult<Palette> {
        let sources = self.collect_sources().await?;
        let palette = Palette::build(&sources)?;
        if palette.is_empty() {
            return Err(DomainError::EmptyPalette.into());
        }

        self.palette_store
            .save(&palette, &self.config.sources())
            .await?;
        info!(
            "Built palette with {} colors from {} sources into {}",
            palette.len(),
            sources.len(),
            self.config.table_path.display()
        );

        Ok(palette)
    }

    async fn table_is_stale(&self) -> AppResult<bool> {
        let configured = self.config.sources();

        match self.palette_store.saved_sources().await? {
            Some(saved) if saved == configured => Ok(false),
            Some(saved) => {
                warn!(
                    "Palette table {} was built from {saved:?} but {configured:?} are configured, rebuilding",
                    self.config.table_path.display()
                );
                Ok(true)
            }
            None => {
                warn!(
                    "Palette table {} has no source list, loading it instead of {configured:?}",
                    self.config.table_path.display()
                );
                Ok(false)
            }
        }
    }

    /// Builtin css4 then xkcd colors, then the configured files in order.
    pub async fn collect_sources(&self) -> AppResult<Vec<NamedColorSource>> {
        let mut sources = Vec::with_capacity(self.config.source_files.len() + 2);

        if self.config.include_builtin_css4 {
            sources.push(css4_source());
        }
        if self.config.include_builtin_xkcd {
            sources.push(xkcd_source());
        }

        for path in &self.config.source_files {
            let source = self.color_source.load_source(path).await?;
            debug!(
                "Loaded source '{}' with {} entries from {}",
                source.label,
                source.entries.len(),
                path.display()
            );
            sources.push(source);
        }

        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        ports::outgoing::{color_source::ColorSourcePort, palette_store::PaletteStorePort},
    };
    use domain::{
        color::RgbColor,
        matcher::Query,
        named_colors::{CSS4_COLORS, xkcd::XKCD_COLORS},
        palette::{PaletteEntry, SourceValue},
    };
    use std::{
        path::{Path, PathBuf},
        sync::{Arc, Mutex},
    };

    #[derive(Default)]
    struct MemoryPaletteStore {
        table: Mutex<Option<Palette>>,
        sources: Mutex<Option<Vec<String>>>,
        saves: Mutex<usize>,
    }

    impl MemoryPaletteStore {
        fn with_table(palette: Palette, sources: Option<&[&str]>) -> Self {
            Self {
                table: Mutex::new(Some(palette)),
                sources: Mutex::new(
                    sources.map(|list| list.iter().map(ToString::to_string).collect()),
                ),
                saves: Mutex::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl PaletteStorePort for MemoryPaletteStore {
        async fn exists(&self) -> AppResult<bool> {
            Ok(self.table.lock().unwrap().is_some())
        }

        async fn load(&self) -> AppResult<Palette> {
            self.table
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| AppError::NotFound {
                    message: "palette table".to_string(),
                })
        }

        async fn saved_sources(&self) -> AppResult<Option<Vec<String>>> {
            Ok(self.sources.lock().unwrap().clone())
        }

        async fn save(&self, palette: &Palette, sources: &[String]) -> AppResult<()> {
            *self.table.lock().unwrap() = Some(palette.clone());
            *self.sources.lock().unwrap() = Some(sources.to_vec());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct FixedSources;

    #[async_trait::async_trait]
    impl ColorSourcePort for FixedSources {
        async fn load_source(&self, path: &Path) -> AppResult<NamedColorSource> {
            let label = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            match label {
                "xkcd" => Ok(NamedColorSource::new("xkcd")
                    .with_hex("xkcd:red", "#E50000")
                    .with_hex("xkcd:dark green", "#033500")),
                "broken" => {
                    let mut source = NamedColorSource::new("broken");
                    source.push("oops", SourceValue::Hex("not a color".to_string()));
                    Ok(source)
                }
                "empty" => Ok(NamedColorSource::new("empty")),
                other => Err(AppError::NotFound {
                    message: other.to_string(),
                }),
            }
        }
    }

    fn service(config: PaletteConfig, store: Arc<MemoryPaletteStore>) -> PaletteService {
        PaletteService::new(config, store, Arc::new(FixedSources))
    }

    fn config_with(sources: &[&str], css4: bool) -> PaletteConfig {
        PaletteConfig {
            include_builtin_css4: css4,
            include_builtin_xkcd: false,
            source_files: sources.iter().map(PathBuf::from).collect(),
            ..PaletteConfig::default()
        }
    }

    #[tokio::test]
    async fn builds_and_persists_when_no_table_exists() {
        let store = Arc::new(MemoryPaletteStore::default());
        let service = service(config_with(&["xkcd.json"], true), Arc::clone(&store));

        let palette = service.load_or_build().await.unwrap();

        assert_eq!(palette.len(), CSS4_COLORS.len() + 1);
        assert_eq!(
            palette.get("red").map(|entry| entry.color),
            Some(RgbColor::new(255, 0, 0))
        );
        assert!(palette.get("dark_green").is_some());
        assert_eq!(*store.saves.lock().unwrap(), 1);
        assert_eq!(
            store.sources.lock().unwrap().clone(),
            Some(vec!["builtin:css4".to_string(), "file:xkcd.json".to_string()])
        );
    }

    #[tokio::test]
    async fn existing_table_is_loaded_without_rebuilding() {
        let table = Palette::from_entries([PaletteEntry::new("only", RgbColor::new(1, 2, 3))]);
        let store = Arc::new(MemoryPaletteStore::with_table(
            table.clone(),
            Some(["builtin:css4"].as_slice()),
        ));
        let service = service(config_with(&[], true), Arc::clone(&store));

        let palette = service.load_or_build().await.unwrap();

        assert_eq!(palette, table);
        assert_eq!(*store.saves.lock().unwrap(), 0);
        assert_eq!(palette.nearest(Query::new(200, 200, 200)).unwrap().name, "only");
    }

    #[tokio::test]
    async fn table_built_from_other_sources_is_rebuilt() {
        let table = Palette::from_entries([PaletteEntry::new("only", RgbColor::new(1, 2, 3))]);
        let store = Arc::new(MemoryPaletteStore::with_table(table, Some(["builtin:css4"].as_slice())));

        let palette = service(config_with(&["xkcd.json"], true), Arc::clone(&store))
            .load_or_build()
            .await
            .unwrap();

        assert_eq!(palette.len(), CSS4_COLORS.len() + 1);
        assert!(palette.get("only").is_none());
        assert_eq!(*store.saves.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn table_without_source_list_is_loaded_as_is() {
        let table = Palette::from_entries([PaletteEntry::new("only", RgbColor::new(1, 2, 3))]);
        let store = Arc::new(MemoryPaletteStore::with_table(table.clone(), None));

        let palette = service(config_with(&["xkcd.json"], true), Arc::clone(&store))
            .load_or_build()
            .await
            .unwrap();

        assert_eq!(palette, table);
        assert_eq!(*store.saves.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn rebuild_on_start_ignores_existing_table() {
        let table = Palette::from_entries([PaletteEntry::new("only", RgbColor::new(1, 2, 3))]);
        let store = Arc::new(MemoryPaletteStore::with_table(table, Some(["builtin:css4"].as_slice())));
        let mut config = config_with(&[], true);
        config.rebuild_on_start = true;

        let palette = service(config, Arc::clone(&store)).load_or_build().await.unwrap();

        assert_eq!(palette.len(), CSS4_COLORS.len());
        assert_eq!(*store.saves.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_table_is_rejected() {
        let store = Arc::new(MemoryPaletteStore::with_table(
            Palette::empty(),
            Some(["builtin:css4"].as_slice()),
        ));
        let result = service(config_with(&[], true), store).load_or_build().await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::EmptyPalette))
        ));
    }

    #[tokio::test]
    async fn empty_sources_are_rejected() {
        let store = Arc::new(MemoryPaletteStore::default());
        let result = service(config_with(&["empty.json"], false), Arc::clone(&store))
            .rebuild()
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::EmptyPalette))
        ));
        assert_eq!(*store.saves.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn invalid_source_value_aborts_without_saving() {
        let store = Arc::new(MemoryPaletteStore::default());
        let result = service(config_with(&["broken.json"], true), Arc::clone(&store))
            .rebuild()
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidColorFormat { .. }))
        ));
        assert!(store.table.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn sources_keep_configured_order() {
        let service = service(
            config_with(&["xkcd.json"], true),
            Arc::new(MemoryPaletteStore::default()),
        );

        let labels: Vec<String> = service
            .collect_sources()
            .await
            .unwrap()
            .into_iter()
            .map(|source| source.label)
            .collect();

        assert_eq!(labels, ["css4", "xkcd"]);
    }

    #[tokio::test]
    async fn builtin_xkcd_follows_css4_and_loses_shared_names() {
        let config = PaletteConfig {
            include_builtin_xkcd: true,
            ..config_with(&[], true)
        };
        let service = service(config, Arc::new(MemoryPaletteStore::default()));

        let labels: Vec<String> = service
            .collect_sources()
            .await
            .unwrap()
            .into_iter()
            .map(|source| source.label)
            .collect();
        assert_eq!(labels, ["css4", "xkcd"]);

        let palette = service.rebuild().await.unwrap();
        assert_eq!(palette.len(), CSS4_COLORS.len() + XKCD_COLORS.len() - 49);
        assert_eq!(
            palette.get("aqua").map(|entry| entry.color),
            Some(RgbColor::new(0, 255, 255))
        );
        assert!(palette.get("cloudy_blue").is_some());
    }
}
