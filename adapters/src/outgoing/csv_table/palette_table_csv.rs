use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, instrument, warn};

use color_namer_application::{
    error::{AppError, AppResult},
    ports::outgoing::palette_store::PaletteStorePort,
};
use domain::{
    color::RgbColor,
    palette::{Palette, PaletteEntry},
};

pub const TABLE_HEADER: &str = "color_name,r,g,b";

/// Longest name a table row may carry, in bytes.
pub const MAX_NAME_BYTES: usize = 256;

#[derive(Debug, Serialize, Deserialize)]
struct PaletteRow {
    color_name: String,
    r: u8,
    g: u8,
    b: u8,
}

impl From<&PaletteEntry> for PaletteRow {
    fn from(entry: &PaletteEntry) -> Self {
        Self {
            color_name: entry.name.clone(),
            r: entry.color.r,
            g: entry.color.g,
            b: entry.color.b,
        }
    }
}

impl From<PaletteRow> for PaletteEntry {
    fn from(row: PaletteRow) -> Self {
        PaletteEntry::new(row.color_name, RgbColor::new(row.r, row.g, row.b))
    }
}

/// Table at `path`, with the sources it was built from listed one per line
/// in `<path>.sources`.
pub struct CsvPaletteTableAdapter {
    path: PathBuf,
    sources_path: PathBuf,
}

impl CsvPaletteTableAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut sources_path = path.clone().into_os_string();
        sources_path.push(".sources");
        Self {
            path,
            sources_path: sources_path.into(),
        }
    }
}

/// Renders the palette as `color_name,r,g,b` rows under a header line.
pub fn encode_table(palette: &Palette) -> AppResult<String> {
    let mut writer = serde_csv_core::Writer::new();
    let mut table = String::with_capacity(palette.len() * 24 + TABLE_HEADER.len() + 1);
    table.push_str(TABLE_HEADER);
    table.push('\n');

    for entry in palette {
        if entry.name.len() > MAX_NAME_BYTES {
            return Err(AppError::StorageError {
                message: format!(
                    "Color name '{}' is {} bytes, the table allows at most {MAX_NAME_BYTES}",
                    entry.name,
                    entry.name.len()
                ),
            });
        }

        let mut buffer = vec![0u8; entry.name.len() * 2 + 32];
        let written = writer
            .serialize(&PaletteRow::from(entry), &mut buffer)
            .map_err(|e| AppError::StorageError {
                message: format!("Failed to encode palette row '{}': {e}", entry.name),
            })?;
        buffer.truncate(written);

        let row = String::from_utf8(buffer).map_err(|e| AppError::StorageError {
            message: format!("Palette row '{}' is not UTF-8: {e}", entry.name),
        })?;
        table.push_str(row.trim_end_matches(['\r', '\n']));
        table.push('\n');
    }

    Ok(table)
}

/// Parses a table written by [`encode_table`]. The header line is optional,
/// blank lines are skipped and later duplicates of a name are dropped.
pub fn decode_table(table: &str) -> AppResult<Palette> {
    let mut entries = Vec::new();

    for (index, line) in table.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || (index == 0 && line == TABLE_HEADER) {
            continue;
        }

        // One reader per row. The record is terminated so the reader never
        // carries a half-read field into the next line.
        let record = format!("{line}\n");
        let (row, _) = serde_csv_core::Reader::<MAX_NAME_BYTES>::new()
            .deserialize::<PaletteRow>(record.as_bytes())
            .map_err(|e| AppError::StorageError {
                message: format!("Invalid palette row {}: '{line}': {e}", index + 1),
            })?;
        entries.push(PaletteEntry::from(row));
    }

    let row_count = entries.len();
    let palette = Palette::from_entries(entries);
    if palette.len() != row_count {
        warn!(
            "Palette table had {} duplicate names, kept the first of each",
            row_count - palette.len()
        );
    }

    Ok(palette)
}

#[async_trait::async_trait]
impl PaletteStorePort for CsvPaletteTableAdapter {
    async fn exists(&self) -> AppResult<bool> {
        Ok(fs::try_exists(&self.path).await?)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> AppResult<Palette> {
        let table = fs::read_to_string(&self.path).await?;
        let palette = decode_table(&table)?;
        debug!("Read {} palette rows", palette.len());
        Ok(palette)
    }

    async fn saved_sources(&self) -> AppResult<Option<Vec<String>>> {
        match fs::read_to_string(&self.sources_path).await {
            Ok(list) => Ok(Some(
                list.lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(ToString::to_string)
                    .collect(),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, palette, sources), fields(path = %self.path.display(), colors = palette.len()))]
    async fn save(&self, palette: &Palette, sources: &[String]) -> AppResult<()> {
        let table = encode_table(palette)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let staging = self.path.with_extension("csv.tmp");
        fs::write(&staging, table).await?;
        fs::rename(&staging, &self.path).await?;

        let mut list = sources.join("\n");
        list.push('\n');
        fs::write(&self.sources_path, list).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::palette::NamedColorSource;
    use tempfile::tempdir;

    fn sample() -> Palette {
        Palette::build(&[NamedColorSource::new("test")
            .with_hex("black", "#000000")
            .with_hex("xkcd:coral pink", "#FF6163")
            .with_hex("robin's egg", "#6DEDFD")])
        .unwrap()
    }

    #[test]
    fn table_starts_with_header_and_keeps_order() {
        let table = encode_table(&sample()).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], TABLE_HEADER);
        assert_eq!(lines[1], "black,0,0,0");
        assert_eq!(lines[2], "coral_pink,255,97,99");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn decoding_reproduces_the_palette() {
        let palette = sample();
        let decoded = decode_table(&encode_table(&palette).unwrap()).unwrap();
        assert_eq!(decoded, palette);
    }

    #[test]
    fn quoted_names_survive_the_table() {
        let palette = Palette::build(&[NamedColorSource::new("test")
            .with_hex("say \"hi\"", "#010203")
            .with_hex("salt, pepper", "#040506")
            .with_hex("plain", "#070809")])
        .unwrap();

        let table = encode_table(&palette).unwrap();
        assert!(table.contains(r#""say_""hi""",1,2,3"#));

        let decoded = decode_table(&table).unwrap();
        assert_eq!(decoded, palette);
        assert!(decoded.get("say_\"hi\"").is_some());
        assert!(decoded.get("salt,_pepper").is_some());
    }

    #[test]
    fn names_longer_than_a_row_allows_are_refused_when_writing() {
        let fits = "a".repeat(MAX_NAME_BYTES);
        let palette = Palette::build(&[NamedColorSource::new("test").with_hex(&fits, "#010203")])
            .unwrap();
        assert_eq!(decode_table(&encode_table(&palette).unwrap()).unwrap(), palette);

        let too_long = "a".repeat(MAX_NAME_BYTES + 44);
        let palette =
            Palette::build(&[NamedColorSource::new("test").with_hex(&too_long, "#010203")])
                .unwrap();
        assert!(matches!(
            encode_table(&palette),
            Err(AppError::StorageError { message }) if message.contains("at most 256")
        ));
    }

    #[test]
    fn decoding_drops_duplicate_names() {
        let decoded = decode_table("color_name,r,g,b\nred,255,0,0\nred,1,1,1\n\n").unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(
            decoded.get("red").map(|entry| entry.color),
            Some(RgbColor::new(255, 0, 0))
        );
    }

    #[test]
    fn malformed_rows_are_storage_errors() {
        assert!(matches!(
            decode_table("color_name,r,g,b\nred,300,0,0\n"),
            Err(AppError::StorageError { .. })
        ));
        assert!(decode_table("red,1,2\n").is_err());
    }

    #[tokio::test]
    async fn save_then_load_from_disk() {
        let dir = tempdir().unwrap();
        let adapter = CsvPaletteTableAdapter::new(dir.path().join("nested").join("colors.csv"));

        assert!(!adapter.exists().await.unwrap());
        assert_eq!(adapter.saved_sources().await.unwrap(), None);

        let sources = vec!["builtin:css4".to_string(), "file:brand.json".to_string()];
        adapter.save(&sample(), &sources).await.unwrap();
        assert!(adapter.exists().await.unwrap());
        assert!(dir.path().join("nested").join("colors.csv.sources").exists());

        let loaded = adapter.load().await.unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(adapter.saved_sources().await.unwrap(), Some(sources));
    }

    #[tokio::test]
    async fn hand_written_table_has_no_source_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colors.csv");
        fs::write(&path, "color_name,r,g,b\nred,255,0,0\n").await.unwrap();

        let adapter = CsvPaletteTableAdapter::new(&path);
        assert_eq!(adapter.saved_sources().await.unwrap(), None);
        assert_eq!(adapter.load().await.unwrap().len(), 1);
    }
}
