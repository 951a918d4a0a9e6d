use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

use color_namer_application::{
    error::{AppError, AppResult},
    ports::outgoing::color_source::ColorSourcePort,
};
use domain::{
    error::DomainError,
    palette::{NamedColorSource, SourceValue},
};

/// Reads `{ "name": "#RRGGBB" | 0xRRGGBB }` objects. Entry order follows the
/// file and the source label is the file stem.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonColorSourceAdapter;

impl JsonColorSourceAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

pub fn parse_source(label: &str, json: &str) -> AppResult<NamedColorSource> {
    let object: Map<String, Value> = serde_json::from_str(json)?;
    let mut source = NamedColorSource::new(label);

    for (name, value) in object {
        let value = match value {
            Value::String(hex) => SourceValue::Hex(hex),
            Value::Number(number) => match number.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(packed) => SourceValue::Packed(packed),
                None => return Err(invalid(label, name, &Value::Number(number))),
            },
            other => return Err(invalid(label, name, &other)),
        };
        source.push(name, value);
    }

    Ok(source)
}

fn invalid(label: &str, name: String, value: &Value) -> AppError {
    DomainError::InvalidColorFormat {
        source_label: label.to_string(),
        name,
        value: value.to_string(),
    }
    .into()
}

#[async_trait::async_trait]
impl ColorSourcePort for JsonColorSourceAdapter {
    #[instrument(skip(self), fields(path = %path.display()))]
    async fn load_source(&self, path: &Path) -> AppResult<NamedColorSource> {
        let label = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| AppError::ValidationError {
                message: format!("Color source path {} has no file name", path.display()),
            })?;

        let json = fs::read_to_string(path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AppError::NotFound {
                    message: format!("Color source {} not found", path.display()),
                },
                _ => AppError::IoError(e),
            })?;

        let source = parse_source(label, &json)?;
        debug!("Parsed {} entries for source '{}'", source.entries.len(), label);
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{color::RgbColor, palette::Palette};

    #[test]
    fn keeps_file_order_and_accepts_both_encodings() {
        let source = parse_source(
            "xkcd",
            r##"{ "xkcd:cloudy blue": "#acc2d9", "xkcd:dark pastel green": 5680727, "xkcd:dust": "#B2996E" }"##,
        )
        .unwrap();

        let names: Vec<&str> = source.entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["xkcd:cloudy blue", "xkcd:dark pastel green", "xkcd:dust"]);

        let palette = Palette::build(&[source]).unwrap();
        assert_eq!(
            palette.get("dark_pastel_green").map(|entry| entry.color),
            Some(RgbColor::new(0x56, 0xAE, 0x57))
        );
        assert_eq!(
            palette.get("cloudy_blue").map(|entry| entry.color),
            Some(RgbColor::new(0xAC, 0xC2, 0xD9))
        );
    }

    #[test]
    fn non_color_values_are_invalid() {
        for json in [
            r#"{ "a": [1, 2, 3] }"#,
            r#"{ "a": -1 }"#,
            r#"{ "a": 1.5 }"#,
            r#"{ "a": null }"#,
        ] {
            assert!(
                matches!(
                    parse_source("bad", json),
                    Err(AppError::Domain(DomainError::InvalidColorFormat { .. }))
                ),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn non_object_documents_are_json_errors() {
        assert!(matches!(
            parse_source("bad", "[\"#000000\"]"),
            Err(AppError::JsonError(_))
        ));
    }

    #[tokio::test]
    async fn label_comes_from_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brand.json");
        fs::write(&path, r##"{ "ink": "#101820" }"##)
            .await
            .unwrap();

        let source = JsonColorSourceAdapter::new().load_source(&path).await.unwrap();
        assert_eq!(source.label, "brand");
        assert_eq!(source.entries.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonColorSourceAdapter::new()
            .load_source(&dir.path().join("nope.json"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
