use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub palette: PaletteConfig,
    pub logging: LoggingConfig,
    pub environment: EnvironmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub decode_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Flat `color_name,r,g,b` table used to skip rebuilding on start.
    pub table_path: PathBuf,
    pub include_builtin_css4: bool,
    pub include_builtin_xkcd: bool,
    /// JSON `{ "name": "#RRGGBB" }` tables, applied after the builtin
    /// colors in the listed order.
    #[serde(default)]
    pub source_files: Vec<PathBuf>,
    pub rebuild_on_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_upload_bytes: 16 * 1024 * 1024,
            allowed_extensions: ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"]
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            decode_timeout_ms: 5_000,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("colors.csv"),
            include_builtin_css4: true,
            include_builtin_xkcd: true,
            source_files: Vec::new(),
            rebuild_on_start: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_origin: None,
            },
            uploads: UploadConfig::default(),
            palette: PaletteConfig::default(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: false,
            },
            environment: EnvironmentConfig {
                env: "development".to_string(),
            },
        }
    }
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "server host cannot be empty".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(AppError::ConfigError {
                message: "server port must be greater than 0".to_string(),
            });
        }

        if self.uploads.dir.as_os_str().is_empty() {
            return Err(AppError::ConfigError {
                message: "upload dir cannot be empty".to_string(),
            });
        }

        if self.uploads.max_upload_bytes == 0 {
            return Err(AppError::ConfigError {
                message: "max_upload_bytes must be greater than 0".to_string(),
            });
        }

        if self.uploads.allowed_extensions.is_empty() {
            return Err(AppError::ConfigError {
                message: "allowed_extensions cannot be empty".to_string(),
            });
        }

        if self.uploads.decode_timeout_ms == 0 {
            return Err(AppError::ConfigError {
                message: "decode_timeout_ms must be greater than 0".to_string(),
            });
        }

        self.palette.validate()
    }

    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl PaletteConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.table_path.as_os_str().is_empty() {
            return Err(AppError::ConfigError {
                message: "palette table_path cannot be empty".to_string(),
            });
        }

        if self.sources().is_empty() {
            return Err(AppError::ConfigError {
                message: "palette needs a builtin color table or at least one source file"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Sources in build order, e.g. `["builtin:css4", "builtin:xkcd",
    /// "file:brand.json"]`.
    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        let builtins = [
            (self.include_builtin_css4, "builtin:css4"),
            (self.include_builtin_xkcd, "builtin:xkcd"),
        ];

        builtins
            .into_iter()
            .filter_map(|(enabled, name)| enabled.then(|| name.to_string()))
            .chain(
                self.source_files
                    .iter()
                    .map(|path| format!("file:{}", path.display())),
            )
            .collect()
    }
}
