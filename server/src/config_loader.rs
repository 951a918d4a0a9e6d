use color_namer_application::error::{AppError, AppResult};
use color_namer_application::infrastructure_config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use std::path::Path;

pub const ENV_PREFIX: &str = "COLOR_NAMER_";

pub fn load_config() -> AppResult<Config> {
    extract_config(&config_figment(Path::new(".")))
}

/// Defaults, then `config.toml` and `config.json` from `dir` when present,
/// then `COLOR_NAMER_*` variables with `__` separating nested keys.
pub fn config_figment(dir: &Path) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    let toml_path = dir.join("config.toml");
    if toml_path.exists() {
        figment = figment.merge(Toml::file(toml_path));
    }

    let json_path = dir.join("config.json");
    if json_path.exists() {
        figment = figment.merge(Json::file(json_path));
    }

    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn extract_config(figment: &Figment) -> AppResult<Config> {
    let config: Config = figment.extract().map_err(|e| AppError::ConfigError {
        message: format!("Failed to load configuration: {e}"),
    })?;

    config.validate()?;
    Ok(config)
}
