use crate::infrastructure_config::UploadConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DetectionSettings {
    pub allowed_extensions: Vec<String>,
    pub decode_timeout: Duration,
}

impl DetectionSettings {
    #[must_use]
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

impl From<&UploadConfig> for DetectionSettings {
    fn from(config: &UploadConfig) -> Self {
        Self {
            allowed_extensions: config.allowed_extensions.clone(),
            decode_timeout: Duration::from_millis(config.decode_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        let settings = DetectionSettings::from(&UploadConfig::default());
        assert!(settings.is_allowed_extension("PNG"));
        assert!(settings.is_allowed_extension("jpeg"));
        assert!(!settings.is_allowed_extension("exe"));
        assert_eq!(settings.decode_timeout, Duration::from_millis(5_000));
    }
}
