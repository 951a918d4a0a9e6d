use crate::error::{AppError, AppResult};

/// Reduces a client-supplied file name to a safe basename: path components
/// are dropped, whitespace becomes `_` and anything outside `[A-Za-z0-9._-]`
/// is removed. Leading dots and underscores are stripped so the result can
/// never be hidden or relative.
pub fn sanitize_file_name(raw: &str) -> AppResult<String> {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = basename
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches(['.', '_']);
    if cleaned.is_empty() {
        return Err(AppError::ValidationError {
            message: format!("File name '{raw}' has no usable characters"),
        });
    }

    Ok(cleaned.to_string())
}

#[must_use]
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension)
        .filter(|extension| !extension.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directories_and_unsafe_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cat.png").unwrap(), "cat.png");
        assert_eq!(sanitize_file_name("my photo (1).jpg").unwrap(), "my_photo_1.jpg");
        assert_eq!(sanitize_file_name(".hidden.png").unwrap(), "hidden.png");
    }

    #[test]
    fn rejects_names_with_nothing_left() {
        assert!(matches!(
            sanitize_file_name("../"),
            Err(AppError::ValidationError { .. })
        ));
        assert!(sanitize_file_name("???").is_err());
    }

    #[test]
    fn extension_is_the_last_suffix() {
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("photo.PNG"), Some("PNG"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of("trailing."), None);
    }
}
