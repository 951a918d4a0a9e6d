use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid color format for '{name}' in source '{source_label}': {value}")]
    InvalidColorFormat {
        source_label: String,
        name: String,
        value: String,
    },

    #[error("Color name '{name}' in source '{source_label}' is empty once normalized")]
    EmptyColorName { source_label: String, name: String },

    #[error("Palette contains no colors")]
    EmptyPalette,
}

pub type DomainResult<T> = Result<T, DomainError>;
