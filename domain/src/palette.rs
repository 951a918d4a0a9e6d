use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::{fmt, slice};
#[cfg(feature = "docs")]
use utoipa::ToSchema;

use crate::color::{HexColor, RgbColor};
use crate::error::{DomainError, DomainResult};

/// Raw color value as it appears in a named-color source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValue {
    Hex(String),
    Packed(u32),
}

impl SourceValue {
    #[must_use]
    pub fn decode(&self) -> Option<RgbColor> {
        match self {
            SourceValue::Hex(hex) => HexColor::new(hex.clone()).to_rgb(),
            SourceValue::Packed(packed) => RgbColor::from_packed_rgb(*packed),
        }
    }
}

impl fmt::Display for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceValue::Hex(hex) => write!(f, "{hex:?}"),
            SourceValue::Packed(packed) => write!(f, "{packed:#08X}"),
        }
    }
}

/// An ordered `name -> color` table, e.g. the CSS4 or XKCD color lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColorSource {
    pub label: String,
    pub entries: Vec<(String, SourceValue)>,
}

impl NamedColorSource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hex(mut self, name: impl Into<String>, hex: impl Into<String>) -> Self {
        self.entries
            .push((name.into(), SourceValue::Hex(hex.into())));
        self
    }

    #[must_use]
    pub fn with_packed(mut self, name: impl Into<String>, packed: u32) -> Self {
        self.entries.push((name.into(), SourceValue::Packed(packed)));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: SourceValue) {
        self.entries.push((name.into(), value));
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub name: String,
    #[serde(flatten)]
    pub color: RgbColor,
}

impl PaletteEntry {
    pub fn new(name: impl Into<String>, color: RgbColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Ordered reference palette with unique names. Immutable once built and
/// cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Arc<[PaletteEntry]>,
}

impl Palette {
    /// Concatenates `sources` in order, decodes every value and keeps the
    /// first entry for each normalized name.
    pub fn build(sources: &[NamedColorSource]) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for source in sources {
            for (raw_name, value) in &source.entries {
                let color = value
                    .decode()
                    .ok_or_else(|| DomainError::InvalidColorFormat {
                        source_label: source.label.clone(),
                        name: raw_name.clone(),
                        value: value.to_string(),
                    })?;

                let name = normalize_name(raw_name);
                if name.is_empty() {
                    return Err(DomainError::EmptyColorName {
                        source_label: source.label.clone(),
                        name: raw_name.clone(),
                    });
                }
                if seen.insert(name.clone()) {
                    entries.push(PaletteEntry { name, color });
                }
            }
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Wraps already-decoded entries, e.g. rows read back from a palette
    /// table. Later duplicates of a name are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = PaletteEntry>) -> Self {
        let mut seen = HashSet::new();
        let unique: Vec<PaletteEntry> = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.name.clone()))
            .collect();

        Self {
            entries: unique.into(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// `"xkcd:coral pink"` -> `"coral_pink"`: drops a leading namespace and
/// replaces each whitespace character with an underscore.
///
/// A namespace is the text before the first `:` when it holds no whitespace,
/// so `"ratio 3:2 grey"` keeps its colon.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let unprefixed = match trimmed.split_once(':') {
        Some((namespace, name)) if !namespace.chars().any(char::is_whitespace) => name.trim(),
        _ => trimmed,
    };

    unprefixed
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
