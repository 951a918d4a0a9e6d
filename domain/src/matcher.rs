use serde::{Deserialize, Serialize};
#[cfg(feature = "docs")]
use utoipa::ToSchema;

use crate::color::RgbColor;
use crate::error::{DomainError, DomainResult};
use crate::palette::{Palette, PaletteEntry};

/// A single observed pixel color to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Query {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn color(&self) -> RgbColor {
        RgbColor::new(self.r, self.g, self.b)
    }
}

impl From<RgbColor> for Query {
    fn from(color: RgbColor) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

/// Owned copy of the winning palette entry.
#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub name: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl MatchResult {
    #[must_use]
    pub fn color(&self) -> RgbColor {
        RgbColor::new(self.r, self.g, self.b)
    }
}

impl From<&PaletteEntry> for MatchResult {
    fn from(entry: &PaletteEntry) -> Self {
        Self {
            name: entry.name.clone(),
            r: entry.color.r,
            g: entry.color.g,
            b: entry.color.b,
        }
    }
}

/// Linear scan for the entry closest to `query`. Ties go to the entry that
/// comes first in palette order.
pub fn nearest(query: Query, palette: &Palette) -> DomainResult<MatchResult> {
    let target = query.color();
    let mut best: Option<(&PaletteEntry, u32)> = None;

    for entry in palette {
        let distance = target.squared_distance(&entry.color);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((entry, distance));
            if distance == 0 {
                break;
            }
        }
    }

    best.map(|(entry, _)| MatchResult::from(entry))
        .ok_or(DomainError::EmptyPalette)
}

impl Palette {
    pub fn nearest(&self, query: Query) -> DomainResult<MatchResult> {
        nearest(query, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::NamedColorSource;

    fn palette(entries: &[(&str, (u8, u8, u8))]) -> Palette {
        Palette::from_entries(
            entries
                .iter()
                .map(|(name, (r, g, b))| PaletteEntry::new(*name, RgbColor::new(*r, *g, *b))),
        )
    }

    #[test]
    fn empty_palette_is_an_error() {
        assert_eq!(
            nearest(Query::new(1, 2, 3), &Palette::empty()),
            Err(DomainError::EmptyPalette)
        );
    }

    #[test]
    fn single_entry_always_wins() {
        let only = palette(&[("only", (10, 20, 30))]);

        for query in [Query::new(10, 20, 30), Query::new(255, 0, 255), Query::new(0, 0, 0)] {
            assert_eq!(
                nearest(query, &only).unwrap(),
                MatchResult {
                    name: "only".to_string(),
                    r: 10,
                    g: 20,
                    b: 30
                }
            );
        }
    }

    #[test]
    fn exact_match_returns_entry_name() {
        let palette = palette(&[
            ("black", (0, 0, 0)),
            ("coral", (255, 127, 80)),
            ("white", (255, 255, 255)),
        ]);

        assert_eq!(nearest(Query::new(255, 127, 80), &palette).unwrap().name, "coral");
    }

    #[test]
    fn identical_colors_resolve_to_first_in_order() {
        let palette = palette(&[
            ("aqua", (0, 255, 255)),
            ("cyan", (0, 255, 255)),
        ]);

        assert_eq!(nearest(Query::new(0, 255, 255), &palette).unwrap().name, "aqua");
        assert_eq!(nearest(Query::new(10, 250, 250), &palette).unwrap().name, "aqua");
    }

    #[test]
    fn equidistant_entries_resolve_to_first_in_order() {
        let palette = palette(&[("low", (0, 0, 0)), ("high", (20, 0, 0))]);
        assert_eq!(nearest(Query::new(10, 0, 0), &palette).unwrap().name, "low");

        let reversed = self::palette(&[("high", (20, 0, 0)), ("low", (0, 0, 0))]);
        assert_eq!(nearest(Query::new(10, 0, 0), &reversed).unwrap().name, "high");
    }

    #[test]
    fn result_carries_palette_channels_not_query() {
        let palette = palette(&[("red", (255, 0, 0)), ("blue", (0, 0, 255))]);
        let result = nearest(Query::new(200, 30, 40), &palette).unwrap();
        assert_eq!(result.color(), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn matches_against_a_built_palette() {
        let sources = [NamedColorSource::new("test")
            .with_hex("xkcd:dark green", "#033500")
            .with_hex("xkcd:light green", "#96F97B")];
        let palette = Palette::build(&sources).unwrap();

        assert_eq!(
            palette.nearest(Query::new(0, 60, 0)).unwrap().name,
            "dark_green"
        );
    }
}
