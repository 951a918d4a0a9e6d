use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "docs")]
use utoipa::ToSchema;

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const MAX_PACKED: u32 = 0x00FF_FFFF;

    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decodes a packed `0xRRGGBB` value. Anything above 24 bits is rejected.
    #[must_use]
    pub fn from_packed_rgb(packed: u32) -> Option<Self> {
        if packed > Self::MAX_PACKED {
            return None;
        }
        let [_, r, g, b] = packed.to_be_bytes();
        Some(Self { r, g, b })
    }

    /// Squared Euclidean distance in RGB space. The largest possible value is
    /// `3 * 255^2 = 195_075`, so `u32` never overflows.
    #[must_use]
    pub fn squared_distance(&self, other: &RgbColor) -> u32 {
        let dr = u32::from(self.r.abs_diff(other.r));
        let dg = u32::from(self.g.abs_diff(other.g));
        let db = u32::from(self.b.abs_diff(other.b));
        dr * dr + dg * dg + db * db
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexColor(pub String);

impl HexColor {
    #[must_use]
    pub fn new(hex: String) -> Self {
        Self(hex)
    }

    /// Parses `#RRGGBB` (the `#` is optional, digits are case-insensitive).
    #[must_use]
    pub fn to_rgb(&self) -> Option<RgbColor> {
        let digits = self.0.strip_prefix('#').unwrap_or(&self.0);
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }

        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(RgbColor::from_packed_rgb)
    }
}
