use serde::{Deserialize, Serialize};
#[cfg(feature = "docs")]
use utoipa::ToSchema;

use color_namer_application::ports::incoming::color_detection::DetectColorCommand;
use domain::matcher::Query;

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Pixel to sample. Without `image` the most recent upload is used.",
    example = json!({
        "x": 12,
        "y": 40,
        "image": "sunset.png"
    })
))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectColorRequest {
    #[cfg_attr(feature = "docs", schema(example = 12, minimum = 0))]
    pub x: Option<i64>,
    #[cfg_attr(feature = "docs", schema(example = 40, minimum = 0))]
    pub y: Option<i64>,
    #[serde(default)]
    #[cfg_attr(feature = "docs", schema(example = "sunset.png"))]
    pub image: Option<String>,
}

impl DetectColorRequest {
    /// `None` when either coordinate is missing.
    #[must_use]
    pub fn into_command(self) -> Option<DetectColorCommand> {
        Some(DetectColorCommand {
            x: self.x?,
            y: self.y?,
            image: self.image.filter(|name| !name.trim().is_empty()),
        })
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "RGB triple to name",
    example = json!({ "r": 255, "g": 127, "b": 80 })
))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchColorRequest {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<MatchColorRequest> for Query {
    fn from(request: MatchColorRequest) -> Self {
        Query::new(request.r, request.g, request.b)
    }
}
