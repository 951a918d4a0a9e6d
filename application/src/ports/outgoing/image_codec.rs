use crate::error::AppResult;
use domain::color::RgbColor;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

pub trait ImageCodecPort: Send + Sync {
    /// Decodes `image_data` and returns the RGB value at `(x, y)`; alpha is
    /// discarded. Coordinates outside the image are
    /// `AppError::InvalidPixelCoordinates`.
    fn sample_rgb(&self, image_data: &[u8], x: u32, y: u32) -> AppResult<RgbColor>;
}

pub type DynImageCodecPort = Arc<dyn ImageCodecPort>;
