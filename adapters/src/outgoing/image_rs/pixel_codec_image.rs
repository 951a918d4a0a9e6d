use image::{DynamicImage, GenericImageView, ImageDecoder, ImageError, ImageReader};
use std::io::Cursor;
use tracing::{instrument, trace};

use color_namer_application::{
    error::{AppError, AppResult},
    ports::outgoing::image_codec::{ImageCodecPort, ImageDimensions},
};
use domain::color::RgbColor;

/// Decodes any format the `image` crate recognizes from its magic bytes and
/// applies the EXIF orientation, so coordinates match the displayed image.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImagePixelAdapter;

impl ImagePixelAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, image_data), fields(bytes = image_data.len()))]
    fn decode_impl(&self, image_data: &[u8]) -> AppResult<DynamicImage> {
        let reader = ImageReader::new(Cursor::new(image_data))
            .with_guessed_format()
            .map_err(|e| AppError::CodecError {
                message: format!("Failed to read image: {e}"),
            })?;

        let decode_error = |e: ImageError| AppError::CodecError {
            message: format!("Failed to decode image: {e}"),
        };

        let mut decoder = reader.into_decoder().map_err(decode_error)?;
        let orientation = decoder.orientation().map_err(decode_error)?;
        let mut img = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
        img.apply_orientation(orientation);
        Ok(img)
    }
}

impl ImageCodecPort for ImagePixelAdapter {
    fn sample_rgb(&self, image_data: &[u8], x: u32, y: u32) -> AppResult<RgbColor> {
        let img = self.decode_impl(image_data)?;
        let (width, height) = img.dimensions();

        if !(ImageDimensions { width, height }).contains(x, y) {
            return Err(AppError::InvalidPixelCoordinates {
                message: format!("({x}, {y}) is outside the {width}x{height} image"),
            });
        }

        let [r, g, b, _] = img.get_pixel(x, y).0;
        trace!("Sampled ({x}, {y}) -> ({r}, {g}, {b})");
        Ok(RgbColor::new(r, g, b))
    }
}
