use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppResult;
use domain::color::RgbColor;

#[derive(Debug)]
pub struct TimeoutError;

pub trait DecodeTimeoutPort: Send + Sync {
    fn sample_rgb_with_timeout(
        &self,
        image_data: Vec<u8>,
        x: u32,
        y: u32,
        duration: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<AppResult<RgbColor>, TimeoutError>> + Send + 'static>>;
}

pub type DynDecodeTimeoutPort = Arc<dyn DecodeTimeoutPort>;
