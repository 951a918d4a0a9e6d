use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::{task::spawn_blocking, time::timeout};

use color_namer_application::{
    error::{AppError, AppResult},
    ports::outgoing::{
        image_codec::DynImageCodecPort,
        timeout::{DecodeTimeoutPort, TimeoutError},
    },
};
use domain::color::RgbColor;

pub struct TokioDecodeTimeoutAdapter {
    codec_port: DynImageCodecPort,
}

impl TokioDecodeTimeoutAdapter {
    pub fn new(codec_port: DynImageCodecPort) -> Self {
        Self { codec_port }
    }
}

impl DecodeTimeoutPort for TokioDecodeTimeoutAdapter {
    fn sample_rgb_with_timeout(
        &self,
        image_data: Vec<u8>,
        x: u32,
        y: u32,
        duration: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<AppResult<RgbColor>, TimeoutError>> + Send + 'static>> {
        let codec = Arc::clone(&self.codec_port);

        Box::pin(async move {
            let task = spawn_blocking(move || codec.sample_rgb(&image_data, x, y));

            match timeout(duration, task).await.map_err(|_| TimeoutError)? {
                Ok(sampled) => Ok(sampled),
                Err(e) => Ok(Err(AppError::TaskError {
                    message: format!("Decode task failed: {e}"),
                })),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_namer_application::ports::outgoing::image_codec::ImageCodecPort;
    use std::thread;

    struct SlowCodec {
        delay: Duration,
    }

    impl ImageCodecPort for SlowCodec {
        fn sample_rgb(&self, image_data: &[u8], x: u32, y: u32) -> AppResult<RgbColor> {
            thread::sleep(self.delay);
            if x > 0 || y > 0 {
                return Err(AppError::InvalidPixelCoordinates {
                    message: format!("({x}, {y})"),
                });
            }
            Ok(RgbColor::new(image_data[0], image_data[1], image_data[2]))
        }
    }

    fn adapter(delay: Duration) -> TokioDecodeTimeoutAdapter {
        TokioDecodeTimeoutAdapter::new(Arc::new(SlowCodec { delay }))
    }

    #[tokio::test]
    async fn fast_decode_returns_pixel() {
        let result = adapter(Duration::ZERO)
            .sample_rgb_with_timeout(vec![1, 2, 3], 0, 0, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(result.unwrap(), RgbColor::new(1, 2, 3));
    }

    #[tokio::test]
    async fn codec_errors_pass_through() {
        let result = adapter(Duration::ZERO)
            .sample_rgb_with_timeout(vec![1, 2, 3], 4, 0, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(matches!(result, Err(AppError::InvalidPixelCoordinates { .. })));
    }

    #[tokio::test]
    async fn slow_decode_times_out() {
        let result = adapter(Duration::from_millis(500))
            .sample_rgb_with_timeout(vec![1, 2, 3], 0, 0, Duration::from_millis(10))
            .await;
        assert!(result.is_err());
    }
}
