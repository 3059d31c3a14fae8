//! Artwork transcoding for small embedded displays.
//!
//! Album covers served by Spotify are large JPEGs. Displays like the Pimoroni
//! Pico Display only handle small RGB images, so the image endpoint fetches a
//! cover, scales it to a fixed size and re-encodes it as JPEG.

use axum::body::Bytes;
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{config::Config, error::ProxyError};

pub const MEDIA_TYPE: &str = "image/jpeg";

#[derive(Clone)]
pub struct ImageTranscoder {
    client: Client,
    width: u32,
    height: u32,
    quality: u8,
}

impl ImageTranscoder {
    pub fn new(config: &Config, client: Client) -> Self {
        ImageTranscoder {
            client,
            width: config.image_width,
            height: config.image_height,
            quality: config.image_quality,
        }
    }

    /// Fetches `url` and returns it as a JPEG of the configured size.
    ///
    /// The fetch needs no authorization; any reachable image URL works.
    #[instrument(skip(self))]
    pub async fn fetch_and_transcode(&self, url: &str) -> Result<Vec<u8>, ProxyError> {
        let source = self.fetch(url).await?;
        let (width, height, quality) = (self.width, self.height, self.quality);

        let jpeg = tokio::task::spawn_blocking(move || transcode(&source, width, height, quality))
            .await
            .map_err(|e| ProxyError::Internal(format!("transcoding task failed: {e}")))??;

        debug!(bytes = jpeg.len(), width, height, "image transcoded");
        Ok(jpeg)
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, ProxyError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::ImageFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::ImageFetch(format!("{url} returned {status}")));
        }

        response
            .bytes()
            .await
            .map_err(|e| ProxyError::ImageFetch(e.to_string()))
    }
}

/// Decodes `source`, scales it to exactly `width`x`height`, drops any alpha
/// channel and encodes the result as JPEG.
pub fn transcode(
    source: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, ProxyError> {
    let decoded =
        image::load_from_memory(source).map_err(|e| ProxyError::Decode(e.to_string()))?;

    let rgb = decoded
        .resize_exact(width, height, FilterType::CatmullRom)
        .to_rgb8();

    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, quality))
        .map_err(|e| ProxyError::Internal(format!("failed to encode jpeg: {e}")))?;

    Ok(jpeg)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 90, 128]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_transcode_resizes_to_exact_size() {
        let jpeg = transcode(&png(640, 640), 160, 128, 75).unwrap();

        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (160, 128));
        assert!(decoded.color().has_color());
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_transcode_upscales_small_images() {
        let jpeg = transcode(&png(16, 16), 160, 128, 75).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (160, 128));
    }

    #[test]
    fn test_transcode_rejects_garbage() {
        let err = transcode(b"definitely not an image", 160, 128, 75).unwrap_err();
        assert!(matches!(err, ProxyError::Decode(_)));
    }
}
