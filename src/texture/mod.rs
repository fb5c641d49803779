//! Texture resource loading and decoding

use image::GenericImageView;

use crate::core::{Error, Result};

/// Decoded RGBA texture ready for upload by a render backend
#[derive(Debug, Clone)]
pub struct TextureData {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl TextureData {
    /// Decode a texture from encoded image bytes
    ///
    /// Decode failures surface the underlying [`image::ImageError`]
    /// unchanged.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        let (width, height) = img.dimensions();
        let pixels = img.to_rgba8().into_raw();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Raw RGBA pixel data
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Take ownership of the pixel data
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Load and decode a texture resource
///
/// `http(s)://` paths are fetched; anything else is read from the
/// filesystem. Single attempt, no retry, no cancellation.
pub async fn load_texture(path: &str) -> Result<TextureData> {
    log::debug!("loading texture from: {path}");

    let bytes = if path.starts_with("http://") || path.starts_with("https://") {
        let response = reqwest::get(path).await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }
        response.bytes().await?.to_vec()
    } else {
        tokio::fs::read(path).await?
    };

    let texture = TextureData::from_bytes(&bytes)?;
    log::debug!("texture decoded: {}x{}", texture.width, texture.height);
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode test png");
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let texture = TextureData::from_bytes(&encode_png(2, 3)).expect("decode");
        assert_eq!(texture.dimensions(), (2, 3));
        assert_eq!(texture.pixels().len(), 2 * 3 * 4);
        assert_eq!(&texture.pixels()[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = TextureData::from_bytes(b"definitely not an image").expect_err("decode");
        assert!(matches!(err, Error::Image(_)));
    }

    #[tokio::test]
    async fn test_load_texture_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp texture");
        file.write_all(&encode_png(4, 4)).expect("write temp texture");

        let texture = load_texture(&file.path().to_string_lossy())
            .await
            .expect("load texture");
        assert_eq!(texture.dimensions(), (4, 4));
    }

    #[tokio::test]
    async fn test_load_texture_missing_file() {
        let err = load_texture("/nonexistent/texture_00.png")
            .await
            .expect_err("load should fail");
        assert!(matches!(err, Error::Io(_)));
    }
}
