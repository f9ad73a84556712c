//! Image loading utilities for UI source images
//!
//! Decodes PNG files (or in-memory bytes) into RGBA8 pixel data that a UI
//! backend can upload as a drawable image.

use std::path::Path;
use image::RgbaImage;
use crate::assets::AssetError;

/// Decoded RGBA8 image ready for upload to a UI backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major, top row first
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image: {}", e)))?;

        let rgba_img = img.to_rgba8();
        log::info!("Loaded image {}x{} from {:?}", rgba_img.width(), rgba_img.height(), path_ref);

        Ok(Self::from_rgba_image(rgba_img))
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;

        let rgba_img = img.to_rgba8();
        log::debug!("Loaded image {}x{} from memory", rgba_img.width(), rgba_img.height());

        Ok(Self::from_rgba_image(rgba_img))
    }

    /// Wrap raw RGBA8 pixels, checking the buffer length against the dimensions
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AssetError::InvalidData(format!(
                "Expected {} bytes for {}x{} RGBA image, got {}",
                expected, width, height, data.len()
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();

        Self { data, width, height }
    }

    fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            data: img.into_raw(),
            width,
            height,
        }
    }

    /// Convert into an `image` buffer for pixel access
    pub fn into_rgba_image(self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data)
    }

    /// Width divided by height (0 for an empty image)
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 2, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 2);
        assert_eq!(img.size_bytes(), 4 * 2 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
        assert_eq!(&img.data[28..32], &[255, 0, 0, 255]);
        assert_eq!(img.aspect(), 2.0);
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(ImageData::from_raw(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            ImageData::from_raw(2, 2, vec![0; 15]),
            Err(AssetError::InvalidData(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = ImageData::from_file("definitely/not/here.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = ImageData::from_bytes(&[1, 2, 3, 4]);
        assert!(matches!(result, Err(AssetError::LoadFailed(_))));
    }

    #[test]
    fn test_png_round_trip_through_bytes() {
        let source = ImageData::solid_color(3, 3, [10, 20, 30, 255]);
        let img = source.clone().into_rgba_image().unwrap();

        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = ImageData::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, source);
    }
}
