use crate::error::ClassifyError;
use common::span;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;
use ndarray::{Array, IxDyn};

/// Square side length the classifier was trained on.
pub const DEFAULT_INPUT_SIZE: u32 = 224;

const CHANNELS: usize = 3;

/// Turns uploaded image bytes into a `(1, size, size, 3)` tensor in [0, 1].
#[derive(Debug, Clone)]
pub struct PreProcessor {
    pub input_size: u32,
}

impl PreProcessor {
    pub fn new(input_size: u32) -> Self {
        Self { input_size }
    }

    pub fn preprocess(&self, bytes: &[u8]) -> Result<Array<f32, IxDyn>, ClassifyError> {
        let _s = span!("preprocess_image");

        let rgb = Self::decode(bytes)?;

        tracing::trace!(
            width = rgb.width(),
            height = rgb.height(),
            payload_bytes = bytes.len(),
            "Decoded upload"
        );

        let resized = self.resize(rgb)?;

        self.normalize(&resized)
    }

    fn decode(bytes: &[u8]) -> Result<RgbImage, ClassifyError> {
        let _s = span!("decode");

        Ok(image::load_from_memory(bytes)?.to_rgb8())
    }

    /// Stretch to `input_size` x `input_size` (aspect ratio is not preserved).
    fn resize(&self, rgb: RgbImage) -> Result<Vec<u8>, ClassifyError> {
        let _s = span!("resize");

        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(ClassifyError::Resize(format!(
                "cannot resize a {}x{} image",
                width, height
            )));
        }

        let src = Image::from_vec_u8(width, height, rgb.into_raw(), PixelType::U8x3)
            .map_err(|e| ClassifyError::Resize(e.to_string()))?;

        let mut resized = Image::new(self.input_size, self.input_size, PixelType::U8x3);

        Resizer::new()
            .resize(
                &src,
                &mut resized,
                &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom)),
            )
            .map_err(|e| ClassifyError::Resize(e.to_string()))?;

        Ok(resized.into_vec())
    }

    fn normalize(&self, pixels: &[u8]) -> Result<Array<f32, IxDyn>, ClassifyError> {
        let _s = span!("normalize");

        let side = self.input_size as usize;
        let expected = side * side * CHANNELS;
        if pixels.len() != expected {
            return Err(ClassifyError::Resize(format!(
                "buffer size mismatch: expected {} bytes, got {}",
                expected,
                pixels.len()
            )));
        }

        let output: Vec<f32> = pixels.iter().map(|&p| p as f32 / 255.0).collect();

        Array::from_shape_vec(IxDyn(&[1, side, side, CHANNELS]), output)
            .map_err(|e| ClassifyError::Resize(e.to_string()))
    }
}

impl Default for PreProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_SIZE)
    }
}
