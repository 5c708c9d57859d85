use std::path::Path;

use crate::error::{RecognitionError, Result};

pub const IMAGE_WIDTH: usize = 28;
pub const IMAGE_HEIGHT: usize = 28;
/// Length of the pixel vector fed to the network.
pub const INPUT_VECTOR_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;

/// Grayscale values below this count as ink.
const INK_THRESHOLD: u8 = 128;

/// A 28×28 binarized symbol, flattened row by row. Ink is 1.0, paper 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct GreekSymbolImage {
    pixels: Vec<f64>,
}

impl GreekSymbolImage {
    pub fn new(pixels: Vec<f64>) -> Result<GreekSymbolImage> {
        if pixels.len() != INPUT_VECTOR_SIZE {
            return Err(RecognitionError::InvalidInputData {
                expected: INPUT_VECTOR_SIZE,
                actual: pixels.len(),
            });
        }
        Ok(GreekSymbolImage { pixels })
    }

    /// Decodes a 28×28 PNG and binarizes it: dark pixels become ink.
    ///
    /// Photos need cropping, thresholding, and resizing first; this accepts
    /// only images already at network resolution.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<GreekSymbolImage> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        Self::from_dynamic(img)
    }

    pub fn from_png_path<P: AsRef<Path>>(path: P) -> Result<GreekSymbolImage> {
        let img = image::open(path)?;
        Self::from_dynamic(img)
    }

    fn from_dynamic(img: image::DynamicImage) -> Result<GreekSymbolImage> {
        let gray = img.to_luma8();
        let (w, h) = gray.dimensions();
        if w as usize != IMAGE_WIDTH || h as usize != IMAGE_HEIGHT {
            return Err(RecognitionError::InvalidImage(format!(
                "expected {IMAGE_WIDTH}x{IMAGE_HEIGHT}, got {w}x{h}"
            )));
        }
        let pixels = gray
            .pixels()
            .map(|p| if p.0[0] < INK_THRESHOLD { 1.0 } else { 0.0 })
            .collect();
        Ok(GreekSymbolImage { pixels })
    }

    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }
}
