use image::{Rgba, RgbaImage};

use crate::model::Rgb;

pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Truncating RGB888 -> RGB565 pack. No rounding, no dithering.
pub const fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3)
}

/// Color-keyed transparency: pixels with alpha below `alpha_threshold` become
/// the packed key color.
///
/// An opaque pixel that already has the key color packs to the same sentinel and
/// so reads back as transparent on the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransparencyKey {
    pub color: Rgb,
    pub alpha_threshold: u8,
    sentinel: u16,
}

impl TransparencyKey {
    pub const fn new(color: Rgb, alpha_threshold: u8) -> Self {
        Self {
            color,
            alpha_threshold,
            sentinel: pack_rgb565(color.r, color.g, color.b),
        }
    }

    pub fn sentinel(&self) -> u16 {
        self.sentinel
    }

    pub fn quantize(&self, pixel: Rgba<u8>) -> u16 {
        let [r, g, b, a] = pixel.0;
        if a < self.alpha_threshold {
            self.sentinel
        } else {
            pack_rgb565(r, g, b)
        }
    }

    /// Quantizes every pixel, row-major from the top-left.
    pub fn quantize_image(&self, image: &RgbaImage) -> Vec<u16> {
        image.pixels().map(|p| self.quantize(*p)).collect()
    }
}

impl Default for TransparencyKey {
    fn default() -> Self {
        Self::new(Rgb::MAGENTA, DEFAULT_ALPHA_THRESHOLD)
    }
}
