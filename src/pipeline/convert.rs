use anyhow::{Context, Result, bail};
use image::{ImageReader, RgbaImage};
use std::path::Path;

use super::quantize::TransparencyKey;
use crate::model::{AnimationFrame, OutputArtifact};

pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();

    if image.width() == 0 || image.height() == 0 {
        bail!("{} has no pixels", path.display());
    }

    Ok(image)
}

/// Builds the artifact for an already decoded image. No I/O.
pub fn build_artifact(
    image: &RgbaImage,
    symbol: String,
    source_name: &str,
    animation: Option<AnimationFrame>,
    key: &TransparencyKey,
) -> OutputArtifact {
    OutputArtifact {
        symbol,
        source_name: source_name.to_string(),
        animation,
        width: image.width(),
        height: image.height(),
        key_color: key.color,
        sentinel: key.sentinel(),
        pixels: key.quantize_image(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_build_artifact_dimensions() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(2, 1, Rgba([255, 255, 255, 255]));

        let art = build_artifact(
            &image,
            "Thing".to_string(),
            "Thing.png",
            None,
            &TransparencyKey::default(),
        );

        assert_eq!(art.width, 3);
        assert_eq!(art.height, 2);
        assert_eq!(art.pixels.len(), 6);
        // RgbaImage::new is fully transparent
        assert_eq!(art.pixels[0], 0xF81F);
        assert_eq!(art.pixels[5], 0xFFFF);
        assert!(art.render().contains("#define THING_WIDTH 3\n#define THING_HEIGHT 2\n"));
    }

    #[test]
    fn test_load_rgba_converts_rgb() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let image = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        image.save(&path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_load_rgba_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_rgba(&path).unwrap_err();
        assert!(format!("{}", err).contains("Failed to decode"));
    }
}
