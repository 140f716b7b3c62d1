//! Writing rendered images to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use prism_renderer::{to_rgba8, ImageBuffer};

/// Save an image, choosing the format from the file extension.
///
/// `.ppm` is written as plain-text P3; anything `image` understands
/// (`.png`, `.jpg`, `.bmp`, ...) goes through the image crate.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("ppm") => save_ppm(image, path),
        Some(_) => save_with_image_crate(image, path),
        None => bail!("Output path {} has no file extension", path.display()),
    }
}

fn save_with_image_crate(image: &ImageBuffer, path: &Path) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("Pixel buffer does not match image dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn save_ppm(image: &ImageBuffer, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write plain-text PPM (P3), top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = to_rgba8(image.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}
