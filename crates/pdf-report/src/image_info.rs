//! Image decoding, dimensions and resolution
//!
//! Images are decoded in full with the `image` crate so a truncated or
//! corrupt upload is rejected before planning. Resolution comes from the
//! PNG `pHYs` chunk, or for JPEG from EXIF and then the JFIF header; other
//! formats, and files without density metadata, fall back to the caller's
//! default DPI.

use crate::types::*;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::Cursor;

const INCHES_PER_METER: f32 = 0.0254;
const CM_PER_INCH: f32 = 2.54;

struct Decoded {
    info: ImageInfo,
    format: Option<ImageFormat>,
    image: DynamicImage,
}

fn decode(bytes: &[u8], default_dpi: f32) -> Result<Decoded> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let format = reader.format();
    let image = reader.decode()?;

    let (dpi_x, dpi_y) = read_density(bytes, format).unwrap_or((default_dpi, default_dpi));
    log::debug!(
        "Decoded {:?} image: {}x{} px at {:.1}x{:.1} dpi",
        format,
        image.width(),
        image.height(),
        dpi_x,
        dpi_y
    );

    Ok(Decoded {
        info: ImageInfo {
            pixel_width: image.width(),
            pixel_height: image.height(),
            dpi_x,
            dpi_y,
        },
        format,
        image,
    })
}

/// Read dimensions and DPI of an encoded image.
///
/// Unknown, truncated or corrupt images are an error.
pub fn probe_image(bytes: &[u8], default_dpi: f32) -> Result<ImageInfo> {
    decode(bytes, default_dpi).map(|decoded| decoded.info)
}

/// Decode an image and return bytes the PDF writer can embed.
///
/// PNG and JPEG are passed through untouched; any other format the
/// decoder understands is re-encoded as PNG.
pub fn embeddable_image(bytes: &[u8], default_dpi: f32) -> Result<(ImageInfo, Cow<'_, [u8]>)> {
    let decoded = decode(bytes, default_dpi)?;
    match decoded.format {
        Some(ImageFormat::Png | ImageFormat::Jpeg) => Ok((decoded.info, Cow::Borrowed(bytes))),
        _ => {
            let mut png = Vec::new();
            decoded
                .image
                .to_rgba8()
                .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
            Ok((decoded.info, Cow::Owned(png)))
        }
    }
}

fn read_density(bytes: &[u8], format: Option<ImageFormat>) -> Option<(f32, f32)> {
    let (x, y) = match format? {
        ImageFormat::Png => png_density(bytes)?,
        ImageFormat::Jpeg => exif_density(bytes).or_else(|| jfif_density(bytes))?,
        _ => return None,
    };
    (x > 0.0 && y > 0.0).then_some((x, y))
}

/// `pHYs` in pixels per meter; the unspecified unit only gives an aspect ratio
fn png_density(bytes: &[u8]) -> Option<(f32, f32)> {
    let reader = png::Decoder::new(Cursor::new(bytes)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;
    match dims.unit {
        png::Unit::Meter => Some((
            dims.xppu as f32 * INCHES_PER_METER,
            dims.yppu as f32 * INCHES_PER_METER,
        )),
        png::Unit::Unspecified => None,
    }
}

/// EXIF `XResolution`/`YResolution` of the primary image
fn exif_density(bytes: &[u8]) -> Option<(f32, f32)> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;

    let rational = |tag| match &exif.get_field(tag, exif::In::PRIMARY)?.value {
        exif::Value::Rational(values) => values.first().map(|r| r.to_f64() as f32),
        _ => None,
    };
    let x = rational(exif::Tag::XResolution)?;
    let y = rational(exif::Tag::YResolution)?;

    // Unit 2 is inches (the EXIF default), 3 is centimeters
    let unit = exif
        .get_field(exif::Tag::ResolutionUnit, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(2);
    match unit {
        2 => Some((x, y)),
        3 => Some((x * CM_PER_INCH, y * CM_PER_INCH)),
        _ => None,
    }
}

/// Walk JPEG markers up to start-of-scan looking for a JFIF APP0 segment
fn jfif_density(bytes: &[u8]) -> Option<(f32, f32)> {
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        // Fill bytes
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        // Start of scan: no more header segments
        if marker == 0xDA {
            return None;
        }

        let length = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        let data_start = pos + 4;
        let data_end = pos + 2 + length;
        if length < 2 || data_end > bytes.len() {
            return None;
        }

        let data = &bytes[data_start..data_end];
        if marker == 0xE0 && data.len() >= 12 && data.starts_with(b"JFIF\0") {
            let units = data[7];
            let x = u16::from_be_bytes([data[8], data[9]]) as f32;
            let y = u16::from_be_bytes([data[10], data[11]]) as f32;
            return match units {
                1 => Some((x, y)),
                2 => Some((x * CM_PER_INCH, y * CM_PER_INCH)),
                _ => None,
            };
        }

        pos = data_end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jfif_dots_per_inch() {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        bytes.extend_from_slice(b"JFIF\0");
        bytes.extend_from_slice(&[1, 1, 1]); // version 1.1, units = dpi
        bytes.extend_from_slice(&72u16.to_be_bytes());
        bytes.extend_from_slice(&144u16.to_be_bytes());
        bytes.extend_from_slice(&[0, 0]); // no thumbnail
        bytes.extend_from_slice(&[0xFF, 0xDA]);

        assert_eq!(jfif_density(&bytes), Some((72.0, 144.0)));
    }

    #[test]
    fn test_jfif_dots_per_cm() {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        bytes.extend_from_slice(b"JFIF\0");
        bytes.extend_from_slice(&[1, 1, 2]);
        bytes.extend_from_slice(&100u16.to_be_bytes());
        bytes.extend_from_slice(&100u16.to_be_bytes());
        bytes.extend_from_slice(&[0, 0]);

        let (x, y) = jfif_density(&bytes).unwrap();
        assert!((x - 254.0).abs() < 0.01);
        assert!((y - 254.0).abs() < 0.01);
    }

    #[test]
    fn test_jfif_aspect_ratio_only() {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        bytes.extend_from_slice(b"JFIF\0");
        bytes.extend_from_slice(&[1, 1, 0]);
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.extend_from_slice(&[0, 0]);

        assert_eq!(jfif_density(&bytes), None);
    }

    #[test]
    fn test_unknown_format_has_no_density() {
        assert_eq!(read_density(b"GIF89a....", Some(ImageFormat::Gif)), None);
        assert_eq!(read_density(b"junk", None), None);
    }
}
