use chrono::NaiveDate;
use pdf_report::plan::{ImageSource, SectionBody};
use pdf_report::*;
use std::borrow::Cow;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn encode(format: image::ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

fn png_with_density(xppu: u32, yppu: u32, unit: png::Unit) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, 4, 4);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions { xppu, yppu, unit }));
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[128u8; 4 * 4 * 3]).unwrap();
    }
    bytes
}

/// Big-endian TIFF block with IFD0 XResolution, YResolution and ResolutionUnit
fn exif_block(x_dpi: u32, y_dpi: u32, unit: u16) -> Vec<u8> {
    let mut tiff = b"MM\x00\x2a".to_vec();
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());

    let mut entry = |tag: u16, kind: u16, value: [u8; 4]| {
        tiff.extend_from_slice(&tag.to_be_bytes());
        tiff.extend_from_slice(&kind.to_be_bytes());
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&value);
    };
    // Rationals live right after the IFD, at offsets 50 and 58
    entry(0x011A, 5, 50u32.to_be_bytes());
    entry(0x011B, 5, 58u32.to_be_bytes());
    let unit = unit.to_be_bytes();
    entry(0x0128, 3, [unit[0], unit[1], 0, 0]);

    tiff.extend_from_slice(&0u32.to_be_bytes());
    for value in [x_dpi, 1, y_dpi, 1] {
        tiff.extend_from_slice(&value.to_be_bytes());
    }

    let mut block = b"Exif\x00\x00".to_vec();
    block.extend(tiff);
    block
}

/// A JPEG whose JFIF header carries no unit, with an EXIF APP1 segment
/// inserted after the start-of-image marker
fn jpeg_with_exif(x_dpi: u32, y_dpi: u32, unit: u16) -> Vec<u8> {
    let jpeg = encode(image::ImageFormat::Jpeg, 16, 8);
    let exif = exif_block(x_dpi, y_dpi, unit);

    let mut bytes = jpeg[..2].to_vec();
    bytes.extend_from_slice(&[0xFF, 0xE1]);
    bytes.extend_from_slice(&((exif.len() + 2) as u16).to_be_bytes());
    bytes.extend(exif);
    bytes.extend_from_slice(&jpeg[2..]);
    bytes
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.05
}

#[test]
fn test_png_density_from_phys() {
    // 11811 px/m is 300 dpi, 5906 px/m is 150 dpi
    let info = probe_image(&png_with_density(11811, 5906, png::Unit::Meter), 96.0).unwrap();
    assert_eq!((info.pixel_width, info.pixel_height), (4, 4));
    assert!(approx(info.dpi_x, 300.0));
    assert!(approx(info.dpi_y, 150.0));
}

#[test]
fn test_png_unspecified_unit_uses_default() {
    let info = probe_image(&png_with_density(3, 1, png::Unit::Unspecified), 96.0).unwrap();
    assert_eq!((info.dpi_x, info.dpi_y), (96.0, 96.0));
}

#[test]
fn test_png_without_phys_uses_default() {
    let info = probe_image(&encode(image::ImageFormat::Png, 10, 20), 120.0).unwrap();
    assert_eq!((info.pixel_width, info.pixel_height), (10, 20));
    assert_eq!((info.dpi_x, info.dpi_y), (120.0, 120.0));
}

#[test]
fn test_jpeg_without_density_uses_default() {
    let info = probe_image(&encode(image::ImageFormat::Jpeg, 16, 8), 96.0).unwrap();
    assert_eq!((info.pixel_width, info.pixel_height), (16, 8));
    assert_eq!((info.dpi_x, info.dpi_y), (96.0, 96.0));
}

#[test]
fn test_jpeg_density_from_exif() {
    let info = probe_image(&jpeg_with_exif(300, 150, 2), 96.0).unwrap();
    assert_eq!((info.pixel_width, info.pixel_height), (16, 8));
    assert!(approx(info.dpi_x, 300.0));
    assert!(approx(info.dpi_y, 150.0));

    let info = probe_image(&jpeg_with_exif(72, 72, 2), 96.0).unwrap();
    assert!(approx(info.dpi_x, 72.0));
}

#[test]
fn test_jpeg_exif_in_centimeters() {
    let info = probe_image(&jpeg_with_exif(100, 100, 3), 96.0).unwrap();
    assert!(approx(info.dpi_x, 254.0));
    assert!(approx(info.dpi_y, 254.0));
}

#[test]
fn test_truncated_png_is_rejected() {
    let png = encode(image::ImageFormat::Png, 64, 64);
    // Signature and IHDR intact, pixel data cut off
    let truncated = &png[..60];

    let err = probe_image(truncated, 96.0).unwrap_err();
    assert!(matches!(err, ReportError::Image(_)));

    let request = ReportRequest::from_parts(
        Some(truncated.to_vec()),
        Some(b"H1\nx".to_vec()),
        Some(r#"["T"]"#.to_string()),
    )
    .unwrap();
    let no_logo = |_: &Path| -> Option<PathBuf> { None };
    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    let err = prepare_plan(&request, &ReportOptions::default(), &no_logo, date).unwrap_err();
    assert!(matches!(err, ReportError::Image(_)));
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn test_png_and_jpeg_embedded_as_is() {
    let png = encode(image::ImageFormat::Png, 8, 8);
    let (_, bytes) = embeddable_image(&png, 96.0).unwrap();
    assert!(matches!(bytes, Cow::Borrowed(_)));

    let jpeg = encode(image::ImageFormat::Jpeg, 8, 8);
    let (_, bytes) = embeddable_image(&jpeg, 96.0).unwrap();
    assert!(matches!(bytes, Cow::Borrowed(_)));
}

#[test]
fn test_other_formats_reencoded_as_png() {
    let bmp = encode(image::ImageFormat::Bmp, 30, 20);
    let (info, bytes) = embeddable_image(&bmp, 96.0).unwrap();
    assert_eq!((info.pixel_width, info.pixel_height), (30, 20));
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));

    let request = ReportRequest::from_parts(
        Some(bmp),
        Some(b"H1\nx".to_vec()),
        Some(r#"["T"]"#.to_string()),
    )
    .unwrap();
    let no_logo = |_: &Path| -> Option<PathBuf> { None };
    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    let plan = prepare_plan(&request, &ReportOptions::default(), &no_logo, date).unwrap();
    match &plan.image_page.body {
        SectionBody::Image(directive) => match &directive.source {
            ImageSource::Embedded(bytes) => assert!(bytes.starts_with(b"\x89PNG")),
            other => panic!("Expected embedded image, got {:?}", other),
        },
        other => panic!("Expected image body, got {:?}", other),
    }
}
