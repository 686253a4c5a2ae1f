use chrono::NaiveDate;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use pdf_report::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn no_logo(_: &Path) -> Option<PathBuf> {
    None
}

fn sample_request() -> ReportRequest {
    ReportRequest::from_parts(
        Some(png_fixture(320, 240)),
        Some(b"H1,H2\nabc,123\ndef,456".to_vec()),
        Some(r#"["Report", "Jane", "2024"]"#.to_string()),
    )
    .unwrap()
}

fn image_xobject_count(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .map(|name| name == b"Image")
                .unwrap_or(false)
        })
        .count()
}

fn collect_strings(object: &Object, out: &mut String) {
    match object {
        Object::String(bytes, _) => out.push_str(&String::from_utf8_lossy(bytes)),
        Object::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        _ => {}
    }
}

fn page_operations(doc: &Document, page_id: ObjectId) -> Content {
    Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap()
}

fn page_text(doc: &Document, page_id: ObjectId) -> String {
    let mut text = String::new();
    for operation in page_operations(doc, page_id).operations {
        if operation.operator == "Tj" || operation.operator == "TJ" {
            operation
                .operands
                .iter()
                .for_each(|operand| collect_strings(operand, &mut text));
            text.push('\n');
        }
    }
    text
}

fn draws_xobject(doc: &Document, page_id: ObjectId) -> bool {
    page_operations(doc, page_id)
        .operations
        .iter()
        .any(|operation| operation.operator == "Do")
}

fn long_table_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from("Device,Finding,Severity\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "host-{i},\"Open port, {}\",High\n",
            "unexpected service banner ".repeat(i % 4)
        ));
    }
    csv.into_bytes()
}

#[test]
fn test_generate_report_sync() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    let output =
        generate_report_sync(&sample_request(), &ReportOptions::default(), &no_logo, date).unwrap();

    assert_eq!(output.file_name, "Report_Jan 05, 2025.pdf");
    assert!(output.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_generate_report_with_logo_and_long_table() {
    let temp_dir = tempfile::tempdir().unwrap();
    let assets = temp_dir.path().join("assets");
    std::fs::create_dir(&assets).unwrap();
    std::fs::write(assets.join("logo.png"), png_fixture(120, 40)).unwrap();

    let request = ReportRequest::from_parts(
        Some(png_fixture(64, 64)),
        Some(long_table_csv(150)),
        Some(r#"["Audit", "Sam", "Q1"]"#.to_string()),
    )
    .unwrap();

    let mut options = ReportOptions::default();
    options.footer_left_text = Some("Confidential".to_string());

    let locator = FsAssetLocator::new(temp_dir.path());
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let output = generate_report_sync(&request, &options, &locator, date).unwrap();

    assert_eq!(output.file_name, "Audit_Dec 31, 2024.pdf");
    assert!(output.bytes.starts_with(b"%PDF"));

    let doc = Document::load_mem(&output.bytes).unwrap();
    let pages = doc.get_pages();
    // Image page plus a table that cannot fit on one page
    assert!(pages.len() >= 3, "expected table to span pages, got {}", pages.len());

    // Uploaded image and logo, the logo shared by every page
    assert!(image_xobject_count(&doc) >= 2);
    let total = pages.len();
    for (number, page_id) in &pages {
        assert!(draws_xobject(&doc, *page_id), "page {} has no logo", number);
        let text = page_text(&doc, *page_id);
        assert!(
            text.contains(&format!("Page {} of {}", number, total)),
            "page {} footer missing from {:?}",
            number,
            text
        );
        assert!(text.contains("Confidential"));
    }

    let last = pages[&(total as u32)];
    assert!(page_text(&doc, last).contains("host-149"));
    assert!(page_text(&doc, pages[&2]).contains("Device"));
}

#[test]
fn test_unreadable_logo_renders_placeholder() {
    let temp_dir = tempfile::tempdir().unwrap();
    let assets = temp_dir.path().join("assets");
    std::fs::create_dir(&assets).unwrap();
    std::fs::write(assets.join("logo.png"), b"not a png").unwrap();

    let request = ReportRequest::from_parts(
        Some(png_fixture(64, 64)),
        Some(long_table_csv(5)),
        Some(r#"["Audit", "Sam", "Q1"]"#.to_string()),
    )
    .unwrap();
    let locator = FsAssetLocator::new(temp_dir.path());
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let output = generate_report_sync(&request, &ReportOptions::default(), &locator, date).unwrap();

    let doc = Document::load_mem(&output.bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);

    // Only the uploaded image is embedded
    assert!(draws_xobject(&doc, pages[&1]));
    assert!(!draws_xobject(&doc, pages[&2]));
    for page_id in pages.values() {
        assert!(page_text(&doc, *page_id).contains("Logo Not Found"));
    }
}

#[test]
fn test_missing_parts_rejected() {
    let cases = [
        ReportRequest::from_parts(None, Some(vec![1]), Some("[]".to_string())),
        ReportRequest::from_parts(Some(vec![1]), None, Some("[]".to_string())),
        ReportRequest::from_parts(Some(vec![1]), Some(vec![1]), None),
        ReportRequest::from_parts(Some(vec![1]), Some(vec![1]), Some("  ".to_string())),
    ];

    for result in cases {
        let err = result.unwrap_err();
        assert!(matches!(err, ReportError::MissingInput(_)));
        assert_eq!(err.to_string(), "Missing image, CSV file, or metadata.");
        assert_eq!(err.kind(), ErrorKind::Client);
        assert_eq!(err.public_message(), err.to_string());
    }
}

#[test]
fn test_internal_errors_hide_details() {
    let err = ReportError::Pdf("xref table corrupted at offset 1234".to_string());
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(!err.public_message().contains("xref"));
}

#[test]
fn test_invalid_options_rejected_before_work() {
    let mut options = ReportOptions::default();
    options.columns.percentile = -0.5;

    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    let err = generate_report_sync(&sample_request(), &options, &no_logo, date).unwrap_err();
    assert!(matches!(err, ReportError::Config(_)));
}

#[tokio::test]
async fn test_generate_report_async() {
    let output = generate_report(sample_request(), &ReportOptions::default(), no_logo)
        .await
        .unwrap();

    let today = format_generated_date(chrono::Local::now().date_naive());
    assert_eq!(output.file_name, format!("Report_{}.pdf", today));
    assert!(output.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_generate_report_async_propagates_client_errors() {
    let request = ReportRequest::from_parts(
        Some(png_fixture(8, 8)),
        Some(b"OnlyHeader\n".to_vec()),
        Some(r#"["T"]"#.to_string()),
    )
    .unwrap();

    let err = generate_report(request, &ReportOptions::default(), no_logo)
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::InsufficientRows { rows: 1 }));
}

#[tokio::test]
async fn test_request_load_from_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image_path = temp_dir.path().join("scan.png");
    let csv_path = temp_dir.path().join("data.csv");
    tokio::fs::write(&image_path, png_fixture(16, 16)).await.unwrap();
    tokio::fs::write(&csv_path, "H1\nx\n").await.unwrap();

    let request = ReportRequest::load(&image_path, &csv_path, r#"["T"]"#)
        .await
        .unwrap();
    assert_eq!(request.csv, b"H1\nx\n");
    assert_eq!(request.metadata, r#"["T"]"#);

    let missing = ReportRequest::load(temp_dir.path().join("nope.png"), &csv_path, "[]").await;
    assert!(matches!(missing, Err(ReportError::Io(_))));
}
