use pdf_report::*;

fn expect_config_error(options: &ReportOptions, needle: &str) {
    match options.validate() {
        Err(ReportError::Config(msg)) => {
            assert!(msg.contains(needle), "'{}' does not mention '{}'", msg, needle)
        }
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_default_options_are_valid() {
    let options = ReportOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.soft_break_interval, 20);
    assert_eq!(options.columns.percentile, 0.9);
    assert_eq!(options.pages.table_page_min_width_cm, 21.0);
    assert_eq!(options.pages.table_page_max_width_cm, 70.0);
    assert_eq!(options.pages.image_page_max_cm, Some(508.0));
    assert!(options.show_page_numbers);
}

#[test]
fn test_validation_soft_break_interval() {
    let mut options = ReportOptions::default();
    options.soft_break_interval = 0;
    expect_config_error(&options, "Soft break interval");
}

#[test]
fn test_validation_percentile_range() {
    let mut options = ReportOptions::default();
    options.columns.percentile = 1.5;
    expect_config_error(&options, "Percentile");

    options.columns.percentile = 1.0;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_column_bounds() {
    let mut options = ReportOptions::default();
    options.columns.min_width_cm = 12.0;
    expect_config_error(&options, "Column width bounds");
}

#[test]
fn test_validation_page_bounds() {
    let mut options = ReportOptions::default();
    options.pages.table_page_min_width_cm = 80.0;
    expect_config_error(&options, "Table page width bounds");

    let mut options = ReportOptions::default();
    options.pages.image_page_max_cm = Some(10.0);
    expect_config_error(&options, "ceiling");

    let mut options = ReportOptions::default();
    options.pages.default_dpi = 0.0;
    expect_config_error(&options, "DPI");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_save_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("options.json");

    let mut options = ReportOptions::default();
    options.company_name = "Acme Inspections".to_string();
    options.soft_break_interval = 12;
    options.footer_left_text = Some("Confidential".to_string());
    options.pages.image_page_max_cm = None;

    options.save(&path).await.unwrap();
    let loaded = ReportOptions::load(&path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_options_fill_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("partial.json");
    tokio::fs::write(&path, r#"{"company_name": "Acme", "columns": {"max_width_cm": 12.0}}"#)
        .await
        .unwrap();

    let loaded = ReportOptions::load(&path).await.unwrap();
    assert_eq!(loaded.company_name, "Acme");
    assert_eq!(loaded.columns.max_width_cm, 12.0);
    assert_eq!(loaded.columns.min_width_cm, 2.0);
    assert_eq!(loaded.fonts, FontSizes::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_malformed_options_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    match ReportOptions::load(&path).await {
        Err(ReportError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
