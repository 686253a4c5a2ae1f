//! Report metadata and the header/footer content built from it

use crate::constants::NOT_AVAILABLE;
use crate::options::ReportOptions;
use crate::types::*;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Positional metadata: `[title, inspector name, date range]`.
///
/// Entries past the third are kept but ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    entries: Vec<String>,
}

impl Metadata {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Parse metadata from its JSON array form, e.g. `["Title", "Jane", "2024"]`
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(ReportError::MissingInput(
                "Missing image, CSV file, or metadata.".to_string(),
            ));
        }
        let entries: Vec<String> =
            serde_json::from_str(raw).map_err(|e| ReportError::InvalidMetadata(e.to_string()))?;
        Ok(Self { entries })
    }

    pub fn title(&self) -> &str {
        self.entry(0)
    }

    pub fn inspector_name(&self) -> &str {
        self.entry(1)
    }

    pub fn date_range(&self) -> &str {
        self.entry(2)
    }

    fn entry(&self, index: usize) -> &str {
        self.entries
            .get(index)
            .map(String::as_str)
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// Format a date the way it appears in the header and the file name,
/// e.g. `Jan 05, 2025`
pub fn format_generated_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Everything shown in the page header
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeaderSpec {
    pub logo_path: PathBuf,
    pub title: String,
    pub generated_date: String,
    pub company_name: String,
    pub inspector_name: String,
    pub date_range: String,
}

impl HeaderSpec {
    pub fn new(metadata: &Metadata, options: &ReportOptions, generated_on: NaiveDate) -> Self {
        Self {
            logo_path: options.logo_path.clone(),
            title: metadata.title().to_string(),
            generated_date: format_generated_date(generated_on),
            company_name: options.company_name.clone(),
            inspector_name: metadata.inspector_name().to_string(),
            date_range: metadata.date_range().to_string(),
        }
    }

    /// `{title}_{generatedDate}.pdf`
    pub fn file_name(&self) -> String {
        format!("{}_{}.pdf", self.title, self.generated_date)
    }
}

/// What the page footer shows
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FooterSpec {
    pub left_text: Option<String>,
    pub right_text: Option<String>,
    pub show_page_numbers: bool,
}

impl Default for FooterSpec {
    fn default() -> Self {
        Self {
            left_text: None,
            right_text: None,
            show_page_numbers: true,
        }
    }
}

impl FooterSpec {
    pub fn from_options(options: &ReportOptions) -> Self {
        Self {
            left_text: options.footer_left_text.clone(),
            right_text: options.footer_right_text.clone(),
            show_page_numbers: options.show_page_numbers,
        }
    }
}
