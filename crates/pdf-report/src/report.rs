//! End-to-end report generation
//!
//! This module orchestrates one request:
//! 1. Check all three inputs were supplied
//! 2. Parse the CSV and check it has data
//! 3. Parse metadata and decode the image
//! 4. Plan and render the PDF off the async runtime

use crate::assets::AssetLocator;
use crate::csv::parse_table_bytes;
use crate::image_info::embeddable_image;
use crate::metadata::{FooterSpec, HeaderSpec, Metadata};
use crate::options::ReportOptions;
use crate::plan::{LayoutPlan, ReportImage, plan_report};
use crate::render::render_pdf;
use crate::types::*;
use chrono::NaiveDate;
use std::path::Path;

/// Raw inputs for one report
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub image: Vec<u8>,
    pub csv: Vec<u8>,
    /// JSON array: `[title, inspector name, date range]`
    pub metadata: String,
}

impl ReportRequest {
    /// Build a request from possibly-missing parts
    pub fn from_parts(
        image: Option<Vec<u8>>,
        csv: Option<Vec<u8>>,
        metadata: Option<String>,
    ) -> Result<Self> {
        match (image, csv, metadata) {
            (Some(image), Some(csv), Some(metadata)) if !metadata.trim().is_empty() => Ok(Self {
                image,
                csv,
                metadata,
            }),
            _ => Err(ReportError::MissingInput(
                "Missing image, CSV file, or metadata.".to_string(),
            )),
        }
    }

    /// Read the image and CSV from disk
    pub async fn load(
        image_path: impl AsRef<Path>,
        csv_path: impl AsRef<Path>,
        metadata: impl Into<String>,
    ) -> Result<Self> {
        let image = tokio::fs::read(image_path).await?;
        let csv = tokio::fs::read(csv_path).await?;
        Self::from_parts(Some(image), Some(csv), Some(metadata.into()))
    }
}

/// A rendered report and the name it should be delivered under
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Validate inputs and build the layout plan, without rendering
pub fn prepare_plan(
    request: &ReportRequest,
    options: &ReportOptions,
    locator: &dyn AssetLocator,
    generated_on: NaiveDate,
) -> Result<LayoutPlan> {
    options.validate()?;

    let table = parse_table_bytes(&request.csv);
    table.validate()?;

    let metadata = Metadata::parse(&request.metadata)?;
    let (info, embedded) = embeddable_image(&request.image, options.pages.default_dpi)?;
    let image = ReportImage::new(embedded, info);

    let header = HeaderSpec::new(&metadata, options, generated_on);
    let footer = FooterSpec::from_options(options);

    plan_report(&table, &image, &header, &footer, options, locator)
}

/// Plan and render a report dated `generated_on`
pub fn generate_report_sync(
    request: &ReportRequest,
    options: &ReportOptions,
    locator: &dyn AssetLocator,
    generated_on: NaiveDate,
) -> Result<ReportOutput> {
    let plan = prepare_plan(request, options, locator, generated_on)?;
    let bytes = render_pdf(&plan)?;
    Ok(ReportOutput {
        file_name: plan.file_name(),
        bytes,
    })
}

/// Generate a report dated today
pub async fn generate_report<L>(
    request: ReportRequest,
    options: &ReportOptions,
    locator: L,
) -> Result<ReportOutput>
where
    L: AssetLocator + Send + 'static,
{
    let options = options.clone();
    let today = chrono::Local::now().date_naive();

    // Planning and rendering are CPU-bound
    tokio::task::spawn_blocking(move || generate_report_sync(&request, &options, &locator, today))
        .await?
}
