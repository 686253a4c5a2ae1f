use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Font sizes (points) used throughout the report
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FontSizes {
    pub title: f32,
    pub company: f32,
    pub header_text: f32,
    pub footer: f32,
    pub table_header: f32,
    pub table_body: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 16.0,
            company: 14.0,
            header_text: 12.0,
            footer: 12.0,
            table_header: 12.0,
            table_body: 10.0,
        }
    }
}

/// Column sizing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnSizing {
    pub percentile: f64,
    pub char_width_cm: f32,
    pub min_width_cm: f32,
    pub max_width_cm: f32,
}

impl Default for ColumnSizing {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_WIDTH_PERCENTILE,
            char_width_cm: DEFAULT_CHAR_WIDTH_CM,
            min_width_cm: DEFAULT_MIN_COL_WIDTH_CM,
            max_width_cm: DEFAULT_MAX_COL_WIDTH_CM,
        }
    }
}

/// Page geometry parameters for both report sections
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageSizing {
    pub image_width_scale: f32,
    pub image_height_scale: f32,
    pub image_page_min_cm: f32,
    /// `None` leaves the image page unbounded
    pub image_page_max_cm: Option<f32>,
    pub default_dpi: f32,
    pub image_target_width_cm: f32,
    pub table_margin_budget_cm: f32,
    pub table_page_min_width_cm: f32,
    pub table_page_max_width_cm: f32,
    pub table_page_height_cm: f32,
    pub header_top_margin_cm: f32,
    pub bottom_margin_cm: f32,
    pub side_margin_cm: f32,
}

impl Default for PageSizing {
    fn default() -> Self {
        Self {
            image_width_scale: DEFAULT_IMAGE_WIDTH_SCALE,
            image_height_scale: DEFAULT_IMAGE_HEIGHT_SCALE,
            image_page_min_cm: DEFAULT_IMAGE_PAGE_MIN_CM,
            image_page_max_cm: Some(DEFAULT_IMAGE_PAGE_MAX_CM),
            default_dpi: DEFAULT_DPI,
            image_target_width_cm: DEFAULT_IMAGE_TARGET_WIDTH_CM,
            table_margin_budget_cm: DEFAULT_TABLE_MARGIN_BUDGET_CM,
            table_page_min_width_cm: DEFAULT_TABLE_PAGE_MIN_WIDTH_CM,
            table_page_max_width_cm: DEFAULT_TABLE_PAGE_MAX_WIDTH_CM,
            table_page_height_cm: A4_HEIGHT_CM,
            header_top_margin_cm: DEFAULT_HEADER_TOP_MARGIN_CM,
            bottom_margin_cm: DEFAULT_BOTTOM_MARGIN_CM,
            side_margin_cm: DEFAULT_SIDE_MARGIN_CM,
        }
    }
}

/// Report configuration: branding, sizing and typography
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportOptions {
    // Branding
    pub company_name: String,
    pub logo_path: PathBuf,

    // Text
    pub soft_break_interval: usize,
    pub fonts: FontSizes,

    // Layout
    pub columns: ColumnSizing,
    pub pages: PageSizing,

    // Footer
    pub show_page_numbers: bool,
    pub footer_left_text: Option<String>,
    pub footer_right_text: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            company_name: "Barracuda Networks".to_string(),
            logo_path: PathBuf::from("assets/logo.png"),
            soft_break_interval: DEFAULT_SOFT_BREAK_INTERVAL,
            fonts: FontSizes::default(),
            columns: ColumnSizing::default(),
            pages: PageSizing::default(),
            show_page_numbers: true,
            footer_left_text: None,
            footer_right_text: None,
        }
    }
}

impl ReportOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ReportError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.soft_break_interval == 0 {
            return Err(ReportError::Config(
                "Soft break interval must be at least 1".to_string(),
            ));
        }

        let columns = &self.columns;
        if !(0.0..=1.0).contains(&columns.percentile) {
            return Err(ReportError::Config(format!(
                "Percentile must be between 0 and 1, got {}",
                columns.percentile
            )));
        }
        if columns.char_width_cm <= 0.0 {
            return Err(ReportError::Config(
                "Character width must be positive".to_string(),
            ));
        }
        if columns.min_width_cm <= 0.0 || columns.min_width_cm > columns.max_width_cm {
            return Err(ReportError::Config(format!(
                "Column width bounds are inconsistent: min {} cm, max {} cm",
                columns.min_width_cm, columns.max_width_cm
            )));
        }

        let pages = &self.pages;
        if pages.default_dpi <= 0.0 {
            return Err(ReportError::Config("Default DPI must be positive".to_string()));
        }
        if pages.image_width_scale <= 0.0 || pages.image_height_scale <= 0.0 {
            return Err(ReportError::Config(
                "Image scale factors must be positive".to_string(),
            ));
        }
        if let Some(max) = pages.image_page_max_cm {
            if max < pages.image_page_min_cm {
                return Err(ReportError::Config(format!(
                    "Image page ceiling {} cm is below the floor {} cm",
                    max, pages.image_page_min_cm
                )));
            }
        }
        if pages.table_page_min_width_cm <= 0.0
            || pages.table_page_min_width_cm > pages.table_page_max_width_cm
        {
            return Err(ReportError::Config(format!(
                "Table page width bounds are inconsistent: min {} cm, max {} cm",
                pages.table_page_min_width_cm, pages.table_page_max_width_cm
            )));
        }
        if pages.table_page_height_cm
            <= pages.header_top_margin_cm + pages.bottom_margin_cm
        {
            return Err(ReportError::Config(
                "Table page height leaves no room between header and footer".to_string(),
            ));
        }

        let fonts = &self.fonts;
        let sizes = [
            fonts.title,
            fonts.company,
            fonts.header_text,
            fonts.footer,
            fonts.table_header,
            fonts.table_body,
        ];
        if sizes.iter().any(|size| *size <= 0.0) {
            return Err(ReportError::Config("Font sizes must be positive".to_string()));
        }

        Ok(())
    }
}
