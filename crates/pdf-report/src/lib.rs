pub mod constants;
pub mod csv;
pub mod layout;
pub mod plan;
pub mod text;
mod assets;
mod image_info;
mod metadata;
mod options;
mod render;
mod report;
mod types;

pub use assets::{AssetLocator, FsAssetLocator};
pub use csv::{parse_table, tokenize_row};
pub use image_info::{embeddable_image, probe_image};
pub use layout::{column_widths, image_page_geometry, percentile_column_width, table_page_geometry};
pub use metadata::*;
pub use options::*;
pub use plan::{LayoutPlan, ReportImage, plan_report};
pub use render::render_pdf;
pub use report::*;
pub use text::insert_soft_breaks;
pub use types::*;
