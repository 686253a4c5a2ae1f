//! Layout calculation modules for reports
//!
//! This module handles the numeric decisions made before anything is drawn:
//! - Column widths (percentile of cell lengths, bounded)
//! - Page geometry for the image page and the table page

mod columns;
mod geometry;
mod types;

pub use columns::*;
pub use geometry::*;
pub use types::*;
