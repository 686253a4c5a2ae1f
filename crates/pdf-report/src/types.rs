use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{0}")]
    MissingInput(String),
    #[error("Invalid JSON format for metadata: {0}")]
    InvalidMetadata(String),
    #[error("CSV must contain a header row and at least one data row (found {rows} row(s))")]
    InsufficientRows { rows: usize },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Broad failure classes, used by callers to decide how to report an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad request input; the caller should see the reason verbatim
    Client,
    /// An unreadable resource that makes the report impossible
    Resource,
    /// Anything else; details stay in the log
    Internal,
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::MissingInput(_)
            | ReportError::InvalidMetadata(_)
            | ReportError::InsufficientRows { .. } => ErrorKind::Client,
            ReportError::Image(_) => ErrorKind::Resource,
            ReportError::Io(_)
            | ReportError::Config(_)
            | ReportError::Pdf(_)
            | ReportError::TaskJoin(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to hand back to whoever submitted the request
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Client | ErrorKind::Resource => self.to_string(),
            ErrorKind::Internal => "Internal server error while generating the report".to_string(),
        }
    }
}

/// A parsed CSV table. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Column count is defined by the header row
    pub fn column_count(&self) -> usize {
        self.header().len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// A table needs a header and at least one data row
    pub fn validate(&self) -> Result<()> {
        if self.rows.len() < 2 {
            return Err(ReportError::InsufficientRows {
                rows: self.rows.len(),
            });
        }
        Ok(())
    }
}

/// Dimensions and resolution of the uploaded image
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageInfo {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub dpi_x: f32,
    pub dpi_y: f32,
}
