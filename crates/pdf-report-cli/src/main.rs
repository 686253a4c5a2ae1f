use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_report::{ErrorKind, FsAssetLocator, ReportError, ReportOptions, ReportRequest};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pdfr", about = "Inspection report PDF generator", version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report PDF from an image and a CSV table
    Generate {
        /// Image shown on the first page
        #[arg(short, long)]
        image: PathBuf,

        /// CSV table (first row is the header)
        #[arg(short, long)]
        csv: PathBuf,

        /// Metadata as a JSON array: [title, inspector, date range]
        #[arg(short, long, conflicts_with_all = ["title", "inspector", "date_range"])]
        metadata: Option<String>,

        /// Report title
        #[arg(long)]
        title: Option<String>,

        /// Inspector name
        #[arg(long)]
        inspector: Option<String>,

        /// Date range covered by the data
        #[arg(long)]
        date_range: Option<String>,

        /// Output PDF file, or a directory to write `{title}_{date}.pdf` into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// JSON options file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Logo path (relative to the asset root)
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Directory assets are resolved against (default: working directory)
        #[arg(long)]
        asset_root: Option<PathBuf>,

        /// Company name shown in the header
        #[arg(long)]
        company: Option<String>,

        /// Print the layout plan as JSON instead of writing a PDF
        #[arg(long)]
        plan_only: bool,
    },

    /// Write the default options to a JSON file
    InitConfig {
        /// Output JSON file
        #[arg(short, long, default_value = "report-options.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ReportError>() {
            Some(report_error) if report_error.kind() == ErrorKind::Client => {
                log::warn!("Rejected input: {}", report_error);
                eprintln!("error: {}", report_error.public_message());
                ExitCode::from(2)
            }
            Some(report_error) => {
                log::error!("Error generating PDF: {:#}", e);
                eprintln!("error: {}", report_error.public_message());
                ExitCode::FAILURE
            }
            None => {
                log::error!("Error generating PDF: {:#}", e);
                eprintln!("error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate {
            image,
            csv,
            metadata,
            title,
            inspector,
            date_range,
            output,
            config,
            logo,
            asset_root,
            company,
            plan_only,
        } => {
            let mut options = match &config {
                Some(path) => ReportOptions::load(path)
                    .await
                    .with_context(|| format!("loading {}", path.display()))?,
                None => ReportOptions::default(),
            };
            if let Some(logo) = logo {
                options.logo_path = logo;
            }
            if let Some(company) = company {
                options.company_name = company;
            }

            let locator = match asset_root {
                Some(root) => FsAssetLocator::new(root),
                None => FsAssetLocator::current_dir()?,
            };

            let metadata = match metadata {
                Some(raw) => Some(raw),
                None => metadata_from_flags(title, inspector, date_range)?,
            };
            let image_bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("reading {}", image.display()))?;
            let csv_bytes = tokio::fs::read(&csv)
                .await
                .with_context(|| format!("reading {}", csv.display()))?;
            let request = ReportRequest::from_parts(Some(image_bytes), Some(csv_bytes), metadata)?;

            if plan_only {
                let today = chrono::Local::now().date_naive();
                let plan = pdf_report::prepare_plan(&request, &options, &locator, today)?;
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }

            let report = pdf_report::generate_report(request, &options, locator).await?;
            let path = output_path(&output, &report.file_name);
            tokio::fs::write(&path, &report.bytes)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Generated report ({} bytes) → {}", report.bytes.len(), path.display());
        }

        Commands::InitConfig { output } => {
            ReportOptions::default().save(&output).await?;
            println!("Wrote default options → {}", output.display());
        }
    }

    Ok(())
}

/// Metadata JSON from individual flags; `None` when no flag was given
fn metadata_from_flags(
    title: Option<String>,
    inspector: Option<String>,
    date_range: Option<String>,
) -> Result<Option<String>> {
    if title.is_none() && inspector.is_none() && date_range.is_none() {
        return Ok(None);
    }
    let na = || pdf_report::constants::NOT_AVAILABLE.to_string();
    let entries = [
        title.unwrap_or_else(na),
        inspector.unwrap_or_else(na),
        date_range.unwrap_or_else(na),
    ];
    Ok(Some(serde_json::to_string(&entries)?))
}

/// Directories get the conventional file name; path separators in the
/// title are replaced so the name stays a single component
fn output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(file_name.replace(['/', '\\'], "_"))
    } else {
        output.to_path_buf()
    }
}
