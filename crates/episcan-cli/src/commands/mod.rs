pub mod batch;
pub mod known;
pub mod predict;
pub mod structure;

use crate::error::Result;
use crate::utils::progress::{CliProgressHandler, download_bar};
use episcan::core::io::report::{ReportEntry, ReportFormat, write_report};
use indicatif::{ProgressBar, ProgressDrawTarget};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Global options every command needs.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub config_path: Option<PathBuf>,
    pub quiet: bool,
}

impl CommandContext {
    pub fn progress_handler(&self) -> CliProgressHandler {
        if self.quiet {
            CliProgressHandler::hidden()
        } else {
            CliProgressHandler::new()
        }
    }

    pub fn download_bar(&self, label: &str) -> ProgressBar {
        let pb = download_bar(label);
        if self.quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb
    }
}

/// Writes the report to `output`, or to stdout when no path is given.
pub fn write_entries(
    entries: &[ReportEntry],
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_report(entries, format, &mut writer)?;
            writer.flush()?;
            info!("Wrote {} report(s) to {:?}", entries.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_report(entries, format, &mut lock)?;
        }
    }
    Ok(())
}
