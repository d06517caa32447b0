use crate::core::candidate::EpitopeCandidate;
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "Unknown report format '{}'. Expected 'text', 'json' or 'csv'.",
                other
            )),
        }
    }
}

/// Candidates found for one input sequence.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry<'a> {
    pub sequence_id: &'a str,
    pub sequence_length: usize,
    pub candidates: &'a [EpitopeCandidate],
}

pub const NO_MATCHES_MESSAGE: &str = "No epitopes found with the given threshold.";

const CSV_HEADER: [&str; 5] = ["sequence_id", "peptide", "start", "end", "score"];

#[derive(Serialize)]
struct CsvRow<'a> {
    sequence_id: &'a str,
    peptide: &'a str,
    start: usize,
    end: usize,
    score: f64,
}

pub fn write_report(
    entries: &[ReportEntry],
    format: ReportFormat,
    writer: &mut impl Write,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Text => write_text(entries, writer),
        ReportFormat::Json => write_json(entries, writer),
        ReportFormat::Csv => write_csv(entries, writer),
    }
}

fn write_text(entries: &[ReportEntry], writer: &mut impl Write) -> Result<(), ReportError> {
    let labelled = entries.len() > 1;
    for entry in entries {
        if labelled {
            writeln!(writer, ">{} (length {})", entry.sequence_id, entry.sequence_length)?;
        }
        if entry.candidates.is_empty() {
            writeln!(writer, "{}", NO_MATCHES_MESSAGE)?;
            continue;
        }
        writeln!(writer, "Found {} epitope(s):", entry.candidates.len())?;
        for candidate in entry.candidates {
            writeln!(writer, "{}", candidate)?;
        }
    }
    Ok(())
}

fn write_json(entries: &[ReportEntry], writer: &mut impl Write) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *writer, entries)?;
    writeln!(writer)?;
    Ok(())
}

fn write_csv(entries: &[ReportEntry], writer: &mut impl Write) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for entry in entries {
        for candidate in entry.candidates {
            csv_writer.serialize(CsvRow {
                sequence_id: entry.sequence_id,
                peptide: &candidate.peptide,
                start: candidate.start,
                end: candidate.end,
                score: candidate.score,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}
