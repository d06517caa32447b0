use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One input sequence, optionally labelled by a FASTA header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: Option<String>,
    pub description: Option<String>,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn unnamed(sequence: impl Into<String>) -> Self {
        Self {
            id: None,
            description: None,
            sequence: sequence.into(),
        }
    }

    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("sequence")
    }
}

/// Parses raw sequence text or FASTA.
///
/// Text starting with `>` is FASTA; anything else is a single unnamed record.
/// Whitespace inside sequence data is dropped in both cases.
pub fn read_sequences(text: &str) -> Result<Vec<SequenceRecord>, FastaError> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('>') {
        return Ok(vec![SequenceRecord::unnamed(strip_whitespace(text))]);
    }

    let mut records: Vec<SequenceRecord> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            let mut parts = header.trim().splitn(2, char::is_whitespace);
            let id = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
            let description = parts
                .next()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            records.push(SequenceRecord {
                id,
                description,
                sequence: String::new(),
            });
        } else if let Some(record) = records.last_mut() {
            record.sequence.push_str(&strip_whitespace(line));
        }
    }

    Ok(records)
}

pub fn read_sequences_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<SequenceRecord>, FastaError> {
    let text = fs::read_to_string(path)?;
    read_sequences(&text)
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
