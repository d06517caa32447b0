use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PdbError {
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Structure contains no ATOM or HETATM records")]
    NoAtoms,
}

#[derive(Debug, Error, PartialEq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdbResidue {
    pub chain_id: char,
    pub number: isize,
    pub insertion_code: Option<char>,
    pub name: String,
    pub hetero: bool,
}

/// Summary of the first model of a PDB-format structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub id_code: Option<String>,
    pub residues: Vec<PdbResidue>,
    pub atom_count: usize,
}

impl Structure {
    pub fn chain_ids(&self) -> Vec<char> {
        let mut seen = HashSet::new();
        self.residues
            .iter()
            .filter_map(|r| seen.insert(r.chain_id).then_some(r.chain_id))
            .collect()
    }

    /// Highest polymer (ATOM) residue number over all chains.
    pub fn max_residue_number(&self) -> Option<isize> {
        self.residues
            .iter()
            .filter(|r| !r.hetero)
            .map(|r| r.number)
            .max()
    }

    pub fn has_residue_number(&self, number: isize) -> bool {
        self.residues.iter().any(|r| !r.hetero && r.number == number)
    }
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
    line_num: usize,
) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns,
            value: value.to_string(),
        },
    })
}

fn parse_float(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
    line_num: usize,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.to_string(),
        },
    })
}

pub struct PdbFile;

impl PdbFile {
    pub fn parse(text: &str) -> Result<Structure, PdbError> {
        let mut structure = Structure::default();
        let mut current: Option<(char, isize, Option<char>)> = None;

        for (line_num, line) in text.lines().enumerate() {
            let line_num = line_num + 1;
            let record_type = slice_and_trim(line, 0, 6);

            match record_type {
                "HEADER" => {
                    let id = slice_and_trim(line, 62, 66);
                    if !id.is_empty() {
                        structure.id_code = Some(id.to_string());
                    }
                }
                "ATOM" | "HETATM" => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let number = parse_int(line, 22, 26, "23-26", line_num)?;
                    parse_float(line, 30, 38, "31-38", line_num)?;
                    parse_float(line, 38, 46, "39-46", line_num)?;
                    parse_float(line, 46, 54, "47-54", line_num)?;

                    let chain_id = line
                        .get(21..22)
                        .and_then(|s| s.chars().next())
                        .unwrap_or(' ');
                    let insertion_code = line
                        .get(26..27)
                        .and_then(|s| s.chars().next())
                        .filter(|c| *c != ' ');
                    let key = (chain_id, number, insertion_code);

                    if current != Some(key) {
                        structure.residues.push(PdbResidue {
                            chain_id,
                            number,
                            insertion_code,
                            name: slice_and_trim(line, 17, 20).to_string(),
                            hetero: record_type == "HETATM",
                        });
                        current = Some(key);
                    }
                    structure.atom_count += 1;
                }
                "ENDMDL" => break,
                _ => {}
            }
        }

        if structure.atom_count == 0 {
            return Err(PdbError::NoAtoms);
        }
        Ok(structure)
    }
}
