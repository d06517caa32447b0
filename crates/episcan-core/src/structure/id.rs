use super::error::StructureError;
use std::fmt;
use std::str::FromStr;

/// A validated, uppercase four-character PDB identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId(String);

impl StructureId {
    pub fn parse(raw: &str) -> Result<Self, StructureError> {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        let valid = trimmed.len() == 4
            && chars.next().is_some_and(|c| matches!(c, '1'..='9'))
            && chars.all(|c| c.is_ascii_alphanumeric());

        if !valid {
            return Err(StructureError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name used for the PDB-format entry, e.g. `1TUP.pdb`.
    pub fn pdb_file_name(&self) -> String {
        format!("{}.pdb", self.0)
    }
}

impl FromStr for StructureId {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StructureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
