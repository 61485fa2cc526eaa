//! Trace-file parsing: a plain text format of one `<pc> <outcome>` event
//! per line, replacing the DynamoRIO binary record format the source used.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::branch::{BranchEvent, Outcome};

#[derive(Debug, Error)]
pub enum TraceParseError {
    #[error("line {line}: expected `<pc> <outcome>`, got {text:?}")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: PC {text:?} is not a non-negative integer")]
    InvalidPc { line: usize, text: String },
    #[error("line {line}: outcome {text:?} is neither `T` nor `N`")]
    InvalidOutcome { line: usize, text: String },
    #[error("could not read trace file {path:?}: {source}")]
    Unreadable { path: std::path::PathBuf, source: std::io::Error },
}

/// Parse one already-trimmed, non-blank trace line into a [`BranchEvent`].
fn parse_line(line_no: usize, line: &str) -> Result<BranchEvent, TraceParseError> {
    let mut fields = line.split_whitespace();
    let pc_field = fields.next().ok_or_else(|| TraceParseError::MalformedLine { line: line_no, text: line.to_string() })?;
    let outcome_field = fields.next().ok_or_else(|| TraceParseError::MalformedLine { line: line_no, text: line.to_string() })?;
    if fields.next().is_some() {
        return Err(TraceParseError::MalformedLine { line: line_no, text: line.to_string() });
    }

    let pc: u64 = pc_field
        .parse()
        .map_err(|_| TraceParseError::InvalidPc { line: line_no, text: pc_field.to_string() })?;

    let outcome = match outcome_field {
        "T" => Outcome::T,
        "N" => Outcome::N,
        other => return Err(TraceParseError::InvalidOutcome { line: line_no, text: other.to_string() }),
    };

    Ok(BranchEvent { pc, outcome })
}

/// A trace file of `(pc, outcome)` events, read and parsed lazily one line
/// at a time so arbitrarily large traces never need to live in memory at
/// once.
pub struct TraceReader {
    lines: std::io::Lines<BufReader<File>>,
    line_no: usize,
}
impl TraceReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceParseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceParseError::Unreadable { path: path.to_path_buf(), source })?;
        Ok(Self { lines: BufReader::new(file).lines(), line_no: 0 })
    }
}
impl Iterator for TraceReader {
    type Item = Result<BranchEvent, TraceParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lines.next()?;
            self.line_no += 1;
            let raw = match raw {
                Ok(raw) => raw,
                Err(_) => continue,
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(parse_line(self.line_no, trimmed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_taken_and_not_taken() {
        assert_eq!(parse_line(1, "0 T").unwrap(), BranchEvent { pc: 0, outcome: Outcome::T });
        assert_eq!(parse_line(1, "4096 N").unwrap(), BranchEvent { pc: 4096, outcome: Outcome::N });
    }

    #[test]
    fn tolerates_trailing_whitespace() {
        assert_eq!(parse_line(1, "7 T   ").unwrap(), BranchEvent { pc: 7, outcome: Outcome::T });
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(parse_line(3, "7"), Err(TraceParseError::MalformedLine { line: 3, .. })));
        assert!(matches!(parse_line(3, "7 T extra"), Err(TraceParseError::MalformedLine { line: 3, .. })));
    }

    #[test]
    fn rejects_non_decimal_pc() {
        assert!(matches!(parse_line(2, "0x7 T"), Err(TraceParseError::InvalidPc { line: 2, .. })));
        assert!(matches!(parse_line(2, "-1 T"), Err(TraceParseError::InvalidPc { line: 2, .. })));
    }

    #[test]
    fn rejects_unknown_outcome_letter() {
        assert!(matches!(parse_line(5, "7 X"), Err(TraceParseError::InvalidOutcome { line: 5, .. })));
    }
}
