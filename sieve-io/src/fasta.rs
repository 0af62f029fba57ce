use std::iter::Enumerate;
use std::str::Split;

use sieve_core::errors::{Result, SieveError, Stage};
use sieve_core::models::FastaRecord;
use sieve_core::utils::trim_control;

fn malformed(stage: Stage, line: usize, reason: impl Into<String>) -> SieveError {
    SieveError::MalformedRecord {
        stage,
        line,
        reason: reason.into(),
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

///
/// Validate a trimmed residue line. Residues are single printable ASCII characters.
///
fn parse_residues(line: &str, line_number: usize, stage: Stage) -> Result<Vec<u8>> {
    if line.is_empty() {
        return Err(malformed(stage, line_number, "empty sequence line"));
    }

    if let Some(bad) = line.chars().find(|c| !c.is_ascii_graphic()) {
        return Err(malformed(
            stage,
            line_number,
            format!("invalid residue character {:?}", bad),
        ));
    }

    Ok(line.as_bytes().to_vec())
}

fn parse_header(line: &str, line_number: usize, stage: Stage) -> Result<String> {
    let id = line
        .strip_prefix('>')
        .ok_or_else(|| malformed(stage, line_number, "expected a header line starting with '>'"))?
        .trim();

    if id.is_empty() {
        return Err(malformed(stage, line_number, "header without an identifier"));
    }

    Ok(id.to_string())
}

///
/// Parse a FASTA file holding exactly one record: a header line and a single
/// sequence line. Trailing blank lines are allowed, anything else after the
/// sequence line is rejected so that wrapped sequences are never truncated.
///
/// # Arguments
///
/// - text: full content of the file
///
pub fn parse_single_record(text: &str) -> Result<FastaRecord> {
    let stage = Stage::LoadReference;
    let mut lines = text.split('\n').map(trim_control).enumerate();

    let (header, residues) = match (lines.next(), lines.next()) {
        (Some((_, header)), Some((_, residues))) => (header, residues),
        _ => {
            return Err(malformed(
                stage,
                1,
                "expected a header line followed by a sequence line",
            ));
        }
    };

    let id = parse_header(header, 1, stage)?;
    let residues = parse_residues(residues, 2, stage)?;

    if let Some((i, _)) = lines.find(|(_, line)| !is_blank(line)) {
        return Err(malformed(
            stage,
            i + 1,
            "unexpected content after the sequence line",
        ));
    }

    Ok(FastaRecord { id, residues })
}

///
/// Lazily parse a multi-record FASTA file. Each record is a header line followed
/// by exactly one sequence line; blank lines between records are skipped.
///
/// Records are yielded in file order. The first structural problem is yielded as a
/// malformed record error, after which the iterator is exhausted.
///
pub fn parse_multi_record(text: &str) -> FastaRecords<'_> {
    FastaRecords::new(text, Stage::IndexSequences)
}

pub struct FastaRecords<'a> {
    lines: Enumerate<Split<'a, char>>,
    stage: Stage,
    done: bool,
}

impl<'a> FastaRecords<'a> {
    pub fn new(text: &'a str, stage: Stage) -> Self {
        FastaRecords {
            lines: text.split('\n').enumerate(),
            stage,
            done: false,
        }
    }

    fn next_non_blank(&mut self) -> Option<(usize, &'a str)> {
        self.lines
            .by_ref()
            .map(|(i, line)| (i + 1, trim_control(line)))
            .find(|(_, line)| !is_blank(line))
    }

    fn next_record(&mut self) -> Option<Result<FastaRecord>> {
        let (header_line, header) = self.next_non_blank()?;

        if !header.starts_with('>') {
            return Some(Err(malformed(
                self.stage,
                header_line,
                "sequence line without a preceding header",
            )));
        }

        let id = match parse_header(header, header_line, self.stage) {
            Ok(id) => id,
            Err(err) => return Some(Err(err)),
        };

        let Some((line_number, line)) = self.next_non_blank() else {
            return Some(Err(malformed(
                self.stage,
                header_line,
                format!("header {} has no sequence line", id),
            )));
        };

        if line.starts_with('>') {
            return Some(Err(malformed(
                self.stage,
                line_number,
                format!("header {} is followed by another header", id),
            )));
        }

        Some(parse_residues(line, line_number, self.stage).map(|residues| FastaRecord { id, residues }))
    }
}

impl Iterator for FastaRecords<'_> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.next_record();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}
