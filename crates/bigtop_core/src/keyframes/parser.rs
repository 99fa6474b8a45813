//! Cart-pole log parser.
//!
//! Parses the CSV-like log written by a cart-pole training run.
//!
//! # Format Overview
//!
//! ```text
//! new state,previous state,action,reward
//! [0.0113 -0.1513 0.0163 0.2916],[0.0104 0.0440 0.0164 -0.0062],0,0.000000
//! [0.0083 -0.3466 0.0221 0.5893],[0.0113 -0.1513 0.0163 0.2916],0,-1.000000
//! ```
//!
//! - The first line is a header naming the columns.
//! - Every other line is a record: two bracketed state vectors whose numbers
//!   are separated by spaces, an action, a reward and an optional extra column.
//! - Fields are separated by a comma followed by optional whitespace.
//! - Exactly empty lines are skipped.

use super::error::{ParseError, ParseResult};
use super::types::{FieldValue, HeaderRecord, Keyframe, RawRecord};
use super::validator::keyframe_from_record;

/// The header written by the cart-pole trainer.
pub const CANONICAL_HEADER: &str = "new state,previous state,action,reward";

/// Fewest header fields accepted: the four canonical columns.
pub const MIN_HEADER_FIELDS: usize = 4;
/// Most header fields accepted.
pub const MAX_HEADER_FIELDS: usize = 6;

/// Fewest fields a data line must split into.
pub const MIN_LINE_FIELDS: usize = 4;

/// How the header line is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCheck {
    /// Only the number of fields is checked.
    #[default]
    FieldCount,
    /// The header must equal [`CANONICAL_HEADER`].
    Exact,
}

/// Options for [`parse_lines_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Header validation mode.
    pub header: HeaderCheck,
}

impl ParseOptions {
    /// Options requiring the canonical header text.
    pub fn strict() -> Self {
        Self {
            header: HeaderCheck::Exact,
        }
    }
}

/// Split a line on `,` followed by optional whitespace.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut parts = line.split(',');
    let mut fields = Vec::new();
    if let Some(first) = parts.next() {
        fields.push(first);
    }
    fields.extend(parts.map(str::trim_start));
    fields
}

/// Validate the header line.
///
/// The header's content is not interpreted in [`HeaderCheck::FieldCount`]
/// mode, except that a line whose first field is a bracketed vector is a
/// data record and means the header is missing.
pub fn parse_header(line: Option<&str>, check: HeaderCheck) -> ParseResult<HeaderRecord> {
    let line = line.ok_or(ParseError::MissingHeader)?;

    if check == HeaderCheck::Exact && line != CANONICAL_HEADER {
        return Err(ParseError::UnknownHeader {
            header: line.to_string(),
            expected: CANONICAL_HEADER,
        });
    }

    let fields = split_fields(line);

    if matches!(FieldValue::classify(fields[0]), FieldValue::Vector(_)) {
        return Err(ParseError::DataInHeader {
            header: line.to_string(),
        });
    }

    if !(MIN_HEADER_FIELDS..=MAX_HEADER_FIELDS).contains(&fields.len()) {
        return Err(ParseError::HeaderFieldCount {
            field_count: fields.len(),
            min: MIN_HEADER_FIELDS,
            max: MAX_HEADER_FIELDS,
            header: line.to_string(),
        });
    }

    Ok(HeaderRecord {
        fields: fields.into_iter().map(str::to_string).collect(),
    })
}

/// Tokenize one data line.
///
/// # Arguments
/// * `line_no` - 1-based line number, used in errors.
/// * `line` - The raw line.
///
/// # Returns
/// * `Ok(None)` - The line is exactly empty and is skipped.
/// * `Ok(Some(RawRecord))` - Tokenized record with both state vectors checked.
/// * `Err(ParseError)` - Too few fields or a malformed state vector.
pub fn tokenize_line(line_no: usize, line: &str) -> ParseResult<Option<RawRecord>> {
    if line.is_empty() {
        tracing::trace!("Skipping empty line {}", line_no);
        return Ok(None);
    }

    let raw_fields = split_fields(line);
    if raw_fields.len() < MIN_LINE_FIELDS {
        return Err(ParseError::line_structure(line_no, line, raw_fields.len()));
    }

    let fields: Vec<FieldValue> = raw_fields.iter().map(|f| FieldValue::classify(f)).collect();

    for (index, field) in fields.iter().enumerate().take(2) {
        if field.as_state().is_none() {
            return Err(ParseError::field_shape(line_no, index, raw_fields[index]));
        }
    }

    Ok(Some(RawRecord::new(line_no, line, fields)))
}

/// Tokenize every data line after a valid header.
///
/// Stops at the first error; no records are returned alongside it.
pub fn parse_records(lines: &[&str]) -> ParseResult<Vec<RawRecord>> {
    parse_records_with(lines, &ParseOptions::default())
}

/// Tokenize with explicit options.
pub fn parse_records_with(lines: &[&str], options: &ParseOptions) -> ParseResult<Vec<RawRecord>> {
    parse_header(lines.first().copied(), options.header)?;

    data_lines(lines)
        .filter_map(|(line_no, line)| tokenize_line(line_no, line).transpose())
        .collect()
}

/// Parse lines into keyframes.
///
/// The first line must be a header. Each data line is tokenized and
/// validated in order; the first failure aborts the parse.
///
/// # Returns
/// * `Ok(Vec<Keyframe>)` - One keyframe per non-empty data line.
/// * `Err(ParseError)` - The first error, with line context.
pub fn parse_lines(lines: &[&str]) -> ParseResult<Vec<Keyframe>> {
    parse_lines_with(lines, &ParseOptions::default())
}

/// Parse lines into keyframes with explicit options.
pub fn parse_lines_with(lines: &[&str], options: &ParseOptions) -> ParseResult<Vec<Keyframe>> {
    parse_header(lines.first().copied(), options.header)?;

    let result: ParseResult<Vec<Keyframe>> =
        data_lines(lines).try_fold(Vec::new(), |mut keyframes, (line_no, line)| {
            if let Some(record) = tokenize_line(line_no, line)? {
                let keyframe = keyframe_from_record(&record)
                    .map_err(|e| ParseError::invalid_record(record.line, record.text, e))?;
                keyframes.push(keyframe);
            }
            Ok(keyframes)
        });

    match &result {
        Ok(keyframes) => tracing::debug!(
            "Parsed {} keyframes from {} lines",
            keyframes.len(),
            lines.len()
        ),
        Err(e) => tracing::debug!("Parse failed: {}", e),
    }

    result
}

/// Parse text content into keyframes.
///
/// Line endings are normalized before splitting.
pub fn parse_content(content: &str) -> ParseResult<Vec<Keyframe>> {
    parse_content_with(content, &ParseOptions::default())
}

/// Parse text content into keyframes with explicit options.
pub fn parse_content_with(content: &str, options: &ParseOptions) -> ParseResult<Vec<Keyframe>> {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = content.split('\n').collect();
    parse_lines_with(&lines, options)
}

/// Data lines paired with their 1-based line numbers.
fn data_lines<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    lines
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, line)| (i + 1, *line))
}
