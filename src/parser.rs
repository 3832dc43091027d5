use std::io::BufRead;
use std::path::Path;

use crate::error::Error;
use crate::issue::{Condition, IssueSink};
use crate::model::{EnvMap, Entry, Mode, ParseReport};

/// Parse dotenv lines from UTF-8 text in lenient mode.
pub fn parse_str(input: &str) -> ParseReport {
    parse_str_with_mode(input, Mode::Lenient)
}

/// Parse dotenv lines from UTF-8 text using a specific mode.
pub fn parse_str_with_mode(input: &str, mode: Mode) -> ParseReport {
    parse_str_with_source(input, None, mode)
}

/// Parse dotenv lines from UTF-8 bytes in lenient mode.
pub fn parse_bytes(input: &[u8]) -> Result<ParseReport, Error> {
    parse_bytes_with_mode(input, Mode::Lenient)
}

/// Parse dotenv lines from UTF-8 bytes using a specific mode.
pub fn parse_bytes_with_mode(input: &[u8], mode: Mode) -> Result<ParseReport, Error> {
    let text = std::str::from_utf8(input)?;
    Ok(parse_str_with_mode(text, mode))
}

/// Parse dotenv lines from a buffered reader in lenient mode.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParseReport, Error> {
    parse_reader_with_mode(reader, Mode::Lenient)
}

/// Parse dotenv lines from a buffered reader using a specific mode.
///
/// A read failure aborts the parse and nothing parsed so far is returned.
pub fn parse_reader_with_mode<R: BufRead>(reader: R, mode: Mode) -> Result<ParseReport, Error> {
    parse_reader_with_source(reader, None, mode)
}

pub(crate) fn parse_str_with_source(
    input: &str,
    source: Option<&Path>,
    mode: Mode,
) -> ParseReport {
    let mut parser = FileParser::new(source, mode);
    for (idx, line) in input.lines().enumerate() {
        parser.parse_line(line, idx as u32 + 1);
    }
    parser.finish()
}

pub(crate) fn parse_reader_with_source<R: BufRead>(
    reader: R,
    source: Option<&Path>,
    mode: Mode,
) -> Result<ParseReport, Error> {
    let mut parser = FileParser::new(source, mode);
    for (idx, line) in reader.lines().enumerate() {
        parser.parse_line(&line?, idx as u32 + 1);
    }
    Ok(parser.finish())
}

struct FileParser<'a> {
    env: EnvMap,
    sink: IssueSink,
    source: Option<&'a Path>,
}

impl<'a> FileParser<'a> {
    fn new(source: Option<&'a Path>, mode: Mode) -> Self {
        Self {
            env: EnvMap::new(),
            sink: IssueSink::new(mode),
            source,
        }
    }

    fn parse_line(&mut self, line: &str, line_num: u32) {
        let Some((key, raw_value)) = split_line(line, line_num, &mut self.sink) else {
            return;
        };

        let value = decode_value(raw_value, key, line_num, &mut self.sink);

        if self.sink.mode().is_strict() && !is_valid_strict_key(key) {
            self.sink
                .record(line_num, Some(key), Condition::InvalidStrictKey);
            return;
        }

        // Aborted quoted values never reach the map.
        let Some(value) = value else {
            return;
        };

        let entry = Entry {
            key: key.to_owned(),
            value,
            source: self.source.map(Path::to_path_buf),
            line: line_num,
        };
        if let Err(existing) = self.env.insert_first(entry) {
            let first_line = existing.line;
            self.sink
                .record(line_num, Some(key), Condition::DuplicateKey { first_line });
        }
    }

    fn finish(self) -> ParseReport {
        let (errors, warnings) = self.sink.finish();
        tracing::debug!(
            source = ?self.source,
            entries = self.env.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "parsed dotenv input"
        );

        ParseReport {
            env: self.env,
            errors,
            warnings,
        }
    }
}

/// Split a raw line into trimmed key and raw value, or `None` when the line
/// yields no entry.
fn split_line<'l>(
    line: &'l str,
    line_num: u32,
    sink: &mut IssueSink,
) -> Option<(&'l str, &'l str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let Some((key, value)) = line.split_once('=') else {
        sink.record(line_num, None, Condition::MissingEquals);
        return None;
    };

    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
        sink.record(line_num, None, Condition::MissingKey);
        return None;
    }
    if value.is_empty() {
        sink.record(line_num, Some(key), Condition::MissingValue);
    }

    Some((key, value))
}

/// Returns `None` when a quoted value could not be decoded.
fn decode_value(input: &str, key: &str, line_num: u32, sink: &mut IssueSink) -> Option<String> {
    if is_quoted(input) {
        return decode_quoted(input, key, line_num, sink);
    }
    Some(decode_unquoted(input, key, line_num, sink))
}

fn is_quoted(input: &str) -> bool {
    input.len() >= 2 && (input.starts_with('"') || input.starts_with('\''))
}

fn decode_unquoted(input: &str, key: &str, line_num: u32, sink: &mut IssueSink) -> String {
    let bytes = input.as_bytes();
    let comment_idx = bytes
        .iter()
        .enumerate()
        .find(|&(idx, byte)| *byte == b'#' && !is_preceded_by_odd_backslashes(bytes, idx))
        .map(|(idx, _)| idx);

    let value = match comment_idx {
        Some(idx) => input[..idx].trim_end(),
        None => input,
    };
    if ends_with_unescaped_backslash(value) {
        sink.record(line_num, Some(key), Condition::DanglingEscape);
    }

    value.to_owned()
}

fn decode_quoted(input: &str, key: &str, line_num: u32, sink: &mut IssueSink) -> Option<String> {
    let bytes = input.as_bytes();
    let quote = bytes[0];

    let closing_idx = bytes
        .iter()
        .enumerate()
        .skip(1)
        .find(|&(idx, byte)| *byte == quote && !is_preceded_by_odd_backslashes(bytes, idx))
        .map(|(idx, _)| idx);

    let Some(end_idx) = closing_idx else {
        let condition = if ends_with_unescaped_backslash(&input[1..]) {
            Condition::DanglingEscape
        } else {
            Condition::UnclosedQuote
        };
        sink.record(line_num, Some(key), condition);
        return None;
    };

    let tail = input[end_idx + 1..].trim();
    if !tail.is_empty() && !tail.starts_with('#') {
        sink.record(line_num, Some(key), Condition::ContentAfterQuote);
    }

    Some(input[1..end_idx].to_owned())
}

fn ends_with_unescaped_backslash(value: &str) -> bool {
    is_preceded_by_odd_backslashes(value.as_bytes(), value.len())
}

fn is_preceded_by_odd_backslashes(bytes: &[u8], idx: usize) -> bool {
    if idx == 0 {
        return false;
    }

    let mut cursor = idx;
    let mut backslash_count = 0usize;
    while cursor > 0 && bytes[cursor - 1] == b'\\' {
        cursor -= 1;
        backslash_count += 1;
    }

    backslash_count % 2 == 1
}

/// `^[A-Z_][A-Z0-9_]*$`
fn is_valid_strict_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_uppercase() || first == '_')
        && chars.all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_')
}
