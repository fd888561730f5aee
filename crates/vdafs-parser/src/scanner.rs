// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Statement scanner for the fixed-column record layout
//!
//! Reconstructs logical statements from the legacy line format: only the
//! first 72 columns of a line carry data (73.. hold sequence numbers),
//! statements may continue across lines, `$$` marks a comment, `HEADER / N`
//! is followed by N verbatim raw records, and `END` terminates the file.
//!
//! The scanner is an explicit per-line state machine rather than a regex
//! pass so the coalescing rules stay auditable.

use memchr::memchr_iter;
use vdafs_model::Header;

/// Number of significant data columns per record
pub const DATA_COLUMNS: usize = 72;

/// A coalesced logical statement, not yet parsed
#[derive(Clone, Debug, PartialEq)]
pub struct RawStatement {
    /// 1-based first source line
    pub start_line: usize,
    /// 1-based last source line
    pub end_line: usize,
    /// Concatenated data columns of all contributing lines
    pub text: String,
}

/// Scan output: the captured header (if any) plus all raw statements
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub header: Option<Header>,
    pub statements: Vec<RawStatement>,
}

/// Split content into lines without the trailing `\n`/`\r\n`
fn split_lines(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for nl in memchr_iter(b'\n', bytes) {
        let mut end = nl;
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        lines.push(&content[start..end]);
        start = nl + 1;
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Truncate a line to its data columns, respecting char boundaries
fn data_columns(line: &str) -> &str {
    if line.len() <= DATA_COLUMNS {
        return line;
    }
    let mut end = DATA_COLUMNS;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// True for comment lines (`$$` after optional leading spaces)
fn is_comment(data: &str) -> bool {
    data.trim_start().starts_with("$$")
}

/// Match a statement-start prefix `NAME = WORD`
///
/// NAME is one uppercase letter followed by up to 7 alphanumerics, WORD an
/// uppercase word. Returns `(name, word, rest)` where `rest` is everything
/// after the command word.
pub fn statement_prefix(data: &str) -> Option<(&str, &str, &str)> {
    let s = data.trim_start();

    let bytes = s.as_bytes();
    if bytes.first().map_or(true, |b| !b.is_ascii_uppercase()) {
        return None;
    }
    let mut name_end = 1;
    while name_end < bytes.len()
        && name_end < 8
        && (bytes[name_end].is_ascii_uppercase() || bytes[name_end].is_ascii_digit())
    {
        name_end += 1;
    }
    let name = &s[..name_end];

    let after_name = s[name_end..].trim_start();
    let rest = after_name.strip_prefix('=')?;
    let rest = rest.trim_start();

    let rest_bytes = rest.as_bytes();
    let mut word_end = 0;
    while word_end < rest_bytes.len() && rest_bytes[word_end].is_ascii_uppercase() {
        word_end += 1;
    }
    if word_end == 0 {
        return None;
    }

    Some((name, &rest[..word_end], &rest[word_end..]))
}

/// Parse a complete coalesced statement into `(name, word, tail)`
///
/// The tail is the parameter text after `/`, or `None` when the statement
/// has no parameter list. Anything other than `/` after the command word
/// makes the statement malformed.
pub fn parse_statement(text: &str) -> Option<(&str, &str, Option<&str>)> {
    let (name, word, rest) = statement_prefix(text)?;
    let rest = rest.trim();
    if rest.is_empty() {
        return Some((name, word, None));
    }
    let tail = rest.strip_prefix('/')?;
    Some((name, word, Some(tail.trim())))
}

/// Extract the leading (optionally signed) integer from a header tail
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    s[..end].parse().ok()
}

/// Scan raw content into a header and coalesced statements
///
/// HEADER capture happens here, during line iteration: the N records after
/// a `HEADER / N` statement are stored verbatim and never examined for
/// statement starts, so a captured line that happens to look like
/// `XY1 = CURVE / ...` cannot leak into the entity list.
pub fn scan(content: &str) -> ScanOutput {
    let lines = split_lines(content);
    let mut out = ScanOutput::default();

    let mut buf = String::new();
    let mut start_line = 0usize;
    let mut last_line = 0usize;

    let flush = |out: &mut ScanOutput, buf: &mut String, start: usize, end: usize| {
        if !buf.is_empty() {
            out.statements.push(RawStatement {
                start_line: start,
                end_line: end,
                text: std::mem::take(buf),
            });
        }
    };

    let mut i = 0;
    while i < lines.len() {
        let lineno = i + 1;
        let data = data_columns(lines[i]);

        // Standalone terminator stops parsing immediately
        if data.trim().eq_ignore_ascii_case("END") {
            flush(&mut out, &mut buf, start_line, last_line);
            return out;
        }

        // Blank and comment lines never interrupt coalescing
        if data.trim().is_empty() || is_comment(data) {
            i += 1;
            continue;
        }

        if let Some((name, word, rest)) = statement_prefix(data) {
            flush(&mut out, &mut buf, start_line, last_line);

            if word == "HEADER" {
                // Count sits on the statement line; the next N raw records
                // belong to the header regardless of their content.
                let n = rest
                    .trim_start()
                    .strip_prefix('/')
                    .and_then(leading_integer)
                    .unwrap_or(0)
                    .max(0) as usize;
                // The declared count is untrusted; capture only what the
                // file actually has
                let take = n.min(lines.len() - i - 1);
                let mut captured = Vec::with_capacity(take);
                for k in 0..take {
                    captured.push(lines[i + 1 + k].to_string());
                }
                out.header = Some(Header {
                    name: name.to_string(),
                    declared_line_count: n,
                    lines: captured,
                });
                i += 1 + take;
                continue;
            }

            start_line = lineno;
            last_line = lineno;
            buf.push_str(data);
        } else if !buf.is_empty() {
            // Continuation of the current statement
            last_line = lineno;
            buf.push_str(data);
        }
        // else: stray text outside any statement, skipped

        i += 1;
    }

    flush(&mut out, &mut buf, start_line, last_line);
    out
}
