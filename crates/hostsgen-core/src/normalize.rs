//! Line normalization for fetched blocklists.
//!
//! Sources disagree on how a hosts line looks: some use `127.0.0.1` instead of
//! the null route, some pad columns with tabs or runs of spaces, some append
//! inline `#` comments. Every line is reshaped into one canonical form:
//!
//! - every `127.0.0.1` token becomes `0.0.0.0`;
//! - whitespace after a leading IP literal collapses to a single space, tabs
//!   anywhere in the entry become a single space, leading and trailing
//!   whitespace is dropped;
//! - an inline comment is split onto its own line (`# ...`).
//!
//! Lines end at `\n`, `\r\n` or a bare `\r`.
//!
//! Normalization is idempotent: normalizing normalized text returns it unchanged.

use std::net::IpAddr;

/// Address every entry is canonicalized to.
pub const NULL_ROUTE: &str = "0.0.0.0";
/// Loopback literal rewritten to [`NULL_ROUTE`].
pub const LOOPBACK_V4: &str = "127.0.0.1";

const COMMENT_MARKER: char = '#';
const ESCAPE: char = '\\';

/// One source line after normalization. A line yields an entry, a comment, both
/// (inline comment split off), or neither (blank line).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedLine {
    pub entry: Option<String>,
    pub comment: Option<String>,
}

impl NormalizedLine {
    pub fn is_blank(&self) -> bool {
        self.entry.is_none() && self.comment.is_none()
    }
}

/// Normalize a single line (without its line terminator).
pub fn normalize_line(line: &str) -> NormalizedLine {
    let (body, comment) = split_comment(line);
    let entry = normalize_entry(body);
    NormalizedLine {
        entry: (!entry.is_empty()).then_some(entry),
        comment: comment.map(|c| c.replace('\r', "")),
    }
}

/// Normalize a whole document. Each produced line is terminated by `\n`;
/// blank source lines are kept as blank lines.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in lines(text) {
        let normalized = normalize_line(line);
        if normalized.is_blank() {
            out.push('\n');
            continue;
        }
        for part in [&normalized.entry, &normalized.comment].into_iter().flatten() {
            out.push_str(part);
            out.push('\n');
        }
    }
    out
}

/// Entry lines of `text` in source order. Comments and blank lines are skipped.
pub fn entries(text: &str) -> impl Iterator<Item = String> + '_ {
    lines(text).filter_map(|line| normalize_line(line).entry)
}

/// Split `text` at `\n`, `\r\n` and bare `\r`. A final terminator does not
/// produce a trailing empty line.
pub fn lines(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

/// Iterator returned by [`lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let Some(end) = self.rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..end];
        let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[end + terminator..];
        Some(line)
    }
}

/// Split at the first unescaped `#`. `\#` is not a marker; `\\#` is.
fn split_comment(line: &str) -> (&str, Option<&str>) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if c == COMMENT_MARKER && !escaped {
            return (&line[..i], Some(&line[i..]));
        }
        escaped = c == ESCAPE && !escaped;
    }
    (line, None)
}

/// Rebuild the entry token by token. Separators are kept as they are except
/// the one after a leading IP literal, which becomes a single space.
fn normalize_entry(body: &str) -> String {
    let body = collapse_tabs(body.trim());
    let mut out = String::with_capacity(body.len());
    let mut rest = body.as_str();
    let mut leading = true;

    while !rest.is_empty() {
        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (token, after) = rest.split_at(token_end);
        let gap_end = after
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(after.len());
        let (gap, next) = after.split_at(gap_end);

        out.push_str(if token == LOOPBACK_V4 { NULL_ROUTE } else { token });
        if !gap.is_empty() {
            if leading && is_ip_literal(token) {
                out.push(' ');
            } else {
                out.push_str(gap);
            }
        }
        leading = false;
        rest = next;
    }
    out
}

/// Replace every run of tabs with a single space.
fn collapse_tabs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tabs = false;
    for c in s.chars() {
        if c == '\t' {
            if !in_tabs {
                out.push(' ');
            }
            in_tabs = true;
        } else {
            out.push(c);
            in_tabs = false;
        }
    }
    out
}

fn is_ip_literal(token: &str) -> bool {
    token.parse::<IpAddr>().is_ok()
}
