//! Stage 1: statement extraction.
//!
//! Scans normalized text left-to-right for the three statement shapes:
//!
//! ```text
//! context <identifier> ;
//! define [final] <name> : where <expression-body> ;
//! define [final] <name> : <body-not-starting-with-where> ;
//! ```
//!
//! Keywords are case-insensitive and matched only at word boundaries.
//! Text that fits none of the shapes is skipped, not rejected; the
//! extractor yields what it recognizes, in order of appearance, and the
//! orchestrator decides whether the yield is acceptable (a missing
//! context statement is fatal there, not here).

use crate::ast::Statement;

/// Extract all recognizable statements from normalized text.
pub fn extract(text: &str) -> Vec<Statement> {
    let chars: Vec<char> = text.chars().collect();
    let mut statements = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        if keyword_at(&chars, pos, "context") {
            if let Some((stmt, next)) = scan_context(&chars, pos) {
                statements.push(stmt);
                pos = next;
                continue;
            }
        }
        if keyword_at(&chars, pos, "define") {
            if let Some((stmt, next)) = scan_define(&chars, pos) {
                statements.push(stmt);
                pos = next;
                continue;
            }
        }
        pos += 1;
    }

    statements
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive keyword match at `pos`, bounded on both sides by
/// non-word characters (or the ends of the text).
fn keyword_at(chars: &[char], pos: usize, keyword: &str) -> bool {
    if pos > 0 && is_word_char(chars[pos - 1]) {
        return false;
    }
    let mut p = pos;
    for k in keyword.chars() {
        if p >= chars.len() || chars[p].to_ascii_lowercase() != k {
            return false;
        }
        p += 1;
    }
    p >= chars.len() || !is_word_char(chars[p])
}

/// `context <identifier> ;`: the identifier is the run of non-`;` characters,
/// trimmed. Returns the statement and the scan position after the `;`.
fn scan_context(chars: &[char], pos: usize) -> Option<(Statement, usize)> {
    let p = pos + "context".len();
    if p >= chars.len() || chars[p] != ' ' {
        return None;
    }
    let start = p + 1;
    let end = find_char(chars, start, ';')?;
    let ident: String = chars[start..end].iter().collect();
    let ident = ident.trim();
    if ident.is_empty() {
        return None;
    }
    Some((Statement::Context(ident.to_owned()), end + 1))
}

/// `define [final] <name> : ...`: dispatches to the expression or task
/// shape depending on whether the post-colon text begins with the bare
/// keyword `where`.
///
/// A body that starts with the letters `where` but not the keyword
/// followed by a space (e.g. `whereabouts`) fits neither shape and is
/// dropped entirely.
fn scan_define(chars: &[char], pos: usize) -> Option<(Statement, usize)> {
    let mut p = pos + "define".len();
    if p >= chars.len() || chars[p] != ' ' {
        return None;
    }
    p += 1;

    // Optional `final` modifier, accepted and discarded.
    if keyword_at(chars, p, "final") && chars.get(p + "final".len()) == Some(&' ') {
        p += "final".len() + 1;
    }

    // Name: the run of non-`:` characters, trimmed.
    let colon = find_char(chars, p, ':')?;
    let name: String = chars[p..colon].iter().collect();
    let name = name.trim().to_owned();
    if name.is_empty() {
        return None;
    }

    // The colon must be followed by a space before the body.
    if chars.get(colon + 1) != Some(&' ') {
        return None;
    }
    let body_start = colon + 2;

    if starts_with_ci(chars, body_start, "where") {
        let after_where = body_start + "where".len();
        if chars.get(after_where) != Some(&' ') {
            // `whereabouts ...` or `where` at end of input: neither shape.
            return None;
        }
        let expr_start = after_where + 1;
        let end = find_char(chars, expr_start, ';')?;
        let body: String = chars[expr_start..end].iter().collect();
        let body = body.trim().to_owned();
        if body.is_empty() {
            return None;
        }
        return Some((Statement::Expression { name, body }, end + 1));
    }

    // Task statement: the match ends at the body start, so the body text
    // itself stays in the scan window (it carries no further captures in
    // practice, but the shapes are recognized wherever they occur).
    Some((Statement::Task { name }, body_start))
}

fn starts_with_ci(chars: &[char], pos: usize, prefix: &str) -> bool {
    let mut p = pos;
    for k in prefix.chars() {
        if p >= chars.len() || chars[p].to_ascii_lowercase() != k {
            return false;
        }
        p += 1;
    }
    true
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == target)
}
