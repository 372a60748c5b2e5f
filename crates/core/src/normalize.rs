//! Stage 0: text normalization.
//!
//! Strips `//` line comments, replaces newlines with spaces, and collapses
//! every whitespace run to a single space, so the statement extractor can
//! scan one flat line. Total over any input: there are no failure modes.

/// Normalize raw definitions-file text into a single line.
///
/// A comment runs from `//` to the end of the line or the end of the
/// input, whichever comes first.
pub fn normalize(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    let mut pos = 0usize;
    let mut pending_space = false;

    while pos < chars.len() {
        let c = chars[pos];

        // Line comment: skip to end of line. The newline itself is left
        // for the whitespace branch below.
        if c == '/' && pos + 1 < chars.len() && chars[pos + 1] == '/' {
            while pos < chars.len() && chars[pos] != '\n' {
                pos += 1;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            pos += 1;
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
        pos += 1;
    }

    out
}
