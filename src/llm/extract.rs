//! Candidate extraction from raw model output.
//!
//! Model output is free-form text: commentary, markdown fences, and
//! malformed fragments may surround the actual statements. The extractor
//! scans for `SELECT ... ;` statements with a small lexer that tracks
//! string-literal and comment state, so a semicolon inside a quoted literal
//! or a comment does not terminate the statement.

/// Scanner state while consuming one statement body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment,
}

/// Extracts up to `k` SQL candidates from raw model output.
///
/// Candidates are returned in order of appearance, terminators included,
/// duplicates preserved. Text that is not part of a complete `SELECT ... ;`
/// statement is discarded. Never pads: fewer than `k` matches yields a
/// shorter list.
pub fn extract_candidates(raw: &str, k: usize) -> Vec<String> {
    let bytes = raw.as_bytes();
    let mut candidates = Vec::new();
    let mut i = 0;

    while i < bytes.len() && candidates.len() < k {
        if select_keyword_at(bytes, i) {
            match scan_statement(bytes, i) {
                Some(end) => {
                    candidates.push(raw[i..end].to_string());
                    i = end;
                    continue;
                }
                // Unterminated statement runs to the end of input; nothing
                // after it can complete either.
                None => break,
            }
        }
        i += 1;
    }

    candidates
}

/// Returns true if a standalone SELECT keyword starts at `pos`.
fn select_keyword_at(bytes: &[u8], pos: usize) -> bool {
    const KEYWORD: &[u8] = b"SELECT";

    if pos + KEYWORD.len() > bytes.len() {
        return false;
    }
    if !bytes[pos..pos + KEYWORD.len()].eq_ignore_ascii_case(KEYWORD) {
        return false;
    }

    // Word boundaries on both sides, so e.g. "DESELECT" or "SELECTION"
    // never start a candidate.
    let before_ok = pos == 0 || !is_ident_byte(bytes[pos - 1]);
    let after_ok = pos + KEYWORD.len() < bytes.len() && !is_ident_byte(bytes[pos + KEYWORD.len()]);
    before_ok && after_ok
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Scans a statement starting at `start`, returning the exclusive end offset
/// of its terminating semicolon, or `None` if the input ends first.
fn scan_statement(bytes: &[u8], start: usize) -> Option<usize> {
    let mut state = LexState::Normal;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            LexState::Normal => match b {
                b';' => return Some(i + 1),
                b'\'' => state = LexState::SingleQuoted,
                b'"' => state = LexState::DoubleQuoted,
                b'-' if bytes.get(i + 1) == Some(&b'-') => {
                    state = LexState::LineComment;
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    state = LexState::BlockComment;
                    i += 1;
                }
                _ => {}
            },
            // A doubled quote ('') reads as leave-then-reenter, which is
            // equivalent to the SQL escape for this scanner's purposes.
            LexState::SingleQuoted => {
                if b == b'\'' {
                    state = LexState::Normal;
                }
            }
            LexState::DoubleQuoted => {
                if b == b'"' {
                    state = LexState::Normal;
                }
            }
            LexState::LineComment => {
                if b == b'\n' {
                    state = LexState::Normal;
                }
            }
            LexState::BlockComment => {
                if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    state = LexState::Normal;
                    i += 1;
                }
            }
        }
        i += 1;
    }

    None
}
