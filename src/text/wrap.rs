//! Greedy word wrap constrained by measured width and a line limit.
//!
//! Tokens wider than the budget are hyphenated character by character.
//! Wrapping stops at the line limit and drops whatever is left. If the last
//! line still overflows it is cut back and ends with an ellipsis.

use super::FontFace;

const HYPHEN: char = '-';

/// Wrapped lines plus whether any input was dropped at the line limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wrapped {
    pub lines: Vec<String>,
    pub truncated: bool,
}

/// Break a single overlong token into hyphenated chunks.
///
/// Every chunk except the last ends with `-` and measures within
/// `max_width`. A character that does not fit even alone is emitted on its
/// own. Runs once per character and never yields an empty chunk.
///
/// At 20px per character and a 200px budget,
/// `"SUPERCALIFRAGILISTICEXPIALIDOCIOUS"` becomes
/// `["SUPERCALI-", "FRAGILIST-", "ICEXPIALI-", "DOCIOUS"]`.
pub fn hyphenate<F: FontFace + ?Sized>(
    face: &F,
    token: &str,
    max_width: u32,
    stroke: u32,
) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut cur = String::new();

    for ch in token.chars() {
        let mut probe = String::with_capacity(cur.len() + 2 * ch.len_utf8());
        probe.push_str(&cur);
        probe.push(ch);
        probe.push(HYPHEN);

        if face.measure(&probe, stroke).width <= max_width {
            cur.push(ch);
        } else if !cur.is_empty() {
            cur.push(HYPHEN);
            chunks.push(std::mem::take(&mut cur));
            cur.push(ch);
        } else {
            chunks.push(ch.to_string());
        }
    }

    if !cur.is_empty() {
        chunks.push(cur);
    }
    chunks
}

/// Cut `line` back one character at a time until `line + ellipsis` fits,
/// stopping at a single remaining character.
pub fn truncate_with_ellipsis<F: FontFace + ?Sized>(
    face: &F,
    line: &str,
    max_width: u32,
    stroke: u32,
    ellipsis: &str,
) -> String {
    let mut kept: Vec<char> = line.chars().collect();
    loop {
        let candidate: String = kept.iter().collect::<String>().trim_end().to_string() + ellipsis;
        if kept.len() <= 1 || face.measure(&candidate, stroke).width <= max_width {
            return candidate;
        }
        kept.pop();
    }
}

/// Word-wrap `text` into at most `max_lines` lines of measured width
/// `max_width`.
pub fn wrap_to_width<F: FontFace + ?Sized>(
    face: &F,
    text: &str,
    max_width: u32,
    max_lines: usize,
    stroke: u32,
    ellipsis: &str,
) -> Wrapped {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Wrapped::default();
    }
    if max_lines == 0 {
        return Wrapped {
            lines: Vec::new(),
            truncated: true,
        };
    }

    let fits = |s: &str| face.measure(s, stroke).width <= max_width;

    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut truncated = false;

    'tokens: for token in words {
        let pieces = if fits(token) {
            vec![token.to_string()]
        } else {
            hyphenate(face, token, max_width, stroke)
        };

        for piece in pieces {
            if cur.is_empty() {
                cur = piece;
            } else {
                let candidate = format!("{} {}", cur, piece);
                if fits(&candidate) {
                    cur = candidate;
                } else {
                    lines.push(std::mem::replace(&mut cur, piece));
                }
            }

            if lines.len() == max_lines {
                truncated = true;
                break 'tokens;
            }
        }
    }

    if lines.len() < max_lines && !cur.is_empty() {
        lines.push(cur);
    }

    if let Some(last) = lines.last_mut()
        && !fits(last)
    {
        *last = truncate_with_ellipsis(face, last, max_width, stroke, ellipsis);
    }

    Wrapped { lines, truncated }
}
