//! Text cleanup and chunking.

/// Maximum characters Google Translate TTS accepts in one request.
pub const GOOGLE_MAX_CHARS: usize = 100;

/// Characters that end a clause and are good places to split.
const SPLIT_MARKS: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\u{2026}', '\u{3002}', '\u{ff01}', '\u{ff1f}', '\u{ff0c}',
    '\u{3001}', '\u{061f}', '\u{060c}',
];

/// Normalize raw text for synthesis.
///
/// Line breaks and tabs become spaces, remaining control characters are
/// dropped, and whitespace runs collapse to a single space.
pub fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '\r' | '\n' | '\t' => Some(' '),
            c if c.is_ascii_control() => None,
            c => Some(c),
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Split text into chunks of at most `max` characters.
///
/// Splits prefer clause punctuation followed by whitespace, then whitespace
/// itself; a single word longer than `max` is cut at the limit. Adjacent
/// pieces are merged back with the separator they originally had, so text
/// that already fits comes back unchanged.
pub fn chunk(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut pieces = Vec::new();

    for (clause, spaced) in split_clauses(text) {
        if char_len(clause) <= max {
            pieces.push(Piece {
                text: clause.to_string(),
                spaced,
            });
        } else {
            split_words(clause, spaced, max, &mut pieces);
        }
    }

    let mut chunks = merge(pieces, max);
    chunks.retain(|c| {
        c.chars()
            .any(|ch| !ch.is_whitespace() && !SPLIT_MARKS.contains(&ch))
    });
    chunks
}

/// A piece of text and whether whitespace preceded it in the input.
struct Piece {
    text: String,
    spaced: bool,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Full-width marks end a clause even without trailing whitespace.
fn is_full_width(c: char) -> bool {
    matches!(c, '\u{3002}' | '\u{ff01}' | '\u{ff1f}' | '\u{ff0c}' | '\u{3001}')
}

/// Split after clause marks, keeping the mark with the clause.
///
/// A mark only ends a clause when whitespace or the end of input follows,
/// so "3.14", "1,000" and "example.com" stay whole.
fn split_clauses(text: &str) -> Vec<(&str, bool)> {
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !SPLIT_MARKS.contains(&c) {
            continue;
        }

        let at_boundary = match chars.peek() {
            None => true,
            Some((_, next)) => next.is_whitespace() || is_full_width(c),
        };

        if at_boundary {
            let end = idx + c.len_utf8();
            push_clause(&mut clauses, &text[start..end]);
            start = end;
        }
    }
    push_clause(&mut clauses, &text[start..]);

    clauses
}

fn push_clause<'a>(clauses: &mut Vec<(&'a str, bool)>, raw: &'a str) {
    let clause = raw.trim();
    if !clause.is_empty() {
        clauses.push((clause, raw.starts_with(char::is_whitespace)));
    }
}

fn split_words(clause: &str, spaced: bool, max: usize, out: &mut Vec<Piece>) {
    for (n, word) in clause.split_whitespace().enumerate() {
        let word_spaced = n > 0 || spaced;

        if char_len(word) <= max {
            out.push(Piece {
                text: word.to_string(),
                spaced: word_spaced,
            });
            continue;
        }

        let chars: Vec<char> = word.chars().collect();
        for (i, part) in chars.chunks(max).enumerate() {
            out.push(Piece {
                text: part.iter().collect(),
                spaced: i == 0 && word_spaced,
            });
        }
    }
}

fn merge(pieces: Vec<Piece>, max: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();

    for piece in pieces {
        let sep = usize::from(piece.spaced);
        match merged.last_mut() {
            Some(last) if char_len(last) + sep + char_len(&piece.text) <= max => {
                if piece.spaced {
                    last.push(' ');
                }
                last.push_str(&piece.text);
            }
            _ => merged.push(piece.text),
        }
    }

    merged
}
