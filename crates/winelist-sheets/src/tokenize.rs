//! Line-oriented CSV tokenizer for published spreadsheet exports.
//!
//! Sheets exported by hand are not always RFC 4180 clean: some cells are
//! wrapped in single quotes, some quoted spans never close. The tokenizer is
//! best-effort and never fails; the worst case is a row with odd cell values
//! that the normalizer later drops.

const SEPARATOR: char = ',';

/// Splits CSV text into lines, removing a leading UTF-8 BOM and `\r` line
/// endings. Blank lines are kept so callers can report source positions.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Splits one CSV line into trimmed fields.
///
/// A `"` or `'` at the start of a field opens a quoted span in which commas
/// are literal. Inside the span the opening character closes it, unless it is
/// immediately doubled, which yields one literal quote. A quote appearing
/// mid-field (as in `D'Alessandro`) is an ordinary character. An unterminated
/// span ends at end of line.
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quote: Option<char> = None;
    let mut span_seen = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => {
                if chars.peek() == Some(&q) {
                    field.push(q);
                    chars.next();
                } else {
                    quote = None;
                }
            }
            Some(_) => field.push(c),
            None if c == SEPARATOR => {
                fields.push(field.trim().to_owned());
                field.clear();
                span_seen = false;
            }
            None if (c == '"' || c == '\'') && !span_seen && field.trim().is_empty() => {
                field.clear();
                quote = Some(c);
                span_seen = true;
            }
            None => field.push(c),
        }
    }

    fields.push(field.trim().to_owned());
    fields
}
